//! View model: the nine named slots an extraction writes into.
//!
//! | Slot | Id | Type |
//! |------|----|------|
//! | form | `upload-form` | [`SubmitEvent`] per submission |
//! | file input | `document` | [`FileInput`] |
//! | six outputs | `docNumber` … `subtype` | [`OutputSlots`] |
//! | result panel | `result-fields` | [`ResultPanel`], hidden until the first success |
//!
//! The controller is handed a view instead of looking elements up globally,
//! so the whole submit cycle can run headless.

use crate::fields::{DocumentField, ExtractedFields};
use crate::pipeline::upload::UploadFile;

/// Id of the upload form.
pub const FORM_ID: &str = "upload-form";
/// Id of the file input.
pub const FILE_INPUT_ID: &str = "document";
/// Id of the result panel.
pub const RESULT_PANEL_ID: &str = "result-fields";

/// One submission of the upload form.
///
/// Submitting a form normally triggers a navigation; the controller always
/// prevents it before doing anything else.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The file input. Only the first selected file is ever uploaded.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    files: Vec<UploadFile>,
}

impl FileInput {
    /// Replace the selection with a single file.
    pub fn select(&mut self, file: UploadFile) {
        self.files = vec![file];
    }

    /// Replace the selection with several files.
    pub fn select_many(&mut self, files: Vec<UploadFile>) {
        self.files = files;
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn first(&self) -> Option<&UploadFile> {
        self.files.first()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The six text outputs, addressable by field or by slot id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSlots {
    values: ExtractedFields,
}

impl OutputSlots {
    pub fn get(&self, field: DocumentField) -> &str {
        self.values.get(field)
    }

    pub fn set(&mut self, field: DocumentField, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// Read a slot by its id (`docNumber`, `docDate`, ...).
    pub fn by_id(&self, id: &str) -> Option<&str> {
        DocumentField::from_slot_id(id).map(|f| self.get(f))
    }

    /// Overwrite all six slots.
    pub fn fill(&mut self, fields: &ExtractedFields) {
        for (field, value) in fields.iter() {
            self.set(field, value);
        }
    }

    /// Current contents as an [`ExtractedFields`].
    pub fn snapshot(&self) -> ExtractedFields {
        self.values.clone()
    }
}

/// Container around the outputs. Starts hidden; only ever shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultPanel {
    visible: bool,
}

impl ResultPanel {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Everything the controller reads from and writes to.
#[derive(Debug, Clone, Default)]
pub struct ExtractionView {
    pub file_input: FileInput,
    pub outputs: OutputSlots,
    pub result_panel: ResultPanel,
}

impl ExtractionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a successful extraction: fill the outputs, then reveal the panel.
    pub fn apply(&mut self, fields: &ExtractedFields) {
        self.outputs.fill(fields);
        self.result_panel.show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_event_starts_not_prevented() {
        let mut ev = SubmitEvent::new();
        assert!(!ev.default_prevented());
        ev.prevent_default();
        assert!(ev.default_prevented());
    }

    #[test]
    fn file_input_uses_first_file() {
        let mut input = FileInput::default();
        assert!(input.first().is_none());

        input.select_many(vec![
            UploadFile::from_bytes("a.pdf", b"a".to_vec()),
            UploadFile::from_bytes("b.pdf", b"b".to_vec()),
        ]);
        assert_eq!(input.len(), 2);
        assert_eq!(input.first().map(|f| f.file_name.as_str()), Some("a.pdf"));

        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn apply_fills_outputs_and_shows_panel() {
        let mut view = ExtractionView::new();
        assert!(!view.result_panel.is_visible());

        let fields = ExtractedFields::new()
            .with(DocumentField::DocumentNumber, "INV-7")
            .with(DocumentField::DocumentCurrency, "USD");
        view.apply(&fields);

        assert!(view.result_panel.is_visible());
        assert_eq!(view.outputs.by_id("docNumber"), Some("INV-7"));
        assert_eq!(view.outputs.by_id("currency"), Some("USD"));
        assert_eq!(view.outputs.by_id("subtype"), Some(""));
        assert_eq!(view.outputs.by_id("nope"), None);
        assert_eq!(view.outputs.snapshot(), fields);
    }

    #[test]
    fn apply_overwrites_previous_values() {
        let mut view = ExtractionView::new();
        view.apply(&ExtractedFields::new().with(DocumentField::DocumentDate, "01-01-2024"));
        view.apply(&ExtractedFields::new().with(DocumentField::DocumentSubtype, "Export"));
        assert_eq!(view.outputs.get(DocumentField::DocumentDate), "");
        assert_eq!(view.outputs.get(DocumentField::DocumentSubtype), "Export");
    }
}
