//! The six document fields the extraction service returns.
//!
//! Each field has two names: the `label` the service uses as its JSON key,
//! and the `slot_id` of the view slot the value is written into.

use serde::{Serialize, Serializer};
use std::fmt;

/// One of the six fixed fields of an extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentField {
    DocumentNumber,
    DocumentDate,
    ValidityTillDate,
    DocumentCurrency,
    DocumentValue,
    DocumentSubtype,
}

impl DocumentField {
    /// All fields, in display order.
    pub const ALL: [DocumentField; 6] = [
        DocumentField::DocumentNumber,
        DocumentField::DocumentDate,
        DocumentField::ValidityTillDate,
        DocumentField::DocumentCurrency,
        DocumentField::DocumentValue,
        DocumentField::DocumentSubtype,
    ];

    /// JSON key used by the extraction service.
    pub fn label(self) -> &'static str {
        match self {
            DocumentField::DocumentNumber => "Document Number",
            DocumentField::DocumentDate => "Document Date",
            DocumentField::ValidityTillDate => "Validity Till Date",
            DocumentField::DocumentCurrency => "Document Currency",
            DocumentField::DocumentValue => "Document Value (Amount)",
            DocumentField::DocumentSubtype => "Document Subtype",
        }
    }

    /// Id of the output slot this field is written into.
    pub fn slot_id(self) -> &'static str {
        match self {
            DocumentField::DocumentNumber => "docNumber",
            DocumentField::DocumentDate => "docDate",
            DocumentField::ValidityTillDate => "validity",
            DocumentField::DocumentCurrency => "currency",
            DocumentField::DocumentValue => "value",
            DocumentField::DocumentSubtype => "subtype",
        }
    }

    /// Look a field up by its service label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    /// Look a field up by its view slot id.
    pub fn from_slot_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.slot_id() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six values of one successful extraction.
///
/// Absent or falsy keys in the response are stored as empty strings, so
/// every field always has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    values: [String; 6],
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: DocumentField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: DocumentField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Builder-style variant of [`ExtractedFields::set`].
    pub fn with(mut self, field: DocumentField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentField, &str)> + '_ {
        DocumentField::ALL
            .into_iter()
            .map(move |f| (f, self.get(f)))
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }
}

/// Serialises as a JSON object keyed by service label, in display order.
impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(DocumentField::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}
