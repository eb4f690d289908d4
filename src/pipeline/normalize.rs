//! Value normalisation: reduce verbose extracted answers to their core.
//!
//! The extraction service fills each field from a language-model answer,
//! and those answers sometimes arrive wrapped in prose ("The invoice number
//! is INV/2024/001."). When [`crate::ExtractionConfig::normalize_values`] is
//! set, each non-empty value is passed through the rule for its field. A
//! value no rule matches is kept, trimmed.
//!
//! | Field | Kept |
//! |-------|------|
//! | Document Number | first run of word characters, `-` and `/` |
//! | Document Date, Validity Till Date | first `D.M.YY`-style date |
//! | Document Currency | ISO code; symbols and names mapped where known |
//! | Document Value (Amount) | first decimal number, thousands separators dropped |
//! | Document Subtype | `Import` or `Export` |

use crate::fields::{DocumentField, ExtractedFields};
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalise every field of an extraction result.
pub fn normalize_fields(fields: &ExtractedFields) -> ExtractedFields {
    let mut out = ExtractedFields::new();
    for (field, value) in fields.iter() {
        if !value.is_empty() {
            out.set(field, normalize_value(field, value));
        }
    }
    out
}

/// Normalise one value according to its field's rule.
pub fn normalize_value(field: DocumentField, text: &str) -> String {
    let cleaned = match field {
        DocumentField::DocumentNumber => document_number(text),
        DocumentField::DocumentDate | DocumentField::ValidityTillDate => date(text),
        DocumentField::DocumentCurrency => currency(text),
        DocumentField::DocumentValue => amount(text),
        DocumentField::DocumentSubtype => subtype(text),
    };
    cleaned.unwrap_or_else(|| text.trim().to_string())
}

// ── Document Number ──────────────────────────────────────────────────────────

static RE_DOC_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w\-/]+").unwrap());

fn document_number(text: &str) -> Option<String> {
    RE_DOC_NUMBER.find(text).map(|m| m.as_str().to_string())
}

// ── Dates ────────────────────────────────────────────────────────────────────

static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}\b").unwrap());

fn date(text: &str) -> Option<String> {
    RE_DATE.find(text).map(|m| m.as_str().to_string())
}

// ── Currency ─────────────────────────────────────────────────────────────────

static RE_CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(₹|\$|€|£|\b(?:USD|INR|EUR|GBP|AUD|CAD|CHF|JPY|CNY|Rupees?|Dollars?)\b)")
        .unwrap()
});

fn currency(text: &str) -> Option<String> {
    let caps = RE_CURRENCY.captures(text)?;
    let found = &caps[1];
    let lower = found.to_lowercase();
    let code = match found {
        "₹" => "INR",
        "$" => "USD",
        "€" => "EUR",
        "£" => "GBP",
        _ if lower.starts_with("rupee") => "INR",
        _ if lower.starts_with("dollar") => "USD",
        _ => return Some(found.to_uppercase()),
    };
    Some(code.to_string())
}

// ── Amount ───────────────────────────────────────────────────────────────────

static RE_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

fn amount(text: &str) -> Option<String> {
    let without_commas = text.replace(',', "");
    RE_AMOUNT
        .find(&without_commas)
        .map(|m| m.as_str().to_string())
}

// ── Subtype ──────────────────────────────────────────────────────────────────

static RE_SUBTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(import|export)\b").unwrap());

fn subtype(text: &str) -> Option<String> {
    let caps = RE_SUBTYPE.captures(text)?;
    let word = caps[1].to_lowercase();
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_number_takes_first_code() {
        assert_eq!(
            normalize_value(DocumentField::DocumentNumber, "INV/2024-001 issued"),
            "INV/2024-001"
        );
        assert_eq!(normalize_value(DocumentField::DocumentNumber, "  ...  "), "...");
    }

    #[test]
    fn dates_are_extracted() {
        assert_eq!(
            normalize_value(DocumentField::DocumentDate, "The invoice date is 05-03-2024."),
            "05-03-2024"
        );
        assert_eq!(
            normalize_value(DocumentField::ValidityTillDate, "VALID UNTIL 1.04.24"),
            "1.04.24"
        );
        assert_eq!(
            normalize_value(DocumentField::ValidityTillDate, " not stated "),
            "not stated"
        );
    }

    #[test]
    fn currency_names_map_to_codes() {
        assert_eq!(
            normalize_value(DocumentField::DocumentCurrency, "Amount in inr"),
            "INR"
        );
        assert_eq!(
            normalize_value(DocumentField::DocumentCurrency, "paid in Rupees"),
            "INR"
        );
        assert_eq!(
            normalize_value(DocumentField::DocumentCurrency, "US Dollars only"),
            "USD"
        );
        assert_eq!(normalize_value(DocumentField::DocumentCurrency, "eur"), "EUR");
    }

    #[test]
    fn currency_symbols_map_to_codes() {
        let cases = [
            ("₹ 23,124.40", "INR"),
            ("$100", "USD"),
            ("Total: $ 5", "USD"),
            ("Currency: ₹", "INR"),
            ("€ 12", "EUR"),
            ("USD 5", "USD"),
        ];
        for (input, want) in cases {
            assert_eq!(
                normalize_value(DocumentField::DocumentCurrency, input),
                want,
                "input: {input}"
            );
        }
    }

    #[test]
    fn amount_drops_thousands_separators() {
        assert_eq!(
            normalize_value(DocumentField::DocumentValue, "Total payable: 23,124.40 INR"),
            "23124.40"
        );
        assert_eq!(normalize_value(DocumentField::DocumentValue, "n/a"), "n/a");
    }

    #[test]
    fn subtype_is_capitalised() {
        assert_eq!(
            normalize_value(DocumentField::DocumentSubtype, "This is an EXPORT document"),
            "Export"
        );
        assert_eq!(
            normalize_value(DocumentField::DocumentSubtype, "goods are imported"),
            "goods are imported"
        );
    }

    #[test]
    fn normalize_fields_keeps_empty_values_empty() {
        let fields = ExtractedFields::new()
            .with(DocumentField::DocumentSubtype, "import")
            .with(DocumentField::DocumentValue, "Rs. 1,000");
        let out = normalize_fields(&fields);
        assert_eq!(out.get(DocumentField::DocumentSubtype), "Import");
        assert_eq!(out.get(DocumentField::DocumentValue), "1000");
        assert_eq!(out.get(DocumentField::DocumentNumber), "");
    }
}
