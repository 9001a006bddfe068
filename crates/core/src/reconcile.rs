//! Typed row projection for the reconciler.
//!
//! Raw import rows arrive as loosely-typed JSON objects. They are projected
//! through the caller-supplied field mapping into an [`AssetRowPatch`] in a
//! single well-defined parse step, so type-coercion failures surface as one
//! explicit [`RowError`] instead of leaking through the reconcile path.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::RowError;

/// A partially-populated, typed view of one mapped import row.
///
/// Absent or empty-string source values are `None`, meaning "not provided".
/// An update merge preserves the stored value for every `None` field; it
/// never writes explicit nulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRowPatch {
    pub tag: Option<String>,
    pub serial: Option<String>,
    pub model_name: Option<String>,
    pub vendor_name: Option<String>,
    pub location_name: Option<String>,
    pub status: Option<String>,
    pub cost: Option<f64>,
    /// Passed through untyped; the storage layer enforces date validity.
    pub purchase_date: Option<String>,
    /// Passed through untyped; the storage layer enforces date validity.
    pub warranty_end: Option<String>,
    pub po_number: Option<String>,
    pub notes: Option<String>,
}

impl AssetRowPatch {
    /// True when at least one identifying attribute (tag or serial) is
    /// present. Rows without identity skip matching and always create.
    pub fn has_identity(&self) -> bool {
        self.tag.is_some() || self.serial.is_some()
    }
}

/// Project a raw row into an [`AssetRowPatch`] via the field mapping.
///
/// `row_number` is 1-based and used only for error attribution. The mapping
/// is source key -> canonical field; source keys absent from the row or
/// mapped to unknown canonical fields are ignored.
pub fn project_row(
    row_number: usize,
    raw: &Map<String, Value>,
    mapping: &HashMap<String, String>,
) -> Result<AssetRowPatch, RowError> {
    let mut patch = AssetRowPatch::default();

    for (source_key, field) in mapping {
        let Some(value) = raw.get(source_key) else {
            continue;
        };
        let Some(text) = value_to_text(value) else {
            continue;
        };

        match field.as_str() {
            "tag" => patch.tag = Some(text),
            "serial" => patch.serial = Some(text),
            "model" => patch.model_name = Some(text),
            "vendor" => patch.vendor_name = Some(text),
            "location" => patch.location_name = Some(text),
            "status" => patch.status = Some(text),
            "cost" => {
                let cost: f64 = text.parse().map_err(|_| {
                    RowError::new(row_number, format!("invalid cost value '{text}'"))
                })?;
                patch.cost = Some(cost);
            }
            "purchase_date" => patch.purchase_date = Some(text),
            "warranty_end" => patch.warranty_end = Some(text),
            "po_number" => patch.po_number = Some(text),
            "notes" => patch.notes = Some(text),
            // Unknown canonical field in a caller-supplied mapping: drop it.
            _ => {}
        }
    }

    Ok(patch)
}

/// Convert a JSON value into trimmed text, treating null and empty strings
/// as "not provided".
fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Arrays and objects have no scalar projection.
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn identity() -> HashMap<String, String> {
        crate::mapping::identity_mapping()
    }

    #[test]
    fn test_projects_mapped_fields() {
        let raw = row(json!({"tag": "A1", "serial": "S1", "cost": "100"}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert_eq!(patch.tag.as_deref(), Some("A1"));
        assert_eq!(patch.serial.as_deref(), Some("S1"));
        assert_eq!(patch.cost, Some(100.0));
    }

    #[test]
    fn test_custom_source_keys() {
        let mut mapping = HashMap::new();
        mapping.insert("Asset Tag".to_string(), "tag".to_string());
        mapping.insert("Manufacturer".to_string(), "vendor".to_string());

        let raw = row(json!({"Asset Tag": "A9", "Manufacturer": "Dell", "ignored": "x"}));
        let patch = project_row(1, &raw, &mapping).unwrap();
        assert_eq!(patch.tag.as_deref(), Some("A9"));
        assert_eq!(patch.vendor_name.as_deref(), Some("Dell"));
        assert!(patch.notes.is_none());
    }

    #[test]
    fn test_empty_string_is_not_provided() {
        let raw = row(json!({"tag": "A1", "cost": "", "notes": "  "}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert_eq!(patch.cost, None);
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn test_null_is_not_provided() {
        let raw = row(json!({"tag": "A1", "serial": null}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert!(patch.serial.is_none());
        assert!(patch.has_identity());
    }

    #[test]
    fn test_numeric_cost_accepted() {
        let raw = row(json!({"tag": "A1", "cost": 149.5}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert_eq!(patch.cost, Some(149.5));
    }

    #[test]
    fn test_invalid_cost_is_row_error() {
        let raw = row(json!({"tag": "A1", "cost": "abc"}));
        let err = project_row(4, &raw, &identity()).unwrap_err();
        assert_eq!(err.row, 4);
        assert_eq!(err.to_string(), "Row 4: invalid cost value 'abc'");
    }

    #[test]
    fn test_no_identity_when_tag_and_serial_absent() {
        let raw = row(json!({"notes": "spare cable"}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert!(!patch.has_identity());
    }

    #[test]
    fn test_dates_pass_through_untyped() {
        let raw = row(json!({"tag": "A1", "warranty_end": "2027-01-31", "purchase_date": "bogus"}));
        let patch = project_row(1, &raw, &identity()).unwrap();
        assert_eq!(patch.warranty_end.as_deref(), Some("2027-01-31"));
        // Not validated here; the storage layer rejects it at write time.
        assert_eq!(patch.purchase_date.as_deref(), Some("bogus"));
    }
}
