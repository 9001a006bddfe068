//! Mapping advisor: proposes source-column to canonical-field mappings.
//!
//! The suggestion is advisory only. Callers may override any or all entries
//! before committing a batch, and an unmapped header is simply absent from
//! the returned map.

use std::collections::HashMap;

/// Canonical asset fields and their synonym substrings, in declaration order.
///
/// For each header, the first canonical field whose synonym list matches
/// wins; a match is the header containing a synonym or a synonym containing
/// the header (both lower-cased). Ties are never revisited.
pub const FIELD_SYNONYMS: &[(&str, &[&str])] = &[
    ("tag", &["tag", "asset tag", "asset_tag", "id", "asset id"]),
    (
        "serial",
        &["serial", "serial number", "serial_number", "sn", "service tag"],
    ),
    ("model", &["model", "device model", "product"]),
    (
        "vendor",
        &["vendor", "manufacturer", "make", "supplier", "brand"],
    ),
    ("location", &["location", "site", "office", "building"]),
    ("status", &["status", "state", "condition"]),
    ("cost", &["cost", "price", "purchase price", "amount"]),
    (
        "purchase_date",
        &["purchase date", "purchase_date", "purchased", "acquired"],
    ),
    (
        "warranty_end",
        &[
            "warranty end",
            "warranty_end",
            "warranty expiry",
            "warranty expiration",
            "warranty",
        ],
    ),
    ("po_number", &["po number", "po_number", "purchase order", "po"]),
    ("notes", &["notes", "note", "comments", "remarks", "description"]),
];

/// Canonical field names in declaration order.
pub fn canonical_fields() -> Vec<&'static str> {
    FIELD_SYNONYMS.iter().map(|(field, _)| *field).collect()
}

/// Suggest a mapping from source header to canonical field name.
///
/// Headers that match no synonym are omitted. Never fails.
pub fn suggest_mapping(headers: &[String]) -> HashMap<String, String> {
    let mut mapping = HashMap::new();

    for header in headers {
        let normalized = header.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        for (field, synonyms) in FIELD_SYNONYMS {
            let matched = synonyms
                .iter()
                .any(|syn| normalized.contains(syn) || syn.contains(normalized.as_str()));
            if matched {
                mapping.insert(header.clone(), (*field).to_string());
                break;
            }
        }
    }

    mapping
}

/// Identity mapping over the canonical fields.
///
/// Used when a batch is executed without an explicit field mapping: rows
/// already keyed by canonical field names pass through unchanged.
pub fn identity_mapping() -> HashMap<String, String> {
    canonical_fields()
        .into_iter()
        .map(|f| (f.to_string(), f.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest(headers: &[&str]) -> HashMap<String, String> {
        let owned: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        suggest_mapping(&owned)
    }

    #[test]
    fn test_asset_tag_maps_to_tag() {
        let mapping = suggest(&["Asset Tag"]);
        assert_eq!(mapping.get("Asset Tag").map(String::as_str), Some("tag"));
    }

    #[test]
    fn test_exact_canonical_names_map_to_themselves() {
        let mapping = suggest(&["tag", "serial", "vendor", "location", "status", "cost"]);
        for (header, field) in &mapping {
            assert_eq!(header, field);
        }
        assert_eq!(mapping.len(), 6);
    }

    #[test]
    fn test_synonym_variants() {
        let mapping = suggest(&[
            "Serial Number",
            "Manufacturer",
            "Site",
            "Purchase Price",
            "Warranty Expiry",
            "PO Number",
            "Comments",
        ]);
        assert_eq!(mapping["Serial Number"], "serial");
        assert_eq!(mapping["Manufacturer"], "vendor");
        assert_eq!(mapping["Site"], "location");
        assert_eq!(mapping["Purchase Price"], "cost");
        assert_eq!(mapping["Warranty Expiry"], "warranty_end");
        assert_eq!(mapping["PO Number"], "po_number");
        assert_eq!(mapping["Comments"], "notes");
    }

    #[test]
    fn test_unrecognized_header_omitted() {
        let mapping = suggest(&["foo_bar"]);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_first_match_wins_in_declaration_order() {
        // "id" is a tag synonym; "asset id" must resolve to tag, not be
        // shadowed by later fields.
        let mapping = suggest(&["Asset ID"]);
        assert_eq!(mapping["Asset ID"], "tag");
    }

    #[test]
    fn test_empty_header_skipped() {
        let mapping = suggest(&["", "  "]);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_identity_mapping_covers_all_canonical_fields() {
        let identity = identity_mapping();
        for field in canonical_fields() {
            assert_eq!(identity.get(field).map(String::as_str), Some(field));
        }
    }
}
