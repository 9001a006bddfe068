//! Tabular ingestor: parses delimited text into a header row and row maps.
//!
//! Known limitation: values are split on plain commas. Quoting and escaping
//! are not supported, so delimiters inside values will split the value.

use std::collections::HashMap;

use crate::error::CoreError;

/// A parsed delimited-text table.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Trimmed, lower-cased header cells in source order.
    pub headers: Vec<String>,
    /// One map per data line, keyed by header. Missing trailing cells are
    /// present with an empty-string value.
    pub rows: Vec<HashMap<String, String>>,
}

/// Parse raw delimited text into headers and rows.
///
/// Blank (whitespace-only) lines are discarded before any other processing.
/// Fails with [`CoreError::MalformedInput`] when fewer than 2 non-blank
/// lines remain (a header line plus at least one data line).
pub fn parse_delimited(raw: &str) -> Result<ParsedTable, CoreError> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(CoreError::MalformedInput(
            "Input must contain a header line and at least one data line".to_string(),
        ));
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let rows: Vec<HashMap<String, String>> = lines[1..]
        .iter()
        .map(|line| {
            let cells: Vec<&str> = line.split(',').collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = cells.get(i).map(|c| c.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    Ok(ParsedTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_basic_table() {
        let table = parse_delimited("Tag,Serial,Cost\nA1,S1,100\nA2,S2,200").unwrap();
        assert_eq!(table.headers, vec!["tag", "serial", "cost"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["tag"], "A1");
        assert_eq!(table.rows[1]["cost"], "200");
    }

    #[test]
    fn test_headers_trimmed_and_lowercased() {
        let table = parse_delimited(" Asset Tag , SERIAL \nA1,S1").unwrap();
        assert_eq!(table.headers, vec!["asset tag", "serial"]);
    }

    #[test]
    fn test_blank_lines_discarded() {
        let table = parse_delimited("tag,serial\n\n  \nA1,S1\n\n").unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse_delimited("tag,serial\r\nA1,S1\r\n").unwrap();
        assert_eq!(table.headers, vec!["tag", "serial"]);
        assert_eq!(table.rows[0]["serial"], "S1");
    }

    #[test]
    fn test_missing_trailing_values_default_to_empty() {
        let table = parse_delimited("tag,serial,cost\nA1").unwrap();
        assert_eq!(table.rows[0]["tag"], "A1");
        assert_eq!(table.rows[0]["serial"], "");
        assert_eq!(table.rows[0]["cost"], "");
    }

    #[test]
    fn test_extra_cells_ignored() {
        let table = parse_delimited("tag,serial\nA1,S1,garbage,more").unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_header_only_is_malformed() {
        assert_matches!(
            parse_delimited("tag,serial\n"),
            Err(CoreError::MalformedInput(_))
        );
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert_matches!(parse_delimited(""), Err(CoreError::MalformedInput(_)));
        assert_matches!(parse_delimited("\n\n  \n"), Err(CoreError::MalformedInput(_)));
    }
}
