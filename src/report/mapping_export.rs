//! Binary mapping export
//!
//! Writes `{column: {value: code}}` as pretty JSON. Columns and values are
//! emitted in sorted order so identical inputs yield identical documents.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::BinaryMapping;

/// Serialize the mappings to a pretty JSON string.
pub fn render_binary_mappings(mappings: &[BinaryMapping]) -> Result<String> {
    let document: BTreeMap<&str, BTreeMap<String, i32>> = mappings
        .iter()
        .map(|m| (m.column.as_str(), m.as_map()))
        .collect();

    serde_json::to_string_pretty(&document).context("Failed to serialize binary mappings to JSON")
}

/// Write the mapping document to `output_path`.
///
/// Nothing is written when `mappings` is empty; returns whether a file was written.
pub fn export_binary_mappings(mappings: &[BinaryMapping], output_path: &Path) -> Result<bool> {
    if mappings.is_empty() {
        return Ok(false);
    }

    let json = render_binary_mappings(mappings)?;
    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write binary mappings to {}",
            output_path.display()
        )
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(column: &str, zero: &str, one: &str) -> BinaryMapping {
        BinaryMapping {
            column: column.to_string(),
            zero: zero.to_string(),
            one: one.to_string(),
        }
    }

    #[test]
    fn test_render_sorted_document() {
        let json = render_binary_mappings(&[
            mapping("Smoking", "No", "Yes"),
            mapping("Sex", "Female", "Male"),
        ])
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["Smoking"]["No"], 0);
        assert_eq!(parsed["Smoking"]["Yes"], 1);
        assert_eq!(parsed["Sex"]["Female"], 0);
        assert!(json.find("\"Sex\"").unwrap() < json.find("\"Smoking\"").unwrap());
    }

    #[test]
    fn test_non_ascii_values_kept_verbatim() {
        let json = render_binary_mappings(&[mapping("Respuesta", "no", "sí")]).unwrap();
        assert!(json.contains("\"sí\": 1"));
    }

    #[test]
    fn test_empty_mappings_write_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mappings.json");

        assert!(!export_binary_mappings(&[], &path).unwrap());
        assert!(!path.exists());

        assert!(export_binary_mappings(&[mapping("a", "x", "y")], &path).unwrap());
        assert!(path.exists());
    }
}
