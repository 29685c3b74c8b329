//! # Result Store
//!
//! Generated sections keyed by section tag. Iteration and export follow the
//! lexicographic order of the tags, which puts "Section 1.0 ..." through
//! "Section 6.0 ..." in manual order.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Placed between sections in the exported document.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

const HEADING_PREFIX: &str = "## ";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Export is empty.")]
    EmptyExport,
    #[error("Section {0} does not start with a '## ' heading.")]
    MissingHeading(usize),
    #[error("Section '{0}' has no body separator after its heading.")]
    MissingBody(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultStore {
    sections: BTreeMap<String, String>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the text for a section, replacing any earlier text.
    pub fn record(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.sections.insert(tag.into(), text.into());
    }

    /// Replaces a section's text verbatim with the user's edit.
    ///
    /// Returns `false` if the section has not been generated yet.
    pub fn edit(&mut self, tag: &str, text: impl Into<String>) -> bool {
        match self.sections.get_mut(tag) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.sections.get(tag).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .map(|(tag, text)| (tag.as_str(), text.as_str()))
    }

    pub fn tags(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Renders every section as `## {tag}\n\n{text}`, joined by [`SECTION_SEPARATOR`].
    pub fn export_markdown(&self) -> String {
        self.iter()
            .map(|(tag, text)| format!("{HEADING_PREFIX}{tag}\n\n{text}"))
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }
}

/// Splits an exported document back into its sections.
///
/// A section body that itself contains `\n\n---\n\n## ` cannot be told apart
/// from a section boundary.
pub fn parse_export(markdown: &str) -> Result<ResultStore, StoreError> {
    if markdown.is_empty() {
        return Err(StoreError::EmptyExport);
    }

    let boundary = format!("{SECTION_SEPARATOR}{HEADING_PREFIX}");
    let mut store = ResultStore::new();

    for (index, chunk) in markdown.split(boundary.as_str()).enumerate() {
        let block = if index == 0 {
            chunk
                .strip_prefix(HEADING_PREFIX)
                .ok_or(StoreError::MissingHeading(index))?
        } else {
            chunk
        };
        let (tag, text) = block
            .split_once("\n\n")
            .ok_or_else(|| StoreError::MissingBody(block.lines().next().unwrap_or_default().to_string()))?;
        store.record(tag, text);
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_is_in_tag_order() {
        let mut store = ResultStore::new();
        store.record("Section 3.0: Three", "c");
        store.record("Section 1.0: One", "a");
        store.record("Section 2.0: Two", "b");

        assert_eq!(
            store.export_markdown(),
            "## Section 1.0: One\n\na\n\n---\n\n## Section 2.0: Two\n\nb\n\n---\n\n## Section 3.0: Three\n\nc"
        );
    }

    #[test]
    fn test_edit_requires_existing_section() {
        let mut store = ResultStore::new();
        assert!(!store.edit("Section 1.0: One", "text"));
        store.record("Section 1.0: One", "draft");
        assert!(store.edit("Section 1.0: One", "  final\n"));
        assert_eq!(store.get("Section 1.0: One"), Some("  final\n"));
    }

    #[test]
    fn test_parse_export_errors() {
        assert_eq!(parse_export(""), Err(StoreError::EmptyExport));
        assert_eq!(
            parse_export("Section 1.0\n\ntext"),
            Err(StoreError::MissingHeading(0))
        );
        assert!(matches!(
            parse_export("## Section 1.0 with no body"),
            Err(StoreError::MissingBody(_))
        ));
    }

    #[test]
    fn test_empty_store_exports_empty_string() {
        assert_eq!(ResultStore::new().export_markdown(), "");
    }
}
