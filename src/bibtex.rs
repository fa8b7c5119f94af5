//! BibTeX reading and writing.
//!
//! Converts `.bib` text into [`Entry`] values and back. Parsing is done by
//! `biblatex`: `@string` abbreviations are expanded, `@comment` and `@preamble`
//! blocks are dropped and the fields of an entry come out in name order.
//!
//! # Example
//!
//! ```
//! use bibrevise::{BibParser, BibtexParser, to_bibtex};
//!
//! let input = r#"@Article{doe2020,
//!   Title = "Deep {GPU} Learning",
//!   year = 2020
//! }"#;
//!
//! let entries = BibtexParser::new().parse(input).unwrap();
//! assert_eq!(entries[0].id, "doe2020");
//! assert_eq!(entries[0].get("title"), Some("Deep {GPU} Learning"));
//!
//! let output = to_bibtex(&entries);
//! assert!(output.starts_with("@article{doe2020,\n"));
//! ```

mod parse;
mod write;

use crate::{BibParser, Entry, Result};
use parse::bibtex_parse;
use std::path::Path;

pub use write::{BibtexWriter, format_entry, to_bibtex};

/// Parser for BibTeX databases.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser;

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses a `.bib` file.
    ///
    /// # Errors
    ///
    /// Returns `ReviseError::Io` if the file cannot be read and
    /// `ReviseError::Syntax` if it is malformed.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Entry>> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }
}

/// Copies the fields an entry lacks, or has empty, from the entry its
/// `crossref` field names.
///
/// Only entries inside `entries` can be parents. Returns `(key, parent key)` for
/// every cross-reference whose parent is missing.
pub fn resolve_crossrefs(entries: &mut [Entry]) -> Vec<(String, String)> {
    let mut unresolved = Vec::new();

    for i in 0..entries.len() {
        let Some(parent_id) = entries[i].get("crossref").map(str::to_string) else {
            continue;
        };
        let Some(parent) = entries.iter().find(|e| e.id == parent_id).cloned() else {
            unresolved.push((entries[i].id.clone(), parent_id));
            continue;
        };
        for (name, value) in parent.fields() {
            if name != "crossref" && entries[i].get(name).is_none_or(str::is_empty) {
                entries[i].set(name, value);
            }
        }
    }

    unresolved
}

impl BibParser for BibtexParser {
    fn parse(&self, input: &str) -> Result<Vec<Entry>> {
        let entries = bibtex_parse(input)?;
        tracing::debug!(count = entries.len(), "parsed bibtex entries");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_then_write_keeps_fields() {
        let input = "@inproceedings{a,\n  title = {{A Study}},\n  pages = {1--2}\n}\n";
        let entries = BibtexParser::new().parse(input).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::InProceedings);
        assert_eq!(to_bibtex(&entries), "@inproceedings{a,\n pages = {1--2},\n title = {{A Study}}\n}\n\n");
    }

    #[test]
    fn test_crossref_fills_missing_fields() {
        let mut entries = vec![
            Entry::new(EntryType::InProceedings, "paper")
                .with_field("title", "A Paper")
                .with_field("year", "")
                .with_field("crossref", "proc"),
            Entry::new(EntryType::Misc, "proc")
                .with_field("title", "The Proceedings")
                .with_field("booktitle", "Proc. of Things")
                .with_field("year", "2021"),
        ];
        let unresolved = resolve_crossrefs(&mut entries);

        assert!(unresolved.is_empty());
        assert_eq!(entries[0].get("title"), Some("A Paper"));
        assert_eq!(entries[0].get("booktitle"), Some("Proc. of Things"));
        assert_eq!(entries[0].get("year"), Some("2021"));
    }

    #[test]
    fn test_crossref_to_missing_parent() {
        let mut entries =
            vec![Entry::new(EntryType::Article, "orphan").with_field("crossref", "gone")];
        assert_eq!(
            resolve_crossrefs(&mut entries),
            vec![("orphan".to_string(), "gone".to_string())]
        );
        assert_eq!(entries[0].fields().count(), 1);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = BibtexParser::new().parse_file(Path::new("/nonexistent/refs.bib"));
        assert!(matches!(result, Err(crate::ReviseError::Io(_))));
    }
}
