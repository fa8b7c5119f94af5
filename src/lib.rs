//! A library for revising the BibTeX entries a paper actually cites.
//!
//! `bibrevise` loads a `.bib` database, keeps only the entries cited by the
//! compiled paper (the `\bibitem{...}` markers of its `.bbl` file), normalizes
//! their fields and reports everything that looks inconsistent or missing.
//!
//! # Key Features
//!
//! - **Field rules**: title brace protection, author name checks with LaTeX
//!   escaping of accented letters, arXiv preprints, page ranges, US conference
//!   addresses and DOI/URL consolidation
//! - **Required fields**: per entry type, including year/publisher leakage and
//!   unexpanded `proc.` abbreviations
//! - **Citation filtering**: drops uncited entries and reports cited keys with no entry
//! - **Near-duplicate detection**: flags entries with almost identical titles
//!
//! # Basic Usage
//!
//! ```rust
//! use bibrevise::{BibParser, BibtexParser, Validator, ValidatorConfig};
//!
//! let input = r#"@inproceedings{smith2020,
//!   title = {a study of Things},
//!   author = {Smith, John and Doe, Jane},
//!   pages = {1 - 10},
//! }"#;
//!
//! let mut entries = BibtexParser::new().parse(input).unwrap();
//! let validator = Validator::with_config(ValidatorConfig::default());
//! let warnings = validator.validate_entry(&mut entries[0]);
//!
//! assert_eq!(entries[0].get("title"), Some("{a study of Things}"));
//! assert_eq!(entries[0].get("pages"), Some("1--10"));
//! assert!(!warnings.is_empty());
//! ```
//!
//! # Reporting
//!
//! Every component that talks to the user takes a [`report::Reporter`]. The
//! binary uses [`report::TracingReporter`]; tests and embedding code can collect
//! findings with [`report::RecordingReporter`].

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod bibtex;
pub mod citations;
pub mod dedupe;
#[cfg(feature = "cli")]
pub mod logging;
mod regex;
pub mod report;
pub mod required;
pub mod rules;
pub mod session;
pub mod states;
mod utils;
pub mod validate;

// Reexports
pub use bibtex::{BibtexParser, format_entry, resolve_crossrefs, to_bibtex};
pub use citations::{CitationSet, FilterOutcome, filter_entries};
pub use dedupe::{DuplicateDetector, DuplicatePair};
pub use report::{RecordingReporter, Reporter, Severity, TracingReporter};
pub use session::{ReviseConfig, Reviser, RunSummary};
pub use validate::{Validator, ValidatorConfig};

/// A specialized Result type for revision operations.
pub type Result<T> = std::result::Result<T, ReviseError>;

/// Errors that abort a run or a parse.
///
/// Validation findings are not errors; they are returned as warning strings.
#[derive(Error, Debug)]
pub enum ReviseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Invalid path for bib file \"{}\"", .0.display())]
    InvalidPath(PathBuf),

    #[error("Input and output files should be different, {}", .0.display())]
    SamePath(PathBuf),

    #[error("Error: {0}")]
    Other(String),
}

/// Entry types with a known set of required fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EntryType {
    InProceedings,
    Article,
    Book,
    InBook,
    Misc,
    PhdThesis,
    MasterThesis,
    /// Any other type, kept verbatim (lowercased)
    Other(String),
}

impl EntryType {
    /// Maps a BibTeX type name (case-insensitive) to an `EntryType`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "inproceedings" => EntryType::InProceedings,
            "article" => EntryType::Article,
            "book" => EntryType::Book,
            "inbook" => EntryType::InBook,
            "misc" => EntryType::Misc,
            "phdthesis" => EntryType::PhdThesis,
            "masterthesis" => EntryType::MasterThesis,
            other => EntryType::Other(other.to_string()),
        }
    }

    /// The lowercase BibTeX name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            EntryType::InProceedings => "inproceedings",
            EntryType::Article => "article",
            EntryType::Book => "book",
            EntryType::InBook => "inbook",
            EntryType::Misc => "misc",
            EntryType::PhdThesis => "phdthesis",
            EntryType::MasterThesis => "masterthesis",
            EntryType::Other(name) => name,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bibliography entry.
///
/// The type marker and identifier are always present; every other field is an
/// ordered `(name, value)` pair. Field names are lowercase, as produced by the
/// parser, and appear at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Type of the entry
    pub entry_type: EntryType,
    /// Citation key
    pub id: String,
    fields: Vec<(String, String)>,
}

impl Entry {
    /// Creates an entry without fields.
    pub fn new(entry_type: EntryType, id: impl Into<String>) -> Self {
        Self {
            entry_type,
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    /// Sets a field, keeping its position when it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => *current = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Keeps only the fields for which `keep(name, value)` returns true.
    pub fn retain_fields<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.fields.retain(|(key, value)| keep(key, value));
    }

    /// Fields in stored order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// The title with all braces removed, as used for literature searches.
    pub fn plain_title(&self) -> String {
        self.get("title")
            .unwrap_or_default()
            .replace(['{', '}'], "")
    }
}

/// Trait for implementing bibliography parsers.
pub trait BibParser {
    /// Parse a string containing zero or more entries.
    ///
    /// # Errors
    ///
    /// Returns `ReviseError::Syntax` if the input is malformed
    fn parse(&self, input: &str) -> Result<Vec<Entry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let error = ReviseError::Syntax {
            line: 3,
            message: "expected '='".to_string(),
        };
        assert_eq!(error.to_string(), "Syntax error at line 3: expected '='");

        let error = ReviseError::SamePath(PathBuf::from("refs.bib"));
        assert_eq!(
            error.to_string(),
            "Input and output files should be different, refs.bib"
        );
    }

    #[test]
    fn test_entry_type_names() {
        assert_eq!(EntryType::from_name("InProceedings"), EntryType::InProceedings);
        assert_eq!(EntryType::from_name("phdthesis").as_str(), "phdthesis");
        assert_eq!(
            EntryType::from_name("TechReport"),
            EntryType::Other("techreport".to_string())
        );
    }

    #[test]
    fn test_entry_field_order() {
        let mut entry = Entry::new(EntryType::Article, "a")
            .with_field("title", "T")
            .with_field("year", "2020");
        entry.set("title", "U");
        entry.set("pages", "1--2");

        let names: Vec<_> = entry.field_names().collect();
        assert_eq!(names, vec!["title", "year", "pages"]);
        assert_eq!(entry.get("title"), Some("U"));

        assert_eq!(entry.remove("year"), Some("2020".to_string()));
        assert_eq!(entry.remove("year"), None);
        assert!(!entry.contains("year"));
    }

    #[test]
    fn test_plain_title() {
        let entry = Entry::new(EntryType::Misc, "m").with_field("title", "{The {GPU} Book}");
        assert_eq!(entry.plain_title(), "The GPU Book");
    }
}
