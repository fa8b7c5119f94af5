//! BibTeX serialization.

use crate::{Entry, Result};
use std::path::Path;

/// Writes entries back to BibTeX text.
#[derive(Debug, Default, Clone)]
pub struct BibtexWriter {
    single_brace: bool,
}

impl BibtexWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write brace-protected titles with one brace layer (`title = {X}`)
    /// instead of two (`title = {{X}}`).
    #[must_use]
    pub fn with_single_brace(mut self, single_brace: bool) -> Self {
        self.single_brace = single_brace;
        self
    }

    /// Serializes entries in order, fields in stored order.
    pub fn write(&self, entries: &[Entry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&format!("@{}{{{},\n", entry.entry_type, entry.id));
            let fields: Vec<String> = entry
                .fields()
                .map(|(name, value)| format!(" {} = {{{}}}", name, self.field_value(name, value)))
                .collect();
            if !fields.is_empty() {
                out.push_str(&fields.join(",\n"));
                out.push('\n');
            }
            out.push_str("}\n\n");
        }
        out
    }

    /// Serializes entries into `path`, replacing its content.
    ///
    /// # Errors
    ///
    /// Returns `ReviseError::Io` if the file cannot be written.
    pub fn write_file(&self, entries: &[Entry], path: &Path) -> Result<()> {
        std::fs::write(path, self.write(entries))?;
        Ok(())
    }

    fn field_value<'v>(&self, name: &str, value: &'v str) -> &'v str {
        if self.single_brace && name == "title" {
            if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
                return inner;
            }
        }
        value
    }
}

/// Serializes entries with the default writer.
pub fn to_bibtex(entries: &[Entry]) -> String {
    BibtexWriter::new().write(entries)
}

/// Formats one entry for display, with `title` and `author` first.
pub fn format_entry(entry: &Entry) -> String {
    let leading = ["title", "author"];
    let lines: Vec<String> = leading
        .iter()
        .filter_map(|&name| entry.get(name).map(|value| (name, value)))
        .chain(entry.fields().filter(|(name, _)| !leading.iter().any(|l| l == name)))
        .map(|(name, value)| format!("    {}={{{}}}", name, value))
        .collect();
    format!("@{}{{{},\n{}\n}}\n", entry.entry_type, entry.id, lines.join(",\n"))
}
