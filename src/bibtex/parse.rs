//! Adapter from `biblatex` entries to [`Entry`].
//!
//! Field values are flattened back to BibTeX text: brace groups stay braced,
//! math stays between dollars and the dashes and ties the parser resolved are
//! written out again. Fields holding URLs and identifiers are verbatim and are
//! copied as they are.

use crate::{Entry, EntryType, ReviseError};
use biblatex::{Bibliography, Chunk, Spanned};

/// Fields `biblatex` reads verbatim; their single chunk carries no braces.
const VERBATIM_FIELDS: [&str; 5] = ["doi", "eprint", "file", "pdf", "url"];

/// Parse the content of a BibTeX file into entries, in file order.
pub(crate) fn bibtex_parse(text: &str) -> Result<Vec<Entry>, ReviseError> {
    let source = blank_comment_lines(text);
    let bibliography = Bibliography::parse(&source).map_err(|err| ReviseError::Syntax {
        line: line_of(&source, err.span.start),
        message: err.to_string(),
    })?;

    Ok(bibliography.iter().map(convert_entry).collect())
}

fn convert_entry(source: &biblatex::Entry) -> Entry {
    let mut entry = Entry::new(
        EntryType::from_name(&source.entry_type.to_string()),
        source.key.clone(),
    );
    for (name, chunks) in &source.fields {
        let name = name.to_lowercase();
        let value = if VERBATIM_FIELDS.contains(&name.as_str()) {
            flatten_verbatim(chunks)
        } else {
            flatten(chunks)
        };
        entry.set(&name, value);
    }
    entry
}

fn flatten(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|chunk| match &chunk.v {
            Chunk::Normal(s) => restore_ligatures(s),
            Chunk::Verbatim(s) => format!("{{{}}}", s),
            Chunk::Math(s) => format!("${}$", s),
        })
        .collect()
}

fn flatten_verbatim(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|chunk| match &chunk.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => s.clone(),
            Chunk::Math(s) => format!("${}$", s),
        })
        .collect()
}

/// Writes en/em dashes and non-breaking spaces back as `--`, `---` and `~`.
fn restore_ligatures(text: &str) -> String {
    text.replace('\u{2014}', "---")
        .replace('\u{2013}', "--")
        .replace('\u{a0}', "~")
}

/// Empties `%` comment lines, keeping the line count. An `@` in a comment,
/// such as a maintainer's e-mail address, is not an entry.
fn blank_comment_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim_start().starts_with('%') {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 1-based line of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
