//! Citation filtering.
//!
//! The compiled `.bbl` file of a paper lists one `\bibitem{key}` per reference
//! actually cited. Entries whose key is not in that list are dropped; cited keys
//! with no entry are reported at the end of a run.

use crate::regex::BIBITEM;
use crate::report::Reporter;
use crate::{Entry, Result};
use itertools::Itertools;
use std::path::Path;

/// Set of cited keys, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationSet {
    ids: Vec<String>,
}

impl CitationSet {
    /// Extracts every `\bibitem{key}` marker from compiled bibliography text.
    /// Repeated keys are kept once.
    pub fn from_bbl(text: &str) -> Self {
        let ids = BIBITEM
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .unique()
            .collect();
        Self { ids }
    }

    /// Reads a `.bbl` file and extracts its cited keys.
    ///
    /// # Errors
    ///
    /// Returns `ReviseError::Io` if the file cannot be read.
    pub fn from_bbl_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_bbl(&text))
    }

    /// Treats every entry as cited, which makes filtering a no-op.
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            ids: entries.iter().map(|e| e.id.clone()).unique().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|cited| cited == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Cited keys that have no matching entry.
    pub fn missing(&self, entries: &[Entry]) -> Vec<&str> {
        self.iter()
            .filter(|id| !entries.iter().any(|e| e.id == *id))
            .collect()
    }
}

/// Result of filtering an entry set against the cited keys.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Cited entries, in their original order
    pub retained: Vec<Entry>,
    /// Keys of entries that are not cited
    pub dropped: Vec<String>,
}

/// Keeps the entries whose key is cited. In verbose mode every dropped entry is reported.
pub fn filter_entries(
    entries: Vec<Entry>,
    cited: &CitationSet,
    verbose: bool,
    reporter: &mut dyn Reporter,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for entry in entries {
        if cited.contains(&entry.id) {
            outcome.retained.push(entry);
        } else {
            if verbose {
                reporter.info(&format!(
                    "skipping {}, because it is not in the bbl file, it is probably not cited..",
                    entry.id
                ));
            }
            outcome.dropped.push(entry.id);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RecordingReporter, Severity};
    use crate::EntryType;
    use pretty_assertions::assert_eq;

    const BBL: &str = r"\begin{thebibliography}{10}

\bibitem{a}
A.~Author.
\newblock First.

\bibitem{b}
B.~Author.
\newblock Second, see also \bibitem{a}.

\end{thebibliography}";

    fn entries(ids: &[&str]) -> Vec<Entry> {
        ids.iter()
            .map(|id| Entry::new(EntryType::Misc, *id))
            .collect()
    }

    #[test]
    fn test_from_bbl_collapses_duplicates() {
        let cited = CitationSet::from_bbl(BBL);
        assert_eq!(cited.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(cited.len(), 2);
    }

    #[test]
    fn test_from_bbl_without_markers() {
        assert!(CitationSet::from_bbl("no citations here").is_empty());
    }

    #[test]
    fn test_filter_drops_uncited() {
        let cited = CitationSet::from_bbl(BBL);
        let mut reporter = RecordingReporter::new();
        let outcome = filter_entries(entries(&["a", "b", "c"]), &cited, true, &mut reporter);

        let kept: Vec<_> = outcome.retained.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(kept, vec!["a", "b"]);
        assert_eq!(outcome.dropped, vec!["c"]);
        assert!(reporter.contains(Severity::Info, "skipping c"));
    }

    #[test]
    fn test_filter_is_quiet_without_verbose() {
        let cited = CitationSet::from_bbl(BBL);
        let mut reporter = RecordingReporter::new();
        filter_entries(entries(&["a", "c"]), &cited, false, &mut reporter);
        assert!(reporter.messages.is_empty());
    }

    #[test]
    fn test_missing_cited_keys() {
        let cited = CitationSet::from_bbl(r"\bibitem{a} \bibitem{b} \bibitem{d}");
        let retained = entries(&["a", "b"]);
        assert_eq!(cited.missing(&retained), vec!["d"]);
    }

    #[test]
    fn test_all_entries_cited_without_bbl() {
        let all = entries(&["x", "y"]);
        let cited = CitationSet::from_entries(&all);
        let mut reporter = RecordingReporter::new();
        let outcome = filter_entries(all, &cited, true, &mut reporter);

        assert_eq!(outcome.retained.len(), 2);
        assert!(outcome.dropped.is_empty());
        assert!(cited.missing(&outcome.retained).is_empty());
    }
}
