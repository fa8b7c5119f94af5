//! One revision run over a bibliography.
//!
//! The run loads the `.bib` file, keeps the entries cited by the paper, validates
//! each of them in place and reports what it found. It then fills fields from
//! `crossref` parents, looks for near-duplicates and finally writes the cleaned
//! entries when an output path is given.
//!
//! Configuration problems (missing bib file, output equal to input) abort the run
//! before any entry is touched. Everything else is reported and the run goes on.
//!
//! # Example
//!
//! ```no_run
//! use bibrevise::session::NoPause;
//! use bibrevise::{RecordingReporter, ReviseConfig, Reviser};
//!
//! let config = ReviseConfig::new("references.bib")
//!     .with_cited_path(Some("paper.bbl".into()))
//!     .with_out_path(Some("references.clean.bib".into()))
//!     .with_skip(true);
//!
//! let mut reporter = RecordingReporter::new();
//! let summary = Reviser::new(config).run(&mut reporter, &mut NoPause).unwrap();
//! println!("{} entries kept", summary.retained.len());
//! ```

use crate::bibtex::{BibtexParser, BibtexWriter, format_entry, resolve_crossrefs};
use crate::citations::{CitationSet, filter_entries};
use crate::dedupe::{DuplicateDetector, DuplicatePair};
use crate::report::Reporter;
use crate::validate::{Validator, ValidatorConfig};
use crate::{Entry, Result, ReviseError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

const SCHOLAR_SEARCH_URL: &str = "https://scholar.google.com/scholar?q=";
const IEEE_SEARCH_URL: &str =
    "https://ieeexplore.ieee.org/search/searchresult.jsp?newsearch=true&queryText=";

/// Blocking gate between a flagged entry and the next one.
pub trait Pause {
    fn wait(&mut self);
}

/// Waits for the user to press Enter.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPause;

impl Pause for StdinPause {
    fn wait(&mut self) {
        let mut line = String::new();
        if let Err(err) = std::io::stdin().lock().read_line(&mut line) {
            tracing::debug!(%err, "could not read confirmation from stdin");
        }
    }
}

/// Never blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

impl Pause for NoPause {
    fn wait(&mut self) {}
}

/// Options for one run.
#[derive(Debug, Clone)]
pub struct ReviseConfig {
    /// The `.bib` file to revise
    pub bib_path: PathBuf,
    /// The compiled `.bbl` file listing cited keys
    pub cited_path: Option<PathBuf>,
    /// Where to write the cleaned entries; must differ from `bib_path`
    pub out_path: Option<PathBuf>,
    /// Prune empty and non-required fields
    pub force: bool,
    /// Do not wait for confirmation after flagged entries
    pub skip: bool,
    /// Also report entries without warnings and dropped entries
    pub verbose: bool,
    /// Consolidate `doi`/`url` fields
    pub force_doi: bool,
    /// Write titles with a single brace layer
    pub single_brace: bool,
    /// Restore the `note` field after validation
    pub preserve_note: bool,
}

impl ReviseConfig {
    pub fn new(bib_path: impl Into<PathBuf>) -> Self {
        Self {
            bib_path: bib_path.into(),
            cited_path: None,
            out_path: None,
            force: true,
            skip: false,
            verbose: false,
            force_doi: false,
            single_brace: false,
            preserve_note: true,
        }
    }

    #[must_use]
    pub fn with_cited_path(mut self, path: Option<PathBuf>) -> Self {
        self.cited_path = path;
        self
    }

    #[must_use]
    pub fn with_out_path(mut self, path: Option<PathBuf>) -> Self {
        self.out_path = path;
        self
    }

    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_force_doi(mut self, force_doi: bool) -> Self {
        self.force_doi = force_doi;
        self
    }

    #[must_use]
    pub fn with_single_brace(mut self, single_brace: bool) -> Self {
        self.single_brace = single_brace;
        self
    }

    #[must_use]
    pub fn with_preserve_note(mut self, preserve_note: bool) -> Self {
        self.preserve_note = preserve_note;
        self
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Cited entries after validation, in file order
    pub retained: Vec<Entry>,
    /// Keys of uncited entries
    pub dropped: Vec<String>,
    /// Cited keys with no entry in the bib file
    pub missing: Vec<String>,
    pub duplicates: Vec<DuplicatePair>,
    /// Warnings of every flagged entry
    pub warnings_by_id: BTreeMap<String, Vec<String>>,
}

/// Drives a revision run.
#[derive(Debug, Clone)]
pub struct Reviser {
    config: ReviseConfig,
}

impl Reviser {
    pub fn new(config: ReviseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReviseConfig {
        &self.config
    }

    /// Runs the whole revision.
    ///
    /// # Errors
    ///
    /// - `ReviseError::InvalidPath` if the bib file does not exist
    /// - `ReviseError::SamePath` if the output path is the input path
    /// - `ReviseError::Io` / `ReviseError::Syntax` if reading, parsing or writing fails
    pub fn run(&self, reporter: &mut dyn Reporter, pause: &mut dyn Pause) -> Result<RunSummary> {
        let config = &self.config;
        let bbl_path = self.check_paths(reporter)?;

        let entries = BibtexParser::new().parse_file(&config.bib_path)?;
        reporter.info(&format!("loaded \"{}\" ...", config.bib_path.display()));

        let cited = match bbl_path {
            Some(path) => {
                let cited = CitationSet::from_bbl_file(path)?;
                reporter.info(&format!("{} bibitems are to be found...", cited.len()));
                cited
            }
            None => CitationSet::from_entries(&entries),
        };
        let total = cited.len();

        let outcome = filter_entries(entries, &cited, config.verbose, reporter);
        let mut summary = RunSummary {
            dropped: outcome.dropped,
            ..Default::default()
        };
        let mut retained = outcome.retained;

        let validator = Validator::with_config(ValidatorConfig {
            force: config.force,
            force_doi: config.force_doi,
        });
        for (done, entry) in retained.iter_mut().enumerate() {
            let note = entry.get("note").map(str::to_string);
            let warnings = validator.validate_entry(entry);

            if !warnings.is_empty() {
                for warning in &warnings {
                    reporter.warning(warning);
                }
                reporter.print(&format_entry(entry));
                reporter.info(&format!("{}/{} done..", done, total));
                if !config.skip {
                    self.ask_for_review(entry, reporter, pause);
                }
                summary.warnings_by_id.insert(entry.id.clone(), warnings);
            } else if config.verbose {
                reporter.info(&format!("{}/{} done..", done, total));
                reporter.info("Looks good...");
                reporter.print(&format_entry(entry));
            }

            if let Some(note) = note.filter(|_| config.preserve_note) {
                entry.set("note", note);
            }
        }
        reporter.info(&format!("{}/{} done..", retained.len(), total));

        for (id, parent) in resolve_crossrefs(&mut retained) {
            reporter.error(&format!("Crossref reference {} for {} is missing.", parent, id));
        }

        summary.duplicates = DuplicateDetector::new().find_duplicates(&retained);
        for pair in &summary.duplicates {
            reporter.warning(&format!(
                "{} and {} seem to be the same citation, with different IDs",
                pair.first, pair.second
            ));
        }

        summary.missing = cited
            .missing(&retained)
            .into_iter()
            .map(str::to_string)
            .collect();
        if summary.missing.is_empty() {
            reporter.info(&format!(
                "{} bibitems processed in total, these should match the number of citations in your paper",
                total
            ));
        } else {
            let ids: Vec<String> = summary.missing.iter().map(|id| format!("\"{}\"", id)).collect();
            reporter.critical(&format!(
                "Some bib-items that are in your paper are not parsed correctly. The following IDs are not found: {}",
                ids.join(",")
            ));
        }

        if let Some(out_path) = &config.out_path {
            BibtexWriter::new()
                .with_single_brace(config.single_brace)
                .write_file(&retained, out_path)?;
            reporter.info(&format!("{} saved...", out_path.display()));
        }

        summary.retained = retained;
        Ok(summary)
    }

    /// Validates the configured paths and returns the usable `.bbl` path, if any.
    fn check_paths(&self, reporter: &mut dyn Reporter) -> Result<Option<&Path>> {
        let config = &self.config;

        if !config.bib_path.is_file() {
            let err = ReviseError::InvalidPath(config.bib_path.clone());
            reporter.error(&err.to_string());
            return Err(err);
        }

        let bbl_path = match &config.cited_path {
            None => {
                reporter.critical("bbl_path is not provided, it is very recommended to provide one");
                None
            }
            Some(path) if !path.is_file() => {
                reporter.error(&format!("Invalid path for bbl file \"{}\"", path.display()));
                None
            }
            Some(path) => Some(path.as_path()),
        };

        if let Some(out_path) = &config.out_path {
            if same_file(out_path, &config.bib_path) {
                let err = ReviseError::SamePath(config.bib_path.clone());
                reporter.error(&err.to_string());
                return Err(err);
            }
        }

        Ok(bbl_path)
    }

    /// Prints literature-search links for a flagged entry and waits for the user.
    fn ask_for_review(&self, entry: &Entry, reporter: &mut dyn Reporter, pause: &mut dyn Pause) {
        let query = urlencoding::encode(&entry.plain_title()).into_owned();
        reporter.print(&format!("{}{}", SCHOLAR_SEARCH_URL, query));
        reporter.print(&format!("{}{}", IEEE_SEARCH_URL, query));
        reporter.print("\n[Check the entry above... press enter to continue..]\n");
        pause.wait();
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{RecordingReporter, Severity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct CountingPause(usize);

    impl Pause for CountingPause {
        fn wait(&mut self) {
            self.0 += 1;
        }
    }

    fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const BIB: &str = r#"@book{good,
  title = {The Art of Computer Programming},
  author = {Knuth, Donald},
  year = {1968},
  publisher = {Addison-Wesley},
  note = {Volume 1},
}

@book{bad,
  title = {Some Book},
  author = {J. Smith},
  year = {2001},
  publisher = {Pub},
}
"#;

    #[test]
    fn test_missing_bib_file_aborts() {
        let mut reporter = RecordingReporter::new();
        let config = ReviseConfig::new("/nonexistent/refs.bib");
        let result = Reviser::new(config).run(&mut reporter, &mut NoPause);

        assert!(matches!(result, Err(ReviseError::InvalidPath(_))));
        assert!(reporter.contains(Severity::Error, "Invalid path for bib file"));
    }

    #[test]
    fn test_same_input_and_output_aborts() {
        let bib = create_temp_file(BIB, ".bib");
        let mut reporter = RecordingReporter::new();
        let config = ReviseConfig::new(bib.path()).with_out_path(Some(bib.path().to_path_buf()));
        let result = Reviser::new(config).run(&mut reporter, &mut NoPause);

        assert!(matches!(result, Err(ReviseError::SamePath(_))));
        // nothing was processed
        assert!(!reporter.contains(Severity::Info, "loaded"));
    }

    #[test]
    fn test_pause_once_per_flagged_entry() {
        let bib = create_temp_file(BIB, ".bib");
        let mut reporter = RecordingReporter::new();
        let mut pause = CountingPause(0);
        let summary = Reviser::new(ReviseConfig::new(bib.path()))
            .run(&mut reporter, &mut pause)
            .unwrap();

        assert_eq!(pause.0, 1);
        assert_eq!(summary.warnings_by_id.keys().collect::<Vec<_>>(), vec!["bad"]);
        assert!(reporter.contains(Severity::Critical, "bbl_path is not provided"));
        assert!(reporter.contains(
            Severity::Print,
            "https://scholar.google.com/scholar?q=Some%20Book"
        ));
    }

    #[test]
    fn test_skip_never_pauses() {
        let bib = create_temp_file(BIB, ".bib");
        let mut reporter = RecordingReporter::new();
        let mut pause = CountingPause(0);
        Reviser::new(ReviseConfig::new(bib.path()).with_skip(true))
            .run(&mut reporter, &mut pause)
            .unwrap();

        assert_eq!(pause.0, 0);
        assert!(!reporter.contains(Severity::Print, "scholar.google.com"));
    }

    #[test]
    fn test_note_survives_force_mode() {
        let bib = create_temp_file(BIB, ".bib");
        let mut reporter = RecordingReporter::new();
        let summary = Reviser::new(ReviseConfig::new(bib.path()).with_skip(true))
            .run(&mut reporter, &mut NoPause)
            .unwrap();
        assert_eq!(summary.retained[0].get("note"), Some("Volume 1"));

        let summary = Reviser::new(
            ReviseConfig::new(bib.path())
                .with_skip(true)
                .with_preserve_note(false),
        )
        .run(&mut reporter, &mut NoPause)
        .unwrap();
        assert!(!summary.retained[0].contains("note"));
    }

    #[test]
    fn test_invalid_bbl_path_degrades_to_all_entries() {
        let bib = create_temp_file(BIB, ".bib");
        let mut reporter = RecordingReporter::new();
        let config = ReviseConfig::new(bib.path())
            .with_cited_path(Some(PathBuf::from("/nonexistent/paper.bbl")))
            .with_skip(true);
        let summary = Reviser::new(config).run(&mut reporter, &mut NoPause).unwrap();

        assert!(reporter.contains(Severity::Error, "Invalid path for bbl file"));
        assert_eq!(summary.retained.len(), 2);
        assert!(summary.missing.is_empty());
    }

    #[test]
    fn test_same_file() {
        assert!(same_file(Path::new("a.bib"), Path::new("a.bib")));
        assert!(!same_file(Path::new("a.bib"), Path::new("b.bib")));
    }
}
