//! Per-entry validation.
//!
//! # Example
//!
//! ```
//! use bibrevise::{Entry, EntryType, Validator, ValidatorConfig};
//!
//! let mut entry = Entry::new(EntryType::Book, "knuth1984")
//!     .with_field("title", "The TeXbook")
//!     .with_field("author", "Knuth, Donald E.")
//!     .with_field("year", "1984")
//!     .with_field("publisher", "Addison-Wesley")
//!     .with_field("isbn", "0-201-13447-0");
//!
//! let validator = Validator::with_config(ValidatorConfig::default());
//! let warnings = validator.validate_entry(&mut entry);
//!
//! assert!(warnings.is_empty());
//! assert!(!entry.contains("isbn"));
//! ```

use crate::Entry;
use crate::required::{check_required_fields, prune_fields};
use crate::rules::{
    validate_address, validate_arxiv, validate_author, validate_doi, validate_pages,
    validate_title,
};

/// Options controlling which optional steps the validator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Prune every empty or non-required field after checking.
    pub force: bool,
    /// Run the DOI/URL consolidation rule.
    pub force_doi: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            force: true,
            force_doi: false,
        }
    }
}

/// Runs the field rules and the required-field checker over single entries.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ValidatorConfig {
        self.config
    }

    /// Validates one entry in place and returns its warnings in the order found.
    ///
    /// Rules run in a fixed order: title, author, arXiv, pages, address, DOI
    /// (only with `force_doi`), then the required-field check and, with `force`,
    /// pruning. Every rule runs even if an earlier one warned.
    pub fn validate_entry(&self, entry: &mut Entry) -> Vec<String> {
        let mut warnings: Vec<String> = [
            validate_title(entry),
            validate_author(entry),
            validate_arxiv(entry),
            validate_pages(entry),
            validate_address(entry),
        ]
        .into_iter()
        .flatten()
        .collect();

        if self.config.force_doi {
            warnings.extend(validate_doi(entry));
        }
        if !entry.contains("year") {
            warnings.push("Year is empty".to_string());
        }

        let known_type = check_required_fields(entry, &mut warnings);
        if known_type && self.config.force {
            prune_fields(entry);
        }

        warnings
    }
}
