//! Near-duplicate detection.
//!
//! After validation, every pair of retained entries is compared by title. Two
//! entries whose titles are almost identical but whose keys differ are most
//! likely the same work cited twice.
//!
//! ## Similarity
//!
//! Titles are lowercased and compared with the longest common subsequence:
//!
//! ```text
//! similarity(a, b) = lcs(lower(a), lower(b)) / max(len(a), len(b))
//! ```
//!
//! A pair is reported when the similarity is strictly greater than the
//! threshold (0.95 by default).
//!
//! ## Usage
//!
//! ```rust
//! use bibrevise::{DuplicateDetector, Entry, EntryType};
//!
//! let entries = vec![
//!     Entry::new(EntryType::Article, "foo2020").with_field("title", "{Deep Learning for Vision}"),
//!     Entry::new(EntryType::Article, "foo2020b").with_field("title", "{deep learning for vision}"),
//! ];
//!
//! let pairs = DuplicateDetector::new().find_duplicates(&entries);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].first, "foo2020b");
//! assert_eq!(pairs[0].second, "foo2020");
//! ```
//!
//! # Performance
//!
//! - Time complexity: O(n²) title comparisons, each O(|a|·|b|)
//! - Fine for the tens to low hundreds of entries a paper cites; not meant for
//!   whole libraries

use crate::Entry;
use serde::Serialize;

const DEFAULT_TITLE_SIMILARITY_THRESHOLD: f64 = 0.95;

/// Two entries that look like the same work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair {
    /// Key of the later entry
    pub first: String,
    /// Key of the earlier entry
    pub second: String,
    pub similarity: f64,
}

/// Pairwise title comparison over an entry set.
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    threshold: f64,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_TITLE_SIMILARITY_THRESHOLD,
        }
    }
}

impl DuplicateDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the similarity a pair must exceed to be reported.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns every pair of entries with near-identical titles.
    ///
    /// Each unordered pair is considered once: entry `i` is compared with every
    /// entry before it. Entries without a title are skipped.
    pub fn find_duplicates(&self, entries: &[Entry]) -> Vec<DuplicatePair> {
        let mut pairs = Vec::new();

        for (i, later) in entries.iter().enumerate() {
            let Some(later_title) = later.get("title") else {
                continue;
            };
            for earlier in &entries[..i] {
                let Some(earlier_title) = earlier.get("title") else {
                    continue;
                };
                let similarity = title_similarity(later_title, earlier_title);
                if similarity > self.threshold {
                    pairs.push(DuplicatePair {
                        first: later.id.clone(),
                        second: earlier.id.clone(),
                        similarity,
                    });
                }
            }
        }

        pairs
    }
}

/// Case-insensitive LCS ratio of two titles, in `[0, 1]`.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    let common = lcs_len(&a.to_lowercase(), &b.to_lowercase());
    common as f64 / longest as f64
}

/// Length of the longest common subsequence, in characters.
fn lcs_len(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for ca in a.chars() {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == *cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
