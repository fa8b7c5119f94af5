//! Compiled patterns, backed by `regex` or `regex_lite` depending on features.

#[cfg(feature = "lite")]
pub(crate) use regex_lite::Regex;
#[cfg(all(feature = "regex", not(feature = "lite")))]
pub(crate) use regex::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("bibrevise requires the \"regex\" or \"lite\" feature to be enabled");

use std::sync::LazyLock;

/// One `\bibitem{key}` marker of a compiled bibliography; group 1 is the key.
pub(crate) static BIBITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\bibitem\{(.*?)\}").unwrap());

/// A run of hyphens inside a page range.
pub(crate) static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());
