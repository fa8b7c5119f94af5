//! Required fields per entry type.
//!
//! The checker creates missing required fields as empty strings, warns about
//! empty ones and about values that leaked into the wrong field (a year or the
//! publisher inside a booktitle, an unexpanded `proc.` abbreviation). In force
//! mode it then prunes the entry down to its required fields.

use crate::{Entry, EntryType};

/// Placeholder searched for when an entry has no `year`.
const YEAR_PLACEHOLDER: &str = "YEAR";

/// Fields never checked for an embedded year.
const YEAR_EXEMPT: [&str; 4] = ["year", "title", "doi", "url"];

/// Ordered list of mandatory fields for a type. Empty for unrecognized types.
pub fn required_fields(entry_type: &EntryType) -> &'static [&'static str] {
    match entry_type {
        EntryType::InProceedings => &[
            "title",
            "publisher",
            "address",
            "booktitle",
            "pages",
            "year",
            "author",
        ],
        EntryType::Article => &["author", "journal", "pages", "publisher", "year", "title"],
        EntryType::Book => &["title", "author", "year", "publisher"],
        EntryType::InBook => &["title", "author", "year", "publisher", "chapter"],
        EntryType::Misc => &["title", "author", "year", "url", "eprint"],
        EntryType::PhdThesis => &["title", "author", "school", "year"],
        EntryType::MasterThesis => &["title", "author", "school", "year"],
        EntryType::Other(_) => &[],
    }
}

/// Checks the required fields of `entry`, creating absent ones, and appends warnings.
///
/// Returns `false` when the entry type is unknown.
pub fn check_required_fields(entry: &mut Entry, warnings: &mut Vec<String>) -> bool {
    let required = required_fields(&entry.entry_type);
    if required.is_empty() {
        warnings.push(format!("Unknown entry type \"{}\"", entry.entry_type));
        return false;
    }

    let year = entry.get("year").unwrap_or(YEAR_PLACEHOLDER).to_string();
    let publisher = entry.get("publisher").unwrap_or_default().to_string();

    for &key in required {
        if !entry.contains(key) {
            entry.set(key, "");
        }
        let value = entry.get(key).unwrap_or_default();

        if value.is_empty() && key != "url" {
            warnings.push(format!("\"{}\" is empty", key));
        }
        if !YEAR_EXEMPT.contains(&key) && value.contains(year.as_str()) {
            warnings.push(format!(
                "Year \"{}\": is found in \"{}\": \"{}\"",
                year, key, value
            ));
        }
        if !publisher.is_empty() && key != "publisher" && value.contains(publisher.as_str()) {
            warnings.push(format!(
                "Publisher \"{}\" is found in \"{}\": \"{}\"",
                publisher, key, value
            ));
        }
        if value.to_lowercase().contains("proc.") {
            warnings.push(format!("\"proc.\" found in \"{}\": \"{}\"", key, value));
        }
    }
    true
}

/// Drops every empty field and every field that is not required for the type.
///
/// The type marker and identifier are not fields of [`Entry`], so they always survive.
pub fn prune_fields(entry: &mut Entry) {
    let required = required_fields(&entry.entry_type);
    entry.retain_fields(|key, value| !value.is_empty() && required.iter().any(|r| *r == key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(entry: &mut Entry) -> Vec<String> {
        let mut warnings = Vec::new();
        check_required_fields(entry, &mut warnings);
        warnings
    }

    #[test]
    fn test_unknown_type() {
        let mut entry = Entry::new(EntryType::from_name("techreport"), "r1");
        let mut warnings = Vec::new();
        assert!(!check_required_fields(&mut entry, &mut warnings));
        assert_eq!(warnings, vec!["Unknown entry type \"techreport\""]);
        assert_eq!(entry.fields().count(), 0);
    }

    #[test]
    fn test_missing_fields_are_created() {
        let mut entry = Entry::new(EntryType::Book, "b1")
            .with_field("title", "{T}")
            .with_field("author", "Smith, John")
            .with_field("year", "2020");
        let warnings = check(&mut entry);

        assert_eq!(warnings, vec!["\"publisher\" is empty"]);
        assert_eq!(entry.get("publisher"), Some(""));
    }

    #[test]
    fn test_empty_url_is_allowed() {
        let mut entry = Entry::new(EntryType::Misc, "m1")
            .with_field("title", "{T}")
            .with_field("author", "Smith, John")
            .with_field("year", "2020")
            .with_field("eprint", "2001.00001");
        assert!(check(&mut entry).is_empty());
        assert_eq!(entry.get("url"), Some(""));
    }

    #[test]
    fn test_leaked_year_and_publisher() {
        let mut entry = Entry::new(EntryType::InProceedings, "p1")
            .with_field("title", "{Title 2020}")
            .with_field("author", "Smith, John")
            .with_field("booktitle", "Proc. of the IEEE CVPR 2020")
            .with_field("publisher", "IEEE")
            .with_field("address", "Seattle, WA, USA")
            .with_field("pages", "1--2")
            .with_field("year", "2020");
        let warnings = check(&mut entry);

        assert_eq!(
            warnings,
            vec![
                "Year \"2020\": is found in \"booktitle\": \"Proc. of the IEEE CVPR 2020\"",
                "Publisher \"IEEE\" is found in \"booktitle\": \"Proc. of the IEEE CVPR 2020\"",
                "\"proc.\" found in \"booktitle\": \"Proc. of the IEEE CVPR 2020\"",
            ]
        );
    }

    #[test]
    fn test_year_placeholder_when_missing() {
        let mut entry = Entry::new(EntryType::PhdThesis, "t1")
            .with_field("title", "{T}")
            .with_field("author", "Smith, John")
            .with_field("school", "YEAR Institute");
        let warnings = check(&mut entry);

        assert_eq!(
            warnings,
            vec![
                "Year \"YEAR\": is found in \"school\": \"YEAR Institute\"",
                "\"year\" is empty",
            ]
        );
    }

    #[test]
    fn test_empty_year_is_found_everywhere() {
        let mut entry = Entry::new(EntryType::Book, "b0")
            .with_field("title", "{T}")
            .with_field("author", "Smith, John")
            .with_field("year", "")
            .with_field("publisher", "Pub");
        let warnings = check(&mut entry);

        assert_eq!(
            warnings,
            vec![
                "Year \"\": is found in \"author\": \"Smith, John\"",
                "\"year\" is empty",
                "Year \"\": is found in \"publisher\": \"Pub\"",
            ]
        );
    }

    #[test]
    fn test_prune_keeps_only_required_non_empty() {
        let mut entry = Entry::new(EntryType::Book, "b1")
            .with_field("title", "{T}")
            .with_field("author", "Smith, John")
            .with_field("year", "2020")
            .with_field("publisher", "")
            .with_field("isbn", "123")
            .with_field("note", "");
        prune_fields(&mut entry);

        let names: Vec<_> = entry.field_names().collect();
        assert_eq!(names, vec!["title", "author", "year"]);
        assert_eq!(entry.id, "b1");
        assert_eq!(entry.entry_type, EntryType::Book);
    }
}
