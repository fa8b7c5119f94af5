//! Field-level rules applied to one entry at a time.
//!
//! Every rule takes the entry by mutable reference, may rewrite its fields and
//! returns an optional warning. Rules are independent: a warning from one never
//! stops another from running.

use crate::regex::HYPHEN_RUN;
use crate::utils::{escape_accents, non_capitalized_words, trim};
use crate::{Entry, EntryType, states};

/// Prefix stripped from DOI values and recognized in URLs.
pub const DOI_PREFIX: &str = "https://doi.org/";

/// Brace-protects the title after collapsing whitespace and removing inner braces.
///
/// The number of badly capitalized words is computed but never reported as a
/// warning; it is only logged at debug level.
pub fn validate_title(entry: &mut Entry) -> Option<String> {
    let Some(title) = entry.get("title") else {
        return Some("title key not found".to_string());
    };

    let title = trim(title);
    let bad_words = non_capitalized_words(&title);
    tracing::debug!(
        id = %entry.id,
        count = bad_words.len(),
        words = ?bad_words,
        "uncapitalized title words"
    );

    entry.set("title", format!("{{{}}}", title));
    None
}

/// True for tokens such as `J` or `J.`.
fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(_), None, None) => true,
        (Some(_), Some('.'), None) => true,
        _ => false,
    }
}

/// Checks that every author has at least two non-initial name tokens.
///
/// The cleaned and escaped author string is written back only when all authors pass.
pub fn validate_author(entry: &mut Entry) -> Option<String> {
    let Some(author) = entry.get("author") else {
        return Some("authors key not found".to_string());
    };

    let author = escape_accents(&trim(author));
    for person in author.split(" and ") {
        let names: Vec<&str> = person.split(',').flat_map(str::split_whitespace).collect();
        let initials_only = names.iter().filter(|name| is_initial(name)).count();

        if person.contains("et al.") || person.contains("others") {
            return Some(format!("Unnamed authors \"{}\"", person));
        }
        if names.len() == 1 {
            return Some(format!("only one name \"{}\"", person));
        }
        if initials_only + 1 >= names.len() {
            return Some(format!(
                "author with initials only ({}): \"{}\"",
                initials_only, person
            ));
        }
    }

    entry.set("author", author);
    None
}

/// Turns an arXiv `misc` entry into a publisher-tagged one and asks for a peer-reviewed version.
pub fn validate_arxiv(entry: &mut Entry) -> Option<String> {
    if entry.entry_type != EntryType::Misc || entry.get("archiveprefix") != Some("arXiv") {
        return None;
    }

    entry.remove("archiveprefix");
    entry.set("publisher", "arXiv");
    Some("arXiv preprint, try to find a peer-reviewed version".to_string())
}

/// Removes spaces and makes every hyphen run a `--` range separator.
pub fn validate_pages(entry: &mut Entry) -> Option<String> {
    if let Some(pages) = entry.get("pages") {
        let pages = pages.replace(' ', "");
        let pages = HYPHEN_RUN.replace_all(&pages, "--").into_owned();
        entry.set("pages", pages);
    }
    None
}

/// Normalizes US conference addresses to `City, ST, USA`.
pub fn validate_address(entry: &mut Entry) -> Option<String> {
    if entry.entry_type != EntryType::InProceedings {
        return None;
    }
    let address = entry.get("address")?;

    let mut components: Vec<String> = address.split(',').map(|c| c.trim().to_string()).collect();
    match components.len() {
        3 => {
            if components[2] != "USA" {
                return Some(format!(
                    "address' last component should be USA if they are 3 components, got {}",
                    components[2]
                ));
            }
            if !states::is_state(&components[1]) {
                return Some(format!(
                    "address component[1] should be a US state, got: {}",
                    components[1]
                ));
            }
        }
        2 => {}
        _ => return Some("address components should be 2 or 3".to_string()),
    }

    if let Some(state) = components.get_mut(1) {
        if let Some(code) = states::abbreviation(state) {
            *state = code.to_string();
        }
    }
    if components.len() == 2 && components.get(1).is_some_and(|c| states::is_abbreviation(c)) {
        components.push("USA".to_string());
    }

    entry.set("address", components.join(", "));
    None
}

/// Consolidates `doi` and `url`: a DOI always wins over a URL.
pub fn validate_doi(entry: &mut Entry) -> Option<String> {
    if entry.contains("doi") && entry.contains("url") {
        entry.remove("url");
    }

    if let Some(doi) = entry.get("doi").and_then(|doi| doi.strip_prefix(DOI_PREFIX)) {
        let doi = doi.to_string();
        entry.set("doi", doi);
    }

    let url = entry.get("url")?;
    match url.strip_prefix(DOI_PREFIX) {
        Some(doi) => {
            let doi = doi.to_string();
            entry.set("doi", doi);
            entry.remove("url");
            None
        }
        None => Some("URL is available but not DOI, check please".to_string()),
    }
}
