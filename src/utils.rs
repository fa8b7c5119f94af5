use itertools::Itertools;

/// Accented characters and their LaTeX escapes, applied in this order.
///
/// `ö` appears twice. The first pair carries the effective escape; the second
/// can never match because every `ö` is already gone when it is reached.
pub(crate) const LATEX_ESCAPES: [(&str, &str); 27] = [
    ("ä", "\\\"a"),
    ("ü", "\\\"u"),
    ("ö", "\\\"{o}"),
    ("Ä", "\\\"A"),
    ("Ü", "\\\"U"),
    ("Ö", "\\\"O"),
    ("é", "\\'e"),
    ("ă", "\\ua"),
    ("á", "\\'a"),
    ("ò", "\\`{o}"),
    ("ó", "\\'{o}"),
    ("ô", "\\^{o}"),
    ("ö", "\\\"o"),
    ("ő", "\\H{o}"),
    ("õ", "\\~{o}"),
    ("ç", "\\c{c}"),
    ("ą", "\\k{a}"),
    ("ł", "\\l{} "),
    ("ō", "\\={o}"),
    ("ȯ", "\\.{o}"),
    ("ụ", "\\d{u}"),
    ("å", "\\r{a}"),
    ("ŏ", "\\u{o}"),
    ("š", "\\v{s}"),
    ("ø", "\\o{}"),
    ("ı", "{\\i}"),
    ("o\u{361}o", "\\t{oo}"),
];

/// English stopwords ignored by the capitalization scan.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "be", "became", "because", "become", "becomes", "been", "before",
    "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond", "both",
    "but", "by", "can", "cannot", "could", "do", "done", "down", "due", "during", "each", "either",
    "else", "elsewhere", "enough", "etc", "even", "ever", "every", "everything", "except", "few",
    "for", "from", "further", "had", "has", "have", "he", "hence", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "indeed", "into", "is",
    "it", "its", "itself", "last", "less", "many", "may", "me", "might", "more", "moreover",
    "most", "much", "must", "my", "neither", "never", "nevertheless", "no", "nor", "not",
    "nothing", "now", "of", "off", "often", "on", "once", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "out", "over", "own", "per", "perhaps", "rather", "same", "she",
    "should", "since", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "though", "through", "thus", "to", "too",
    "toward", "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "where", "whether", "which", "while", "who",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word.to_lowercase().as_str())
}

/// Collapses whitespace (including newlines) to single spaces and drops every brace.
pub(crate) fn trim(text: &str) -> String {
    text.split_whitespace().join(" ").replace(['{', '}'], "")
}

/// Replaces accented characters with their LaTeX escapes.
pub(crate) fn escape_accents(text: &str) -> String {
    LATEX_ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title words that are neither capitalized, all-caps nor stopwords.
///
/// Hyphenated words are checked part by part; quotes, commas and colons are ignored.
pub(crate) fn non_capitalized_words(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .filter(|word| !is_stop_word(word))
        .map(|word| word.replace(['"', ',', ':'], ""))
        .flat_map(|word| {
            word.split('-')
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|word| {
            *word != capitalize(word) && *word != word.to_uppercase() && !is_stop_word(word)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  a   study\nof {Things} ", "a study of Things")]
    #[case("{{Deep}} Learning", "Deep Learning")]
    #[case("", "")]
    fn test_trim(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(trim(input), expected);
    }

    #[test]
    fn test_escape_accents() {
        assert_eq!(escape_accents("Müller"), "M\\\"uller");
        assert_eq!(escape_accents("Gödel"), "G\\\"{o}del");
        assert_eq!(escape_accents("Łukasz Łódź"), "Łukasz Ł\\'{o}dź");
        assert_eq!(escape_accents("Kołodziej"), "Ko\\l{} odziej");
        assert_eq!(escape_accents("plain"), "plain");
    }

    #[test]
    fn test_shadowed_escape_never_applies() {
        let first = LATEX_ESCAPES.iter().position(|(k, _)| *k == "ö").unwrap();
        let last = LATEX_ESCAPES.iter().rposition(|(k, _)| *k == "ö").unwrap();
        assert!(first < last);
        assert!(!escape_accents("ö").contains("\\\"o"));
    }

    #[test]
    fn test_non_capitalized_words() {
        assert_eq!(
            non_capitalized_words("a Study of things in Self-supervised NLP"),
            vec!["things", "supervised"]
        );
        assert!(non_capitalized_words("Deep Learning for Vision").is_empty());
    }
}
