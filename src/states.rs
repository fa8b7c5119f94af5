//! US states and territories with their two-letter postal codes.
//!
//! Used by the address rule to recognize and abbreviate the state component of
//! a conference location such as `"San Diego, California, USA"`.

/// Full names and postal codes, in alphabetical order of the name.
pub const US_STATES: [(&str, &str); 56] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("American Samoa", "AS"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Guam", "GU"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Northern Mariana Islands", "MP"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virgin Islands", "VI"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Returns the postal code for a full state name (exact, case-sensitive match).
pub fn abbreviation(name: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(state, _)| *state == name)
        .map(|(_, code)| *code)
}

/// Returns the full state name for a postal code.
pub fn full_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(_, abbr)| *abbr == code)
        .map(|(state, _)| *state)
}

pub fn is_state_name(name: &str) -> bool {
    abbreviation(name).is_some()
}

pub fn is_abbreviation(code: &str) -> bool {
    full_name(code).is_some()
}

/// True for either a full name or a postal code.
pub fn is_state(component: &str) -> bool {
    is_state_name(component) || is_abbreviation(component)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(abbreviation("California"), Some("CA"));
        assert_eq!(abbreviation("california"), None);
        assert_eq!(full_name("WA"), Some("Washington"));
        assert_eq!(full_name("XX"), None);
    }

    #[test]
    fn test_table_is_bijective() {
        for (name, code) in US_STATES {
            assert_eq!(abbreviation(name), Some(code));
            assert_eq!(full_name(code), Some(name));
            assert_eq!(code.len(), 2);
        }
    }

    #[test]
    fn test_is_state() {
        assert!(is_state("New York"));
        assert!(is_state("NY"));
        assert!(!is_state("Ontario"));
        assert!(!is_state(""));
    }
}
