// file: src/extractor/patterns.rs
// description: compiled regex patterns for event extraction
// reference: https://docs.rs/regex

use crate::extractor::vocabulary::{
    ACTIONS, ASSETS, KNOWN_ACTOR_NAMES, KNOWN_ACTOR_PATTERNS, THREAT_ACTORS,
};
use lazy_static::lazy_static;
use regex::Regex;

/// A vocabulary entry and the word-boundary pattern that finds it.
pub type TermMatcher = (&'static str, Regex);

fn term_matchers(terms: &[&'static str], allow_plural: bool) -> Vec<TermMatcher> {
    let suffix = if allow_plural { "s?" } else { "" };
    terms
        .iter()
        .map(|term| {
            let pattern = format!(r"\b{}{}\b", regex::escape(term), suffix);
            let regex = Regex::new(&pattern).expect("vocabulary regex is valid");
            (*term, regex)
        })
        .collect()
}

lazy_static! {
    pub static ref CVE: Regex = Regex::new(
        r"(?i)\bCVE-\d{4}-\d+\b"
    ).expect("CVE regex is valid");

    /// `<object> was|were <action> by [the] <actor>` over lowercase text.
    pub static ref PASSIVE_VOICE: Regex = Regex::new(
        r"(\w+(?:\s+\w+)?)\s+(?:was|were)\s+(\w+)\s+by\s+(?:the\s+)?(\w+(?:\s+\w+)?)"
    ).expect("PASSIVE_VOICE regex is valid");

    pub static ref PLACEHOLDER_TOKEN: Regex = Regex::new(
        r"(?i)<(?:URL|IP_ADDRESS|EMAIL|FILE_HASH)>"
    ).expect("PLACEHOLDER_TOKEN regex is valid");

    pub static ref KNOWN_ACTORS: Vec<Regex> = KNOWN_ACTOR_NAMES
        .iter()
        .map(|name| format!(r"\b{}\b", regex::escape(name)))
        .chain(KNOWN_ACTOR_PATTERNS.iter().map(|pattern| pattern.to_string()))
        .map(|pattern| Regex::new(&pattern).expect("known actor regex is valid"))
        .collect();

    // Nouns accept a plural `s`; actions are matched exactly.
    pub static ref ACTOR_TERMS: Vec<TermMatcher> = term_matchers(THREAT_ACTORS, true);
    pub static ref ACTION_TERMS: Vec<TermMatcher> = term_matchers(ACTIONS, false);
    pub static ref ASSET_TERMS: Vec<TermMatcher> = term_matchers(ASSETS, true);
}

/// First vocabulary term found in `text_lower`, in declared order.
pub fn first_term(matchers: &[TermMatcher], text_lower: &str) -> Option<&'static str> {
    matchers
        .iter()
        .find(|(_, regex)| regex.is_match(text_lower))
        .map(|(term, _)| *term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cve_pattern() {
        assert!(CVE.is_match("exploited CVE-2021-1234 twice"));
        assert!(CVE.is_match("cve-2017-11882"));
        assert!(!CVE.is_match("CVE-21-1234"));
    }

    #[test]
    fn test_passive_voice_captures() {
        let caps = PASSIVE_VOICE
            .captures("the tlds were abused by the threat actor")
            .unwrap();
        assert_eq!(&caps[1], "the tlds");
        assert_eq!(&caps[2], "abused");
        assert_eq!(&caps[3], "threat actor");
    }

    #[test]
    fn test_placeholder_token_any_case() {
        assert!(PLACEHOLDER_TOKEN.is_match("to <ip_address> now"));
        assert!(PLACEHOLDER_TOKEN.is_match("<EMAIL>"));
        assert!(!PLACEHOLDER_TOKEN.is_match("<email address>"));
    }

    #[test]
    fn test_known_actor_order() {
        assert_eq!(KNOWN_ACTORS.len(), 15);
        assert!(KNOWN_ACTORS[0].is_match("the Lazarus group"));
        assert!(!KNOWN_ACTORS[0].is_match("the lazarus group"));
        assert!(KNOWN_ACTORS.iter().any(|r| r.is_match("linked to APT41")));
    }

    #[test]
    fn test_first_term_uses_word_boundaries() {
        assert_eq!(first_term(&ASSET_TERMS, "dumped the database"), Some("database"));
        assert_eq!(first_term(&ASSET_TERMS, "stole user credentials"), Some("credentials"));
        assert_eq!(first_term(&ACTOR_TERMS, "the attackers moved"), Some("attacker"));
        assert_eq!(first_term(&ACTION_TERMS, "it was resent"), None);
        assert_eq!(first_term(&ACTION_TERMS, "they gained access quickly"), Some("gained access"));
    }
}
