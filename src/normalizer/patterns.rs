// file: src/normalizer/patterns.rs
// description: compiled regex patterns for noise filtering, ioc placeholding and structural rewriting
// reference: https://docs.rs/regex

use crate::models::IocType;
use lazy_static::lazy_static;
use regex::Regex;

/// Defanged domain or path such as `evil[.]example[.]com/payload`.
const DEFANGED_IOC: &str =
    r"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-]+(?:\[\.\][A-Za-z0-9-]+)+(?:/\S+)?";

lazy_static! {
    // Noise
    pub static ref HAS_ALPHA: Regex = Regex::new(r"[A-Za-z]").expect("HAS_ALPHA regex is valid");

    pub static ref MARKUP_ARTIFACT: Regex = Regex::new(
        r"<!\[CDATA\[|<!--|-->|</|/>"
    ).expect("MARKUP_ARTIFACT regex is valid");

    pub static ref CSS_SELECTOR_RULE: Regex = Regex::new(
        r"^\.[\w\-]+\s+[\w\-]+\s+\w+\s*\{?$"
    ).expect("CSS_SELECTOR_RULE regex is valid");

    pub static ref CSS_COMPOUND_SELECTOR: Regex = Regex::new(
        r"^\.[\w\-]+(?:\s+\.[\w\-]+)+\s+\w+\s*\{?$"
    ).expect("CSS_COMPOUND_SELECTOR regex is valid");

    pub static ref CSS_PROPERTY: Regex = Regex::new(
        r"^[a-zA-Z\-]+\s*:\s*([^;]+);?$"
    ).expect("CSS_PROPERTY regex is valid");

    pub static ref MARKDOWN_IMAGE: Regex = Regex::new(
        r"!\[.*?\]\(.*?\)"
    ).expect("MARKDOWN_IMAGE regex is valid");

    pub static ref TABLE_CAPTION: Regex = Regex::new(
        r"(?i)^table\s+\d+"
    ).expect("TABLE_CAPTION regex is valid");

    pub static ref BARE_FIGURE_CAPTION: Regex = Regex::new(
        r"(?i)^figure\s+\d+\s*[:.\-–]?\s*$"
    ).expect("BARE_FIGURE_CAPTION regex is valid");

    pub static ref DATE_ONLY: Vec<Regex> = vec![
        Regex::new(r"^[A-Za-z]+\s+\d{1,2},\s+\d{4}$").expect("month-day-year regex is valid"),
        Regex::new(r"^\d{4}$").expect("year regex is valid"),
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").expect("numeric date regex is valid"),
    ];

    pub static ref API_HASH_MAPPING: Regex = Regex::new(
        r"^0x[a-fA-F0-9]+\s*->\s*[A-Za-z0-9_\\]+$"
    ).expect("API_HASH_MAPPING regex is valid");

    pub static ref LEADING_LIST_MARKERS: Regex = Regex::new(
        r"^[\*\+\-\s]+"
    ).expect("LEADING_LIST_MARKERS regex is valid");

    pub static ref IOC_ONLY: Regex = Regex::new(
        &format!(r"^{DEFANGED_IOC}$")
    ).expect("IOC_ONLY regex is valid");

    pub static ref IOC_WITH_LABEL: Regex = Regex::new(
        &format!(r"^{DEFANGED_IOC}\s+-\s+(.+)$")
    ).expect("IOC_WITH_LABEL regex is valid");

    pub static ref DESCRIPTIVE_LABEL_WORD: Regex = Regex::new(
        r"(?i)\b(?:added|seen|observed|related|used|in|on|during|after|before)\b"
    ).expect("DESCRIPTIVE_LABEL_WORD regex is valid");

    // Indicators of compromise
    pub static ref URL: Regex = Regex::new(
        r"(?i)https?://[^\s)]+"
    ).expect("URL regex is valid");

    pub static ref IPV4: Regex = Regex::new(
        r"\b(?:\d{1,3}(?:\.|\[\.\])){3}\d{1,3}\b"
    ).expect("IPV4 regex is valid");

    pub static ref OCTET_SEPARATOR: Regex = Regex::new(
        r"\[\.\]|\."
    ).expect("OCTET_SEPARATOR regex is valid");

    pub static ref EMAIL: Regex = Regex::new(
        r"\b[\w.\-]+@[\w.\-]+\.\w+\b"
    ).expect("EMAIL regex is valid");

    pub static ref FILE_HASH: Regex = Regex::new(
        r"\b(?:[a-fA-F0-9]{32}|[a-fA-F0-9]{40}|[a-fA-F0-9]{64})\b"
    ).expect("FILE_HASH regex is valid");

    pub static ref MALFORMED_PLACEHOLDERS: Vec<(IocType, Regex)> = IocType::ALL
        .iter()
        .map(|ioc_type| {
            let pattern = format!(r"<+\s*{}\s*>+", ioc_type.as_str());
            let regex = Regex::new(&pattern).expect("placeholder regex is valid");
            (*ioc_type, regex)
        })
        .collect();

    // Markdown cleanup
    pub static ref MARKDOWN_LINK: Regex = Regex::new(
        r"\[([^\]]+)\]\([^)]+\)"
    ).expect("MARKDOWN_LINK regex is valid");

    pub static ref INLINE_EMPHASIS: Regex = Regex::new(
        r"\*{1,3}([^*\n]+)\*{1,3}"
    ).expect("INLINE_EMPHASIS regex is valid");

    pub static ref EDGE_EMPHASIS: Regex = Regex::new(
        r"^\*+|\*+$"
    ).expect("EDGE_EMPHASIS regex is valid");

    pub static ref BULLET_MARKER: Regex = Regex::new(
        r"^[\*\+\-]\s+"
    ).expect("BULLET_MARKER regex is valid");

    // Structure
    pub static ref MARKDOWN_HEADING: Regex = Regex::new(
        r"^#{1,6}\s+"
    ).expect("MARKDOWN_HEADING regex is valid");

    pub static ref HEADING_MARKER: Regex = Regex::new(
        r"^#{1,6}\s*"
    ).expect("HEADING_MARKER regex is valid");

    pub static ref LEADING_NUMBERING: Regex = Regex::new(
        r"^\d+(?:\.\d+)*\s*"
    ).expect("LEADING_NUMBERING regex is valid");

    pub static ref NUMBERED_SUBSECTION: Regex = Regex::new(
        r"^(\d+(?:\.\d+)+)\s+(.+)$"
    ).expect("NUMBERED_SUBSECTION regex is valid");

    pub static ref FIGURE_CAPTION: Regex = Regex::new(
        r"(?i)^.*figure\s+(\d+)\s*[:–\-]\s*(.+)"
    ).expect("FIGURE_CAPTION regex is valid");

    pub static ref BULLET_DEFINITION: Regex = Regex::new(
        r"^(.{1,60})\s*:\s*(.+)"
    ).expect("BULLET_DEFINITION regex is valid");

    pub static ref SENTENCE_END: Regex = Regex::new(
        r"[.!?]$"
    ).expect("SENTENCE_END regex is valid");
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn ends_sentence(text: &str) -> bool {
    SENTENCE_END.is_match(text)
}
