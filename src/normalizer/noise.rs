// file: src/normalizer/noise.rs
// description: structural noise classifier deciding which corpus lines are dropped before normalization
// reference: pure predicates over trimmed text

use crate::normalizer::patterns::*;
use serde::Serialize;

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    NoAlphabetic,
    Markup,
    Css,
    MarkdownImage,
    MarkdownTable,
    Caption,
    DateOnly,
    ApiHashMapping,
    IocArtifact,
}

impl NoiseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseKind::NoAlphabetic => "no_alphabetic",
            NoiseKind::Markup => "markup",
            NoiseKind::Css => "css",
            NoiseKind::MarkdownImage => "markdown_image",
            NoiseKind::MarkdownTable => "markdown_table",
            NoiseKind::Caption => "caption",
            NoiseKind::DateOnly => "date_only",
            NoiseKind::ApiHashMapping => "api_hash_mapping",
            NoiseKind::IocArtifact => "ioc_artifact",
        }
    }
}

pub fn is_noise(raw_text: &str) -> bool {
    classify_noise(raw_text).is_some()
}

pub fn classify_noise(raw_text: &str) -> Option<NoiseKind> {
    let text = raw_text.trim();

    if !HAS_ALPHA.is_match(text) {
        return Some(NoiseKind::NoAlphabetic);
    }
    if MARKUP_ARTIFACT.is_match(text) {
        return Some(NoiseKind::Markup);
    }
    if is_css_rule(text) {
        return Some(NoiseKind::Css);
    }
    if MARKDOWN_IMAGE.is_match(text) {
        return Some(NoiseKind::MarkdownImage);
    }
    if is_markdown_table_row(text) {
        return Some(NoiseKind::MarkdownTable);
    }
    if is_caption_label(text) {
        return Some(NoiseKind::Caption);
    }
    if is_date_only(text) {
        return Some(NoiseKind::DateOnly);
    }
    if API_HASH_MAPPING.is_match(text) {
        return Some(NoiseKind::ApiHashMapping);
    }
    if is_ioc_artifact(text) {
        return Some(NoiseKind::IocArtifact);
    }

    None
}

fn is_css_rule(text: &str) -> bool {
    if CSS_SELECTOR_RULE.is_match(text) || CSS_COMPOUND_SELECTOR.is_match(text) {
        return true;
    }

    // `property: value` only counts when it still looks like a declaration,
    // not a `Label: sentence` line.
    match CSS_PROPERTY.captures(text) {
        Some(captures) => {
            let value = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            text.ends_with(';') || (word_count(value) <= 3 && !ends_sentence(value))
        }
        None => false,
    }
}

fn is_markdown_table_row(text: &str) -> bool {
    text.starts_with('|') && text[1..].contains('|')
}

/// `Table N ...` lines and caption-only `Figure N` lines. Descriptive
/// `Figure N: ...` lines are kept for the structural rewriter.
fn is_caption_label(text: &str) -> bool {
    TABLE_CAPTION.is_match(text) || BARE_FIGURE_CAPTION.is_match(text)
}

pub fn is_date_only(text: &str) -> bool {
    let text = text.trim();
    DATE_ONLY.iter().any(|pattern| pattern.is_match(text))
}

pub fn is_ioc_artifact(text: &str) -> bool {
    let stripped = LEADING_LIST_MARKERS.replace(text.trim(), "");

    if IOC_ONLY.is_match(&stripped) {
        return true;
    }

    let Some(captures) = IOC_WITH_LABEL.captures(&stripped) else {
        return false;
    };

    let label = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if DESCRIPTIVE_LABEL_WORD.is_match(label) {
        return false;
    }

    word_count(label) <= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_noise_lines() {
        assert!(is_noise("2021"));
        assert!(is_noise("May 18, 2021"));
        assert!(!is_noise("The attacker exfiltrated data."));
    }

    #[test]
    fn test_no_alphabetic() {
        assert_eq!(classify_noise("   "), Some(NoiseKind::NoAlphabetic));
        assert_eq!(classify_noise("12 / 34 -- 56"), Some(NoiseKind::NoAlphabetic));
    }

    #[test]
    fn test_markup_artifacts() {
        assert_eq!(classify_noise("<![CDATA[ var x = 1; ]]>"), Some(NoiseKind::Markup));
        assert_eq!(classify_noise("<!-- hidden comment -->"), Some(NoiseKind::Markup));
        assert_eq!(classify_noise("text</div>"), Some(NoiseKind::Markup));
        assert_eq!(classify_noise("<br/>break"), Some(NoiseKind::Markup));
    }

    #[test]
    fn test_css_rules() {
        assert_eq!(classify_noise(".post-body p span {"), Some(NoiseKind::Css));
        assert_eq!(classify_noise(".nav .item .link a"), Some(NoiseKind::Css));
        assert_eq!(classify_noise("font-family: Arial, sans-serif;"), Some(NoiseKind::Css));
        assert_eq!(classify_noise("display: none"), Some(NoiseKind::Css));
    }

    #[test]
    fn test_label_sentence_is_not_css() {
        assert_eq!(
            classify_noise("Summary: The attacker gained persistent access to the network."),
            None
        );
        assert_eq!(classify_noise("Conclusion: Lazarus attacked banks."), None);
    }

    #[test]
    fn test_short_label_lines_count_as_css() {
        // one-word `key: value` lines read as declarations and carry no event
        assert_eq!(classify_noise("Malware: Emotet"), Some(NoiseKind::Css));
        assert_eq!(classify_noise("Severity: High"), Some(NoiseKind::Css));
        assert_eq!(classify_noise("Threat Actor: APT29"), None);
        assert_eq!(
            classify_noise("Summary: The attacker gained access."),
            None
        );
    }

    #[test]
    fn test_markdown_artifacts() {
        assert_eq!(
            classify_noise("![diagram](https://cdn.example.com/a.png)"),
            Some(NoiseKind::MarkdownImage)
        );
        assert_eq!(
            classify_noise("| Hash | Description |"),
            Some(NoiseKind::MarkdownTable)
        );
        assert_eq!(classify_noise("|lonely pipe"), None);
    }

    #[test]
    fn test_caption_handling() {
        assert_eq!(classify_noise("Figure 4"), Some(NoiseKind::Caption));
        assert_eq!(classify_noise("figure 12:"), Some(NoiseKind::Caption));
        assert_eq!(classify_noise("Table 2: Observed IoCs"), Some(NoiseKind::Caption));
        assert_eq!(classify_noise("Figure 3: the attack chain"), None);
    }

    #[test]
    fn test_date_shapes() {
        assert!(is_date_only("05/18/2021"));
        assert!(is_date_only("5/8/21"));
        assert!(is_date_only("January 3, 2020"));
        assert!(!is_date_only("On May 18, 2021 the group struck."));
    }

    #[test]
    fn test_api_hash_mapping() {
        assert_eq!(
            classify_noise("0x7c0dfcaa -> GetProcAddress"),
            Some(NoiseKind::ApiHashMapping)
        );
        assert_eq!(
            classify_noise("0xdeadbeef->kernel32\\LoadLibraryA"),
            Some(NoiseKind::ApiHashMapping)
        );
    }

    #[test]
    fn test_ioc_artifacts() {
        assert!(is_ioc_artifact("hxxp-login[.]example[.]net"));
        assert!(is_ioc_artifact("* cdn[.]evil[.]io/gate.php"));
        assert!(is_ioc_artifact("cdn[.]evil[.]io - C2 domain"));
        assert!(!is_ioc_artifact("cdn[.]evil[.]io - domain used in the second wave"));
        assert!(!is_ioc_artifact("cdn[.]evil[.]io - a much longer free text label"));
        assert!(!is_ioc_artifact("The implant beaconed to cdn[.]evil[.]io daily."));
    }
}
