// file: src/normalizer/structural.rs
// description: priority-ordered rewrite rules turning structural fragments into prose
// reference: first matching rule wins, otherwise text passes through

use crate::normalizer::markdown::strip_emphasis;
use crate::normalizer::patterns::*;

/// A single text-to-prose rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralRule {
    SectionHeader,
    FigureCaption,
    BulletDefinition,
    BulletArtifact,
}

impl StructuralRule {
    /// Evaluation order of [`rewrite`].
    pub const ORDERED: [StructuralRule; 4] = [
        StructuralRule::SectionHeader,
        StructuralRule::FigureCaption,
        StructuralRule::BulletDefinition,
        StructuralRule::BulletArtifact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StructuralRule::SectionHeader => "section_header",
            StructuralRule::FigureCaption => "figure_caption",
            StructuralRule::BulletDefinition => "bullet_definition",
            StructuralRule::BulletArtifact => "bullet_artifact",
        }
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            StructuralRule::SectionHeader => rewrite_section_header(text),
            StructuralRule::FigureCaption => rewrite_figure_caption(text),
            StructuralRule::BulletDefinition => rewrite_bullet_definition(text),
            StructuralRule::BulletArtifact => rewrite_bullet_artifact(text),
        }
    }
}

pub fn rewrite(text: &str) -> String {
    rewrite_with_rule(text)
        .map(|(_, rewritten)| rewritten)
        .unwrap_or_else(|| text.to_string())
}

/// Like [`rewrite`] but also reports which rule fired.
pub fn rewrite_with_rule(text: &str) -> Option<(StructuralRule, String)> {
    StructuralRule::ORDERED
        .iter()
        .find_map(|rule| rule.apply(text).map(|rewritten| (*rule, rewritten)))
}

/// `## Title` and `1.2.3 Title` headings.
fn rewrite_section_header(text: &str) -> Option<String> {
    let text = text.trim();

    if MARKDOWN_HEADING.is_match(text) {
        let clean = HEADING_MARKER.replace(text, "");
        let clean = LEADING_NUMBERING.replace(&clean, "");
        let clean = strip_emphasis(&clean);
        if clean.is_empty() {
            return None;
        }
        return Some(format!("This section discusses {clean}."));
    }

    let captures = NUMBERED_SUBSECTION.captures(text)?;
    let title = strip_emphasis(captures.get(2)?.as_str());
    Some(format!("This subsection discusses {title}."))
}

/// `... Figure N: description` with `:`, en-dash or hyphen.
fn rewrite_figure_caption(text: &str) -> Option<String> {
    let captures = FIGURE_CAPTION.captures(text)?;
    let number = captures.get(1)?.as_str();
    let description = strip_emphasis(captures.get(2)?.as_str());
    let description = description.trim_end_matches('.');
    if description.is_empty() {
        return None;
    }

    Some(format!("Figure {number} illustrates {description}."))
}

/// `Subject: definition of six or more words` becomes `Subject is/are definition`.
fn rewrite_bullet_definition(text: &str) -> Option<String> {
    let captures = BULLET_DEFINITION.captures(text)?;
    let subject = captures.get(1)?.as_str().trim();
    let rest = captures.get(2)?.as_str().trim();

    if subject.is_empty() || word_count(rest) < 6 || ends_sentence(subject) {
        return None;
    }

    // `Label: The complete sentence.` is left for title normalization,
    // which drops the label instead of gluing it on with a copula.
    if rest.chars().next().is_some_and(char::is_uppercase) && ends_sentence(rest) {
        return None;
    }

    let copula = if subject.to_lowercase().ends_with('s') {
        "are"
    } else {
        "is"
    };

    Some(format!("{subject} {copula} {rest}"))
}

/// `left - right` where the left side names a component.
fn rewrite_bullet_artifact(text: &str) -> Option<String> {
    let (left, right) = text.split_once(" - ")?;

    if word_count(left) > 5 || word_count(right) < 4 {
        return None;
    }

    Some(format!(
        "The {} component is {}.",
        left.trim(),
        right.trim().trim_end_matches('.')
    ))
}
