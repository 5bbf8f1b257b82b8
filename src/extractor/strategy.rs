// file: src/extractor/strategy.rs
// description: closed, ordered list of extraction strategies with a uniform contract
// reference: each strategy maps one sentence and its parse to zero or more events

use crate::config::DependencyScope;
use crate::extractor::{dependency, detectors, keyword, passive};
use crate::models::Event;
use crate::parser::ParsedSentence;

/// Everything a strategy may look at for one sentence.
pub struct SentenceContext<'a> {
    pub text: &'a str,
    pub lower: String,
    pub parse: &'a ParsedSentence,
    pub scope: DependencyScope,
}

impl<'a> SentenceContext<'a> {
    pub fn new(text: &'a str, parse: &'a ParsedSentence, scope: DependencyScope) -> Self {
        Self {
            text,
            lower: text.to_lowercase(),
            parse,
            scope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    PassiveVoice,
    Keyword,
    Dependency,
    Malware,
    Vulnerability,
    CommandAndControl,
}

impl Strategy {
    /// Output order before deduplication; earlier strategies win ties.
    pub const ORDERED: [Strategy; 6] = [
        Strategy::PassiveVoice,
        Strategy::Keyword,
        Strategy::Dependency,
        Strategy::Malware,
        Strategy::Vulnerability,
        Strategy::CommandAndControl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::PassiveVoice => "passive_voice",
            Strategy::Keyword => "keyword",
            Strategy::Dependency => "dependency",
            Strategy::Malware => "malware",
            Strategy::Vulnerability => "vulnerability",
            Strategy::CommandAndControl => "command_and_control",
        }
    }

    pub fn extract(&self, ctx: &SentenceContext<'_>) -> Vec<Event> {
        match self {
            Strategy::PassiveVoice => passive::extract(ctx),
            Strategy::Keyword => keyword::extract(ctx),
            Strategy::Dependency => dependency::extract(ctx),
            Strategy::Malware => detectors::extract_malware(ctx),
            Strategy::Vulnerability => detectors::extract_vulnerability(ctx),
            Strategy::CommandAndControl => detectors::extract_command_and_control(ctx),
        }
    }
}
