// file: src/extractor/hybrid.rs
// description: hybrid event extractor running the candidate gate, every strategy and deduplication
// reference: first occurrence per (actor, action, object, sentence) wins

use crate::config::{DependencyScope, EmptyExtraction, ExtractionConfig};
use crate::extractor::strategy::{SentenceContext, Strategy};
use crate::extractor::vocabulary::is_candidate_sentence;
use crate::models::{Event, EventKey, SentenceRecord};
use crate::parser::{DependencyParser, NullParser, ParsedSentence};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct HybridExtractor {
    parser: Arc<dyn DependencyParser>,
    scope: DependencyScope,
    empty_extraction: EmptyExtraction,
}

impl HybridExtractor {
    pub fn new(parser: Arc<dyn DependencyParser>, config: &ExtractionConfig) -> Self {
        Self {
            parser,
            scope: config.dependency_scope,
            empty_extraction: config.empty_extraction,
        }
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Candidate events for one sentence in strategy order. Not deduplicated.
    pub fn extract_sentence(&self, sentence_id: &str, text: &str) -> Vec<Event> {
        let text = text.trim();
        if text.is_empty() || !is_candidate_sentence(text) {
            return Vec::new();
        }

        let parse = self.parse(sentence_id, text);
        let ctx = SentenceContext::new(text, &parse, self.scope);

        let mut events: Vec<Event> = Strategy::ORDERED
            .iter()
            .flat_map(|strategy| strategy.extract(&ctx))
            .map(|event| event.with_sentence_id(sentence_id))
            .collect();

        if events.is_empty() && self.empty_extraction == EmptyExtraction::Placeholder {
            events.push(Event::placeholder().with_sentence_id(sentence_id));
        }

        events
    }

    pub fn extract_record(&self, record: &SentenceRecord) -> Vec<Event> {
        self.extract_sentence(&record.sentence_id, &record.normalized_text)
    }

    /// Sequential extraction over records in order, deduplicated.
    pub fn extract_all(&self, records: &[SentenceRecord]) -> Vec<Event> {
        let mut deduplicator = EventDeduplicator::new();
        records
            .iter()
            .flat_map(|record| deduplicator.deduplicate(self.extract_record(record)))
            .collect()
    }

    fn parse(&self, sentence_id: &str, text: &str) -> ParsedSentence {
        match self.parser.parse(text) {
            Ok(parse) => parse,
            Err(e) => {
                debug!("Parser failed on {}, continuing without parse: {}", sentence_id, e);
                ParsedSentence::empty()
            }
        }
    }
}

impl Default for HybridExtractor {
    fn default() -> Self {
        Self {
            parser: Arc::new(NullParser),
            scope: DependencyScope::default(),
            empty_extraction: EmptyExtraction::default(),
        }
    }
}

/// Keeps the first event seen per key across a whole run.
#[derive(Debug, Default)]
pub struct EventDeduplicator {
    seen: HashSet<EventKey>,
    duplicates: usize,
}

impl EventDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: &Event) -> bool {
        let fresh = self.seen.insert(event.key());
        if !fresh {
            self.duplicates += 1;
        }
        fresh
    }

    pub fn deduplicate(&mut self, events: Vec<Event>) -> Vec<Event> {
        events
            .into_iter()
            .filter(|event| self.insert(event))
            .collect()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn unique(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, Result};
    use crate::models::{Effect, ExtractionMethod};
    use pretty_assertions::assert_eq;

    fn placeholder_config() -> ExtractionConfig {
        ExtractionConfig {
            dependency_scope: DependencyScope::Root,
            empty_extraction: EmptyExtraction::Placeholder,
            parses_path: None,
        }
    }

    #[test]
    fn test_end_to_end_sentence() {
        let extractor = HybridExtractor::default();
        let events =
            extractor.extract_sentence("s-1", "Lazarus exploited CVE-2021-1234 to install a backdoor.");

        let hit = events
            .iter()
            .find(|e| {
                e.actor.as_deref() == Some("Lazarus")
                    && e.object.as_deref() == Some("CVE-2021-1234")
            })
            .expect("vulnerability event present");

        let action = hit.action.as_deref().unwrap();
        assert!(action.contains("exploit") || action.contains("install"));
        assert!(hit.effect.is_some());
        assert!(events.iter().all(|e| e.source_sentence_id == "s-1"));
    }

    #[test]
    fn test_strategy_order_is_preserved() {
        let extractor = HybridExtractor::default();
        let events = extractor.extract_sentence(
            "s-2",
            "Lazarus exploited CVE-2021-1234 to install a backdoor.",
        );

        let methods: Vec<ExtractionMethod> = events.iter().map(|e| e.extraction_method).collect();
        assert_eq!(
            methods,
            vec![ExtractionMethod::RuleBased, ExtractionMethod::VulnerabilityPattern]
        );
        assert_eq!(events[0].actor.as_deref(), Some("lazarus"));
    }

    #[test]
    fn test_gate_failure_yields_nothing() {
        let extractor = HybridExtractor::new(Arc::new(NullParser), &placeholder_config());

        assert!(extractor.extract_sentence("s-3", "The group was active in 2019.").is_empty());
        assert!(extractor.extract_sentence("s-4", "   ").is_empty());
    }

    #[test]
    fn test_placeholder_when_gate_passes_without_events() {
        let text = "Researchers will receive updates.";

        let omit = HybridExtractor::default();
        assert!(omit.extract_sentence("s-5", text).is_empty());

        let placeholder = HybridExtractor::new(Arc::new(NullParser), &placeholder_config());
        let events = placeholder.extract_sentence("s-5", text);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_placeholder());
        assert_eq!(events[0].source_sentence_id, "s-5");
        assert_eq!(events[0].effect, None);
    }

    #[test]
    fn test_deduplicator_keeps_first_even_with_lower_confidence() {
        let low = Event::new(
            Some("malware".to_string()),
            Some("encrypted".to_string()),
            Some("file".to_string()),
            ExtractionMethod::DependencyParse,
        )
        .with_sentence_id("s-6");
        let high = Event::new(
            Some("malware".to_string()),
            Some("encrypted".to_string()),
            Some("file".to_string()),
            ExtractionMethod::VulnerabilityPattern,
        )
        .with_sentence_id("s-6");

        let mut deduplicator = EventDeduplicator::new();
        let kept = deduplicator.deduplicate(vec![low.clone(), high]);

        assert_eq!(kept, vec![low]);
        assert_eq!(deduplicator.duplicates(), 1);
        assert_eq!(deduplicator.unique(), 1);
    }

    #[test]
    fn test_malware_and_keyword_collapse() {
        // keyword actor and malware detector actor are both "malware" here
        let extractor = HybridExtractor::default();
        let record = SentenceRecord::new(
            "s-7".to_string(),
            "The malware encrypted the database.".to_string(),
        );

        let events = extractor.extract_all(&[record]);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].extraction_method, ExtractionMethod::RuleBased);
        assert_eq!(events[0].effect, Some(Effect::AvailabilityLoss));
    }

    struct FailingParser;

    impl DependencyParser for FailingParser {
        fn parse(&self, _sentence: &str) -> Result<ParsedSentence> {
            Err(PipelineError::Parser("model not loaded".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_parser_failure_is_not_fatal() {
        let extractor = HybridExtractor::new(Arc::new(FailingParser), &placeholder_config());
        let events = extractor.extract_sentence("s-8", "The attacker deployed a loader.");

        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.extraction_method != ExtractionMethod::DependencyParse));
        assert_eq!(extractor.parser_name(), "failing");
    }
}
