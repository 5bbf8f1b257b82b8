// file: src/pipeline/stats.rs
// description: summary statistics over an extracted event set
// reference: distributions keyed by method, effect and actor

use crate::models::Event;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStatistics {
    pub total_events: usize,
    pub unique_sentences: usize,
    pub avg_confidence: f64,
    pub extraction_methods: BTreeMap<String, usize>,
    pub effect_distribution: BTreeMap<String, usize>,
    pub actor_distribution: BTreeMap<String, usize>,
}

impl EventStatistics {
    pub fn from_events(events: &[Event]) -> Self {
        if events.is_empty() {
            return Self::default();
        }

        let unique_sentences = events
            .iter()
            .map(|event| event.source_sentence_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let total_confidence: f64 = events.iter().map(|event| event.confidence).sum();
        let avg_confidence = round3(total_confidence / events.len() as f64);

        let mut stats = Self {
            total_events: events.len(),
            unique_sentences,
            avg_confidence,
            ..Self::default()
        };

        for event in events {
            bump(&mut stats.extraction_methods, event.extraction_method.as_str());
            bump(
                &mut stats.effect_distribution,
                event.effect.map(|effect| effect.as_str()).unwrap_or(UNKNOWN),
            );
            bump(
                &mut stats.actor_distribution,
                event.actor.as_deref().unwrap_or(UNKNOWN),
            );
        }

        stats
    }

    /// Percentage of `sentences` that produced at least one event.
    pub fn extraction_rate(&self, sentences: usize) -> f64 {
        if sentences == 0 {
            return 0.0;
        }
        (self.unique_sentences as f64 / sentences as f64) * 100.0
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionMethod;

    fn event(actor: Option<&str>, action: Option<&str>, method: ExtractionMethod, id: &str) -> Event {
        Event::new(
            actor.map(str::to_string),
            action.map(str::to_string),
            Some("system".to_string()),
            method,
        )
        .with_sentence_id(id)
    }

    #[test]
    fn test_empty_statistics() {
        let stats = EventStatistics::from_events(&[]);

        assert_eq!(stats, EventStatistics::default());
        assert_eq!(stats.avg_confidence, 0.0);
        assert_eq!(stats.extraction_rate(0), 0.0);
    }

    #[test]
    fn test_distributions() {
        let events = vec![
            event(Some("lazarus"), Some("deployed"), ExtractionMethod::RuleBased, "s1"),
            event(Some("lazarus"), Some("exfiltrated"), ExtractionMethod::DependencyParse, "s1"),
            event(None, Some("observed"), ExtractionMethod::VulnerabilityPattern, "s2"),
            Event::placeholder().with_sentence_id("s3"),
        ];

        let stats = EventStatistics::from_events(&events);

        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.unique_sentences, 3);
        // (0.70 + 0.65 + 0.85 + 0.0) / 4 = 0.55
        assert_eq!(stats.avg_confidence, 0.55);
        assert_eq!(stats.extraction_methods["rule_based"], 1);
        assert_eq!(stats.extraction_methods["no_event"], 1);
        assert_eq!(stats.effect_distribution["persistence"], 1);
        assert_eq!(stats.effect_distribution["security_impact"], 1);
        assert_eq!(stats.effect_distribution["unknown"], 1);
        assert_eq!(stats.actor_distribution["lazarus"], 2);
        assert_eq!(stats.actor_distribution["unknown"], 2);
        assert_eq!(stats.extraction_rate(6), 50.0);
    }

    #[test]
    fn test_average_is_rounded() {
        let events = vec![
            event(Some("a"), Some("x"), ExtractionMethod::RuleBased, "1"),
            event(Some("b"), Some("x"), ExtractionMethod::RuleBased, "1"),
            event(Some("c"), Some("x"), ExtractionMethod::DependencyParse, "1"),
        ];

        let stats = EventStatistics::from_events(&events);
        // 2.05 / 3 = 0.68333...
        assert_eq!(stats.avg_confidence, 0.683);
    }
}
