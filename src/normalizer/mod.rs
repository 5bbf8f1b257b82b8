// file: src/normalizer/mod.rs
// description: sentence normalization engine and module exports
// reference: noise filter first, then a fixed chain of rewrites per record

pub mod ioc;
pub mod markdown;
pub mod noise;
pub mod patterns;
pub mod structural;
pub mod title;

pub use ioc::{canonicalize_brackets, placehold};
pub use noise::{NoiseKind, classify_noise, is_noise};
pub use structural::{StructuralRule, rewrite};
pub use title::denoise_title;

use crate::config::NormalizationConfig;
use crate::models::SentenceRecord;
use crate::utils::Validator;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Counts of records dropped by the noise filter, per reason.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoiseReport {
    pub kept: usize,
    pub dropped: usize,
    pub by_kind: BTreeMap<NoiseKind, usize>,
}

impl NoiseReport {
    fn record_drop(&mut self, kind: NoiseKind) {
        self.dropped += 1;
        *self.by_kind.entry(kind).or_insert(0) += 1;
    }
}

pub struct TextNormalizer {
    rewrite_structures: bool,
    normalize_titles: bool,
}

impl TextNormalizer {
    pub fn new(config: &NormalizationConfig) -> Self {
        Self {
            rewrite_structures: config.rewrite_structures,
            normalize_titles: config.normalize_titles,
        }
    }

    /// Drops records whose raw text is structural noise. Survivors keep corpus order.
    pub fn filter_noise(&self, records: Vec<SentenceRecord>) -> (Vec<SentenceRecord>, NoiseReport) {
        let mut report = NoiseReport::default();
        let mut kept = Vec::with_capacity(records.len());

        for record in records {
            match classify_noise(record.raw_text()) {
                Some(kind) => {
                    debug!(
                        "Dropping {} as {}: {:?}",
                        record.sentence_id,
                        kind.as_str(),
                        Validator::truncate_text(record.raw_text(), 80)
                    );
                    report.record_drop(kind);
                }
                None => kept.push(record),
            }
        }

        report.kept = kept.len();
        (kept, report)
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = placehold(text);

        normalized = markdown::remove_markdown_links(&normalized);
        normalized = markdown::strip_bullet_markers(&normalized);
        normalized = markdown::strip_emphasis(&normalized);

        if self.rewrite_structures {
            normalized = rewrite(&normalized);
        }

        if self.normalize_titles {
            normalized = denoise_title(&normalized);
        }

        normalized.trim().to_string()
    }

    /// Rewrites `normalized_text` in place starting from the current value.
    pub fn normalize_record(&self, record: &mut SentenceRecord) {
        record.normalized_text = self.normalize(&record.normalized_text);
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            rewrite_structures: true,
            normalize_titles: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str, text: &str) -> SentenceRecord {
        SentenceRecord::new(id.to_string(), text.to_string())
    }

    #[test]
    fn test_normalize_chain() {
        let normalizer = TextNormalizer::default();

        assert_eq!(
            normalizer.normalize("- **Beacon** sent data to [the C2](https://c2.example.com/gate)"),
            "Beacon sent data to the C2"
        );
        assert_eq!(
            normalizer.normalize("## Security Overview"),
            "This section discusses Security Overview."
        );
        assert_eq!(
            normalizer.normalize("Figure 3: the attack chain"),
            "Figure 3 illustrates the attack chain."
        );
        assert_eq!(
            normalizer.normalize("Summary: The attacker gained persistent access to the network."),
            "The attacker gained persistent access to the network."
        );
    }

    #[test]
    fn test_placeholders_are_canonical_after_chain() {
        let normalizer = TextNormalizer::default();
        let normalized = normalizer.normalize("The implant contacted << URL > and 45.77.12.9");

        assert_eq!(normalized, "The implant contacted <URL> and <IP_ADDRESS>");
    }

    #[test]
    fn test_disabled_steps() {
        let normalizer = TextNormalizer::new(&NormalizationConfig {
            rewrite_structures: false,
            normalize_titles: false,
        });

        assert_eq!(normalizer.normalize("## Overview"), "## Overview");
        assert_eq!(
            normalizer.normalize("Summary: The attacker gained access to hosts."),
            "Summary: The attacker gained access to hosts."
        );
    }

    #[test]
    fn test_filter_noise_keeps_order_and_counts() {
        let normalizer = TextNormalizer::default();
        let records = vec![
            record("1", "2021"),
            record("2", "The attacker exfiltrated data."),
            record("3", "May 18, 2021"),
            record("4", "| a | b |"),
            record("5", "Lazarus deployed a loader."),
        ];

        let (kept, report) = normalizer.filter_noise(records);

        let ids: Vec<&str> = kept.iter().map(|r| r.sentence_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5"]);
        assert_eq!(report.kept, 2);
        assert_eq!(report.dropped, 3);
        // a bare year has no letters, so it is caught before the date check
        assert_eq!(report.by_kind.get(&NoiseKind::NoAlphabetic), Some(&1));
        assert_eq!(report.by_kind.get(&NoiseKind::DateOnly), Some(&1));
        assert_eq!(report.by_kind.get(&NoiseKind::MarkdownTable), Some(&1));
    }

    #[test]
    fn test_normalize_record_keeps_raw_text() {
        let normalizer = TextNormalizer::default();
        let mut sentence = record("s", "*Attackers* dropped files from http://x.io/a");

        normalizer.normalize_record(&mut sentence);

        assert_eq!(sentence.raw_text(), "*Attackers* dropped files from http://x.io/a");
        assert_eq!(sentence.normalized_text, "Attackers dropped files from <URL>");
    }
}
