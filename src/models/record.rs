// file: src/models/record.rs
// description: corpus line and sentence record models
// reference: internal data structures

use crate::models::Event;
use serde::{Deserialize, Serialize};

/// One line of the raw line-delimited JSON corpus.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRecord {
    pub id: String,
    pub text: String,
}

/// A sentence moving through normalization and extraction.
///
/// `raw_text` is fixed at construction; only `normalized_text` is rewritten
/// by the normalization chain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentenceRecord {
    pub sentence_id: String,
    raw_text: String,
    pub normalized_text: String,
    #[serde(default, skip_serializing)]
    pub events: Vec<Event>,
}

impl SentenceRecord {
    pub fn new(sentence_id: String, raw_text: String) -> Self {
        Self {
            sentence_id,
            normalized_text: raw_text.clone(),
            raw_text,
            events: Vec::new(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl From<RawRecord> for SentenceRecord {
    fn from(raw: RawRecord) -> Self {
        Self::new(raw.id, raw.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_starts_with_raw_text() {
        let record = SentenceRecord::new("s-1".to_string(), "**Overview**".to_string());

        assert_eq!(record.raw_text(), "**Overview**");
        assert_eq!(record.normalized_text, "**Overview**");
        assert!(record.events.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = SentenceRecord::new("s-2".to_string(), "raw".to_string());
        record.normalized_text = "clean".to_string();

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["sentence_id"], "s-2");
        assert_eq!(value["raw_text"], "raw");
        assert_eq!(value["normalized_text"], "clean");
        assert!(value.get("events").is_none());
    }

    #[test]
    fn test_roundtrip_from_normalized_output() {
        let json = r#"{"sentence_id":"a","raw_text":"x","normalized_text":"y"}"#;
        let record: SentenceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.raw_text(), "x");
        assert_eq!(record.normalized_text, "y");
    }
}
