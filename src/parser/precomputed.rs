// file: src/parser/precomputed.rs
// description: dependency parser backed by a file of parses produced offline
// reference: one JSON object per line: {"text", "tokens": [...]}

use crate::error::{PipelineError, Result};
use crate::parser::dependency::{DependencyParser, ParsedSentence, Token};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct ParseLine {
    text: String,
    tokens: Vec<Token>,
}

/// Looks sentences up by exact normalized text.
#[derive(Debug, Default)]
pub struct PrecomputedParser {
    parses: HashMap<String, ParsedSentence>,
}

impl PrecomputedParser {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut parses = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parsed: ParseLine =
                serde_json::from_str(line).map_err(|e| PipelineError::CorpusParse {
                    file: path.display().to_string(),
                    line: index + 1,
                    message: e.to_string(),
                })?;

            if parses
                .insert(parsed.text.clone(), ParsedSentence::new(parsed.tokens))
                .is_some()
            {
                warn!("Duplicate parse for sentence on line {}, keeping the later one", index + 1);
            }
        }

        info!("Loaded {} precomputed parses from {}", parses.len(), path.display());

        Ok(Self { parses })
    }

    pub fn len(&self) -> usize {
        self.parses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parses.is_empty()
    }
}

impl DependencyParser for PrecomputedParser {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence> {
        Ok(self.parses.get(sentence).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PARSE_LINE: &str = r#"{"text":"Attackers deployed ransomware","tokens":[{"text":"Attackers","pos":"NOUN","lemma":"attacker","dep":"nsubj","head":1},{"text":"deployed","pos":"VERB","lemma":"deploy","dep":"ROOT","head":1},{"text":"ransomware","pos":"NOUN","lemma":"ransomware","dep":"dobj","head":1,"space_after":false}]}"#;

    #[test]
    fn test_load_and_lookup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("parses.jsonl");
        fs::write(&path, format!("{PARSE_LINE}\n\n")).unwrap();

        let parser = PrecomputedParser::load(&path).unwrap();
        assert_eq!(parser.len(), 1);

        let parsed = parser.parse("Attackers deployed ransomware").unwrap();
        assert_eq!(parsed.tokens.len(), 3);
        assert_eq!(parsed.tokens[1].lemma, "deploy");
        assert!(parsed.tokens[0].space_after);
        assert_eq!(parsed.children(1), vec![0, 2]);
    }

    #[test]
    fn test_unknown_sentence_is_empty_parse() {
        let parser = PrecomputedParser::default();
        assert!(parser.parse("never seen").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("parses.jsonl");
        fs::write(&path, format!("{PARSE_LINE}\n{{not json\n")).unwrap();

        let err = PrecomputedParser::load(&path).unwrap_err();
        match err {
            PipelineError::CorpusParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = PrecomputedParser::load(Path::new("/definitely/not/here.jsonl")).unwrap_err();
        assert!(matches!(err, PipelineError::FileOperation { .. }));
    }
}
