// file: src/corpus/reader.rs
// description: line-delimited JSON corpus loader with a configurable malformed-line policy
// reference: one {"id", "text"} object per line

use crate::config::{CorpusConfig, MalformedLinePolicy};
use crate::corpus::scanner::CorpusFile;
use crate::error::{PipelineError, Result};
use crate::models::{RawRecord, SentenceRecord};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Records loaded from one or more corpus files, in corpus order.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub records: Vec<SentenceRecord>,
    pub skipped_lines: usize,
}

pub struct CorpusReader {
    limit: Option<usize>,
    on_malformed: MalformedLinePolicy,
}

impl CorpusReader {
    pub fn new(config: &CorpusConfig) -> Self {
        Self {
            limit: config.limit,
            on_malformed: config.on_malformed,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn read_files(&self, files: &[CorpusFile]) -> Result<LoadedCorpus> {
        let mut corpus = LoadedCorpus::default();

        for file in files {
            if self.limit_reached(corpus.records.len()) {
                break;
            }
            self.read_into(&file.path, &mut corpus)?;
        }

        info!(
            "Loaded {} records ({} malformed lines skipped)",
            corpus.records.len(),
            corpus.skipped_lines
        );
        Ok(corpus)
    }

    pub fn read_file(&self, path: &Path) -> Result<LoadedCorpus> {
        let mut corpus = LoadedCorpus::default();
        self.read_into(path, &mut corpus)?;
        Ok(corpus)
    }

    fn read_into(&self, path: &Path, corpus: &mut LoadedCorpus) -> Result<()> {
        let content = fs::read(path).map_err(|e| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Invalid UTF-8 is a malformed line, not a file error.
        for (index, bytes) in content.split(|byte| *byte == b'\n').enumerate() {
            if self.limit_reached(corpus.records.len()) {
                break;
            }

            let line = match decode_line(path, index + 1, bytes) {
                Ok(line) => line.trim(),
                Err(e) => {
                    self.on_malformed_line(e, corpus)?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match parse_line(path, index + 1, line) {
                Ok(raw) => corpus.records.push(SentenceRecord::from(raw)),
                Err(e) => self.on_malformed_line(e, corpus)?,
            }
        }

        Ok(())
    }

    fn on_malformed_line(&self, error: PipelineError, corpus: &mut LoadedCorpus) -> Result<()> {
        match self.on_malformed {
            MalformedLinePolicy::Skip => {
                warn!("Skipping malformed corpus line: {}", error);
                corpus.skipped_lines += 1;
                Ok(())
            }
            MalformedLinePolicy::Fail => Err(error),
        }
    }

    fn limit_reached(&self, loaded: usize) -> bool {
        self.limit.is_some_and(|limit| loaded >= limit)
    }
}

fn decode_line<'a>(path: &Path, line_number: usize, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| PipelineError::CorpusParse {
        file: path.display().to_string(),
        line: line_number,
        message: format!("invalid UTF-8: {e}"),
    })
}

fn parse_line(path: &Path, line_number: usize, line: &str) -> Result<RawRecord> {
    serde_json::from_str(line).map_err(|e| PipelineError::CorpusParse {
        file: path.display().to_string(),
        line: line_number,
        message: e.to_string(),
    })
}
