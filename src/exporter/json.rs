// file: src/exporter/json.rs
// description: json export of normalized records, events, statistics and the run manifest
// reference: one file per artifact in the output directory

use crate::corpus::CorpusFile;
use crate::error::{PipelineError, Result};
use crate::models::{Event, SentenceRecord};
use crate::pipeline::EventStatistics;
use crate::utils::{PerformanceMetrics, Validator};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

pub const NORMALIZED_FILE: &str = "normalized.json";
pub const EVENTS_FILE: &str = "events.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunCounts {
    pub records_loaded: usize,
    pub malformed_lines_skipped: usize,
    pub noise_dropped: usize,
    pub records_normalized: usize,
    pub candidate_events: usize,
    pub duplicates_removed: usize,
    pub events: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub run_id: Uuid,
    pub exported_at: String,
    pub parser: String,
    pub input_files: Vec<CorpusFile>,
    pub counts: RunCounts,
    pub stages: Vec<PerformanceMetrics>,
    pub files: Vec<String>,
}

impl ExportManifest {
    pub fn new(
        input_files: Vec<CorpusFile>,
        counts: RunCounts,
        stages: Vec<PerformanceMetrics>,
        parser: &str,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            exported_at: Utc::now().to_rfc3339(),
            parser: parser.to_string(),
            input_files,
            counts,
            stages,
            files: Vec::new(),
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        Validator::ensure_output_directory(&output_dir)?;
        Ok(Self { output_dir, pretty })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write_normalized(&self, records: &[SentenceRecord]) -> Result<PathBuf> {
        let path = self.write(NORMALIZED_FILE, records)?;
        info!("Wrote {} normalized records to {}", records.len(), path.display());
        Ok(path)
    }

    pub fn write_events(&self, events: &[Event]) -> Result<PathBuf> {
        let path = self.write(EVENTS_FILE, events)?;
        info!("Wrote {} events to {}", events.len(), path.display());
        Ok(path)
    }

    pub fn write_statistics(&self, statistics: &EventStatistics) -> Result<PathBuf> {
        self.write(STATISTICS_FILE, statistics)
    }

    /// Records which artifacts exist next to the manifest, then writes it.
    pub fn write_manifest(&self, manifest: &ExportManifest) -> Result<PathBuf> {
        let mut manifest = manifest.clone();
        manifest.files = [NORMALIZED_FILE, EVENTS_FILE, STATISTICS_FILE]
            .iter()
            .filter(|name| self.output_dir.join(name).is_file())
            .map(|name| name.to_string())
            .collect();

        let path = self.write(MANIFEST_FILE, &manifest)?;
        info!("Export complete: run {} at {}", manifest.run_id, path.display());
        Ok(path)
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(&path, json).map_err(|e| PipelineError::FileOperation {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

/// Reads a `normalized.json` written by a previous run.
pub fn load_normalized(path: &Path) -> Result<Vec<SentenceRecord>> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}
