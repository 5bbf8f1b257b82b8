// file: src/pipeline/orchestrator.rs
// description: coordinates corpus loading, normalization, extraction and export
// reference: orchestrates the asynchronous worker-pool workflow

use crate::config::Config;
use crate::corpus::{CorpusFile, CorpusReader, CorpusScanner};
use crate::error::{PipelineError, Result};
use crate::exporter::{ExportManifest, JsonExporter, RunCounts};
use crate::extractor::{EventDeduplicator, HybridExtractor};
use crate::models::{Event, SentenceRecord};
use crate::normalizer::{NoiseReport, TextNormalizer};
use crate::parser::{DependencyParser, parser_from_config};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::pipeline::stats::EventStatistics;
use crate::utils::{OperationTimer, PerformanceMetrics, Validator};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{info, warn};

/// Normalized records plus everything learned while producing them.
#[derive(Debug)]
pub struct NormalizationOutput {
    pub files: Vec<CorpusFile>,
    pub records: Vec<SentenceRecord>,
    pub records_loaded: usize,
    pub skipped_lines: usize,
    pub noise: NoiseReport,
    pub metrics: PerformanceMetrics,
}

#[derive(Debug)]
pub struct ExtractionOutput {
    /// Input records with their deduplicated events attached.
    pub records: Vec<SentenceRecord>,
    pub events: Vec<Event>,
    pub candidates: usize,
    pub duplicates_removed: usize,
    pub statistics: EventStatistics,
    pub metrics: PerformanceMetrics,
}

#[derive(Debug)]
pub struct RunSummary {
    pub stats: PipelineStats,
    pub statistics: EventStatistics,
    pub manifest: ExportManifest,
}

pub struct PipelineOrchestrator {
    config: Config,
    normalizer: Arc<TextNormalizer>,
    extractor: Arc<HybridExtractor>,
    parallel_workers: usize,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        let parser = parser_from_config(&config.extraction)?;
        Self::with_parser(config, parser)
    }

    pub fn with_parser(config: Config, parser: Arc<dyn DependencyParser>) -> Result<Self> {
        config.validate()?;
        Validator::validate_workers(config.pipeline.parallel_workers)?;

        let normalizer = Arc::new(TextNormalizer::new(&config.normalization));
        let extractor = Arc::new(HybridExtractor::new(parser, &config.extraction));
        let parallel_workers = config.pipeline.parallel_workers;

        Ok(Self {
            config,
            normalizer,
            extractor,
            parallel_workers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser_name(&self) -> &'static str {
        self.extractor.parser_name()
    }

    /// Loads the corpus under `input`, drops noise and normalizes the survivors.
    pub async fn normalize_corpus(&self, input: &Path) -> Result<NormalizationOutput> {
        Validator::validate_input_path(input)?;
        let timer = OperationTimer::new("normalize");

        let scanner = CorpusScanner::new(&self.config.corpus);
        let reader = CorpusReader::new(&self.config.corpus);
        let input_path = input.to_path_buf();

        let (files, corpus) = tokio::task::spawn_blocking(move || -> Result<_> {
            let files = scanner.discover(&input_path)?;
            let corpus = reader.read_files(&files)?;
            Ok((files, corpus))
        })
        .await
        .map_err(|e| task_failed("Corpus loading", e))??;

        if corpus.records.is_empty() {
            warn!("No records found under {}", input.display());
        }
        timer.checkpoint(&format!("loaded {} records", corpus.records.len()));

        let records_loaded = corpus.records.len();
        let (kept, noise) = self.normalizer.filter_noise(corpus.records);
        info!(
            "Noise filter kept {} of {} records ({} dropped)",
            noise.kept, records_loaded, noise.dropped
        );

        let records = self.normalize_records(kept).await?;
        let metrics = timer.finish_with_count(records_loaded);

        Ok(NormalizationOutput {
            files,
            records,
            records_loaded,
            skipped_lines: corpus.skipped_lines,
            noise,
            metrics,
        })
    }

    /// Runs the rewrite chain over records that already passed the noise filter.
    pub async fn normalize_records(&self, records: Vec<SentenceRecord>) -> Result<Vec<SentenceRecord>> {
        let progress = self.progress("Normalizing", records.len());

        let results: Vec<std::result::Result<SentenceRecord, JoinError>> =
            stream::iter(records.into_iter().map(|mut record| {
                let normalizer = Arc::clone(&self.normalizer);
                tokio::task::spawn_blocking(move || {
                    normalizer.normalize_record(&mut record);
                    record
                })
            }))
            .buffered(self.parallel_workers)
            .inspect(|_| progress.inc_completed())
            .collect()
            .await;

        progress.finish();

        results
            .into_iter()
            .map(|result| result.map_err(|e| task_failed("Normalization", e)))
            .collect()
    }

    /// Extracts events from normalized records. Workers run in parallel but
    /// results are consumed in input order, so deduplication is deterministic.
    pub async fn extract_events(&self, records: Vec<SentenceRecord>) -> Result<ExtractionOutput> {
        let timer = OperationTimer::new("extract");
        let progress = self.progress("Extracting", records.len());

        info!(
            "Extracting events from {} records with {} workers (parser: {})",
            records.len(),
            self.parallel_workers,
            self.extractor.parser_name()
        );

        let jobs: Vec<(String, String)> = records
            .iter()
            .map(|record| (record.sentence_id.clone(), record.normalized_text.clone()))
            .collect();

        let results: Vec<std::result::Result<Vec<Event>, JoinError>> =
            stream::iter(jobs.into_iter().map(|(sentence_id, text)| {
                let extractor = Arc::clone(&self.extractor);
                tokio::task::spawn_blocking(move || extractor.extract_sentence(&sentence_id, &text))
            }))
            .buffered(self.parallel_workers)
            .inspect(|result| {
                progress.inc_completed();
                if let Ok(events) = result {
                    progress.add_events(events.len());
                }
            })
            .collect()
            .await;

        progress.finish();

        let mut deduplicator = EventDeduplicator::new();
        let mut records = records;
        let mut events = Vec::new();
        let mut candidates = 0;

        for (record, result) in records.iter_mut().zip(results) {
            let candidate_events = result.map_err(|e| task_failed("Extraction", e))?;
            candidates += candidate_events.len();
            record.events = deduplicator.deduplicate(candidate_events);
            events.extend(record.events.iter().cloned());
        }

        timer.checkpoint(&format!(
            "{} candidates, {} duplicates removed",
            candidates,
            deduplicator.duplicates()
        ));

        let statistics = EventStatistics::from_events(&events);
        let metrics = timer.finish_with_count(records.len());

        Ok(ExtractionOutput {
            records,
            events,
            candidates,
            duplicates_removed: deduplicator.duplicates(),
            statistics,
            metrics,
        })
    }

    /// Full pipeline: normalize, extract, then write every output file.
    pub async fn run(&self, input: &Path, output_dir: &Path) -> Result<RunSummary> {
        info!("Starting event extraction pipeline on {}", input.display());
        let started = OperationTimer::new("pipeline");

        let normalized = self.normalize_corpus(input).await?;
        let extracted = self.extract_events(normalized.records).await?;

        let exporter = JsonExporter::new(output_dir, self.config.output.pretty)?;
        exporter.write_normalized(&extracted.records)?;
        exporter.write_events(&extracted.events)?;
        exporter.write_statistics(&extracted.statistics)?;

        let counts = RunCounts {
            records_loaded: normalized.records_loaded,
            malformed_lines_skipped: normalized.skipped_lines,
            noise_dropped: normalized.noise.dropped,
            records_normalized: extracted.records.len(),
            candidate_events: extracted.candidates,
            duplicates_removed: extracted.duplicates_removed,
            events: extracted.events.len(),
        };

        let manifest = ExportManifest::new(
            normalized.files,
            counts,
            vec![normalized.metrics, extracted.metrics],
            self.extractor.parser_name(),
        );
        exporter.write_manifest(&manifest)?;

        let stats = PipelineStats {
            records_loaded: normalized.records_loaded,
            records_dropped: normalized.noise.dropped,
            records_normalized: extracted.records.len(),
            sentences_with_events: extracted.statistics.unique_sentences,
            events_extracted: extracted.events.len(),
            duplicates_removed: extracted.duplicates_removed,
            duration_secs: started.elapsed().as_secs_f64(),
        };
        log_final_stats(&stats);

        Ok(RunSummary {
            stats,
            statistics: extracted.statistics,
            manifest,
        })
    }

    fn progress(&self, stage: &str, total: usize) -> ProgressTracker {
        if self.config.pipeline.show_progress {
            ProgressTracker::new(stage, total)
        } else {
            ProgressTracker::hidden()
        }
    }
}

fn task_failed(stage: &str, error: JoinError) -> PipelineError {
    PipelineError::Task(format!("{} task failed: {}", stage, error))
}

fn log_final_stats(stats: &PipelineStats) {
    info!("Pipeline completed in {:.2}s", stats.duration_secs);
    info!(
        "Records: {} loaded, {} dropped as noise, {} normalized ({:.1}% kept)",
        stats.records_loaded,
        stats.records_dropped,
        stats.records_normalized,
        stats.survival_rate()
    );
    info!(
        "Events: {} extracted from {} sentences ({} duplicates removed)",
        stats.events_extracted, stats.sentences_with_events, stats.duplicates_removed
    );
    info!("Throughput: {:.1} records/sec", stats.records_per_second());
}
