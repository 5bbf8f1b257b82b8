// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;
mod stats;

pub use orchestrator::{ExtractionOutput, NormalizationOutput, PipelineOrchestrator, RunSummary};
pub use progress::{PipelineStats, ProgressTracker};
pub use stats::EventStatistics;
