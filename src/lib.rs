// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod corpus;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::{
    Config, CorpusConfig, DependencyScope, EmptyExtraction, ExtractionConfig, MalformedLinePolicy,
    NormalizationConfig, OutputConfig, PipelineConfig,
};
pub use corpus::{CorpusFile, CorpusReader, CorpusScanner};
pub use error::{PipelineError, Result};
pub use exporter::{ExportManifest, JsonExporter, RunCounts, load_normalized};
pub use extractor::{EventDeduplicator, HybridExtractor, Strategy};
pub use models::{Effect, Event, ExtractionMethod, IocType, RawRecord, SentenceRecord};
pub use normalizer::{NoiseKind, NoiseReport, StructuralRule, TextNormalizer};
pub use parser::{DependencyParser, NullParser, ParsedSentence, PrecomputedParser, Token};
pub use pipeline::{
    EventStatistics, ExtractionOutput, NormalizationOutput, PipelineOrchestrator, PipelineStats,
    ProgressTracker, RunSummary,
};
pub use utils::{OperationTimer, PerformanceMetrics, Validator};
