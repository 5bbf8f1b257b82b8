// file: src/extractor/mod.rs
// description: event extraction module exports
// reference: internal module structure

pub mod actors;
pub mod dependency;
pub mod detectors;
pub mod hybrid;
pub mod keyword;
pub mod passive;
pub mod patterns;
pub mod strategy;
pub mod vocabulary;

pub use hybrid::{EventDeduplicator, HybridExtractor};
pub use strategy::{SentenceContext, Strategy};
pub use vocabulary::is_candidate_sentence;
