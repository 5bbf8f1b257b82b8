// file: src/parser/mod.rs
// description: dependency parser interface and implementations
// reference: internal module structure

pub mod dependency;
pub mod precomputed;

pub use dependency::{DependencyParser, NullParser, ParsedSentence, Token};
pub use precomputed::PrecomputedParser;

use crate::config::ExtractionConfig;
use crate::error::Result;
use std::sync::Arc;

/// Precomputed parses when configured, otherwise the null parser.
pub fn parser_from_config(config: &ExtractionConfig) -> Result<Arc<dyn DependencyParser>> {
    match &config.parses_path {
        Some(path) => Ok(Arc::new(PrecomputedParser::load(path)?)),
        None => Ok(Arc::new(NullParser)),
    }
}
