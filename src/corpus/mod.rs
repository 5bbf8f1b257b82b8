// file: src/corpus/mod.rs
// description: corpus discovery and loading module exports
// reference: internal module structure

pub mod reader;
pub mod scanner;

pub use reader::{CorpusReader, LoadedCorpus};
pub use scanner::{CorpusFile, CorpusScanner, compute_file_hash};
