// file: src/exporter/mod.rs
// description: export module exports
// reference: json output artifacts

pub mod json;

pub use json::{ExportManifest, JsonExporter, RunCounts, load_normalized};
