// file: src/utils/validation.rs
// description: input validation helpers for corpus paths, outputs and cli arguments
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

const MAX_WORKERS: usize = 256;

pub struct Validator;

impl Validator {
    /// Corpus input must be an existing file or directory.
    pub fn validate_input_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Input path does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() && !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Input path is neither a file nor a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Creates the output directory if needed; an existing file at that path is rejected.
    pub fn ensure_output_directory(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }

        fs::create_dir_all(path).map_err(|e| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn validate_workers(workers: usize) -> Result<()> {
        if workers == 0 {
            return Err(PipelineError::Validation(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        if workers > MAX_WORKERS {
            return Err(PipelineError::Validation(format!(
                "Worker count too large (max {})",
                MAX_WORKERS
            )));
        }

        Ok(())
    }

    /// Truncates on a character boundary, appending `...` when shortened.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }
}
