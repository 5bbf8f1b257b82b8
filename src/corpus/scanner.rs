// file: src/corpus/scanner.rs
// description: corpus file discovery with filtering and content digests
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::error::{PipelineError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const CORPUS_EXTENSIONS: &[&str] = &["jsonl", "json"];

pub struct CorpusScanner {
    skip_patterns: Vec<String>,
    max_file_size_mb: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
    pub sha256: String,
}

impl CorpusScanner {
    pub fn new(config: &CorpusConfig) -> Self {
        Self {
            skip_patterns: config.skip_patterns.clone(),
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    /// A single file is taken as-is; a directory is walked for corpus files,
    /// returned sorted by relative path.
    pub fn discover(&self, input: &Path) -> Result<Vec<CorpusFile>> {
        let metadata = fs::metadata(input).map_err(|e| PipelineError::FileOperation {
            path: input.to_path_buf(),
            source: e,
        })?;

        if metadata.is_file() {
            self.check_size(input, metadata.len())?;
            let relative_path = input
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| input.to_string_lossy().to_string());
            return Ok(vec![Self::describe(input, relative_path, metadata.len())?]);
        }

        self.scan_directory(input)
    }

    fn scan_directory(&self, root: &Path) -> Result<Vec<CorpusFile>> {
        info!("Scanning corpus directory: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if let Some(extension) = path.extension()
                && CORPUS_EXTENSIONS.iter().any(|ext| extension == *ext)
                && let Ok(metadata) = entry.metadata()
            {
                let size = metadata.len();

                if size > self.max_bytes() {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                let relative_path = path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .to_string();

                files.push(Self::describe(path, relative_path, size)?);
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!("Found {} corpus files", files.len());
        Ok(files)
    }

    fn max_bytes(&self) -> u64 {
        (self.max_file_size_mb as u64) * 1024 * 1024
    }

    fn check_size(&self, path: &Path, size: u64) -> Result<()> {
        if size > self.max_bytes() {
            return Err(PipelineError::Validation(format!(
                "Corpus file exceeds {} MB: {}",
                self.max_file_size_mb,
                path.display()
            )));
        }
        Ok(())
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.skip_patterns.iter().any(|pattern| {
            if let Some(dir) = pattern.strip_suffix("/*") {
                path_str.contains(&format!("{dir}/"))
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                path_str.ends_with(suffix)
            } else {
                path_str.contains(pattern.as_str())
            }
        })
    }

    fn describe(path: &Path, relative_path: String, size: u64) -> Result<CorpusFile> {
        Ok(CorpusFile {
            path: path.to_path_buf(),
            relative_path,
            size,
            sha256: compute_file_hash(path)?,
        })
    }
}

pub fn compute_file_hash(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MalformedLinePolicy;
    use std::fs;
    use tempfile::TempDir;

    fn corpus_config(skip_patterns: Vec<String>) -> CorpusConfig {
        CorpusConfig {
            input_path: PathBuf::from("unused"),
            limit: None,
            on_malformed: MalformedLinePolicy::Skip,
            skip_patterns,
            max_file_size_mb: 10,
        }
    }

    #[test]
    fn test_scan_directory_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("b.jsonl"), "{}").unwrap();
        fs::write(temp.path().join("nested").join("a.json"), "{}").unwrap();
        fs::write(temp.path().join("notes.md"), "# not corpus").unwrap();
        fs::write(temp.path().join("scratch.tmp.jsonl"), "{}").unwrap();

        let scanner = CorpusScanner::new(&corpus_config(vec!["scratch".to_string()]));
        let files = scanner.discover(temp.path()).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["b.jsonl", "nested/a.json"]);
    }

    #[test]
    fn test_single_file_input_and_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("corpus.txt");
        fs::write(&path, "abc").unwrap();

        let scanner = CorpusScanner::new(&corpus_config(vec![]));
        let files = scanner.discover(&path).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "corpus.txt");
        assert_eq!(files[0].size, 3);
        assert_eq!(
            files[0].sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_skip_patterns() {
        let scanner = CorpusScanner::new(&corpus_config(vec![
            "*.tmp".to_string(),
            ".git/*".to_string(),
        ]));

        assert!(scanner.should_skip(Path::new("data/cache.tmp")));
        assert!(scanner.should_skip(Path::new("repo/.git/objects/x.json")));
        assert!(!scanner.should_skip(Path::new("data/train.jsonl")));
    }

    #[test]
    fn test_missing_input() {
        let scanner = CorpusScanner::new(&corpus_config(vec![]));
        let err = scanner.discover(Path::new("/no/such/corpus")).unwrap_err();
        assert!(matches!(err, PipelineError::FileOperation { .. }));
    }
}
