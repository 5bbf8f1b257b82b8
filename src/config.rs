// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub normalization: NormalizationConfig,
    pub extraction: ExtractionConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub on_malformed: MalformedLinePolicy,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

/// What to do with a corpus line that is not a valid `{id, text}` record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizationConfig {
    pub rewrite_structures: bool,
    pub normalize_titles: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub dependency_scope: DependencyScope,
    #[serde(default)]
    pub empty_extraction: EmptyExtraction,
    #[serde(default)]
    pub parses_path: Option<PathBuf>,
}

/// Which verb tokens the dependency strategy inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyScope {
    /// Only the sentence's root predicate: at most one dependency event per sentence.
    #[default]
    Root,
    /// Every verb token whose lemma is an action.
    AllVerbs,
}

/// Output contract for a sentence that passes the candidate gate but yields no event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyExtraction {
    #[default]
    Omit,
    /// One event with every role null, tagged `no_event`.
    Placeholder,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CTI_EVENTS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                input_path: PathBuf::from("data/raw/annoctr_train.json"),
                limit: None,
                on_malformed: MalformedLinePolicy::Skip,
                skip_patterns: vec![".git/*".to_string(), "*.tmp".to_string()],
                max_file_size_mb: 256,
            },
            normalization: NormalizationConfig {
                rewrite_structures: true,
                normalize_titles: true,
            },
            extraction: ExtractionConfig {
                dependency_scope: DependencyScope::Root,
                empty_extraction: EmptyExtraction::Omit,
                parses_path: None,
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
                show_progress: true,
            },
            output: OutputConfig {
                directory: PathBuf::from("./outputs"),
                pretty: true,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.corpus.max_file_size_mb == 0 {
            return Err(PipelineError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
