// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use cti_events::exporter::json::{EVENTS_FILE, NORMALIZED_FILE};
use cti_events::extractor::is_candidate_sentence;
use cti_events::normalizer::classify_noise;
use cti_events::parser::parser_from_config;
use cti_events::utils::logging::{
    format_distribution, format_error, format_step, format_success, format_warning,
};
use cti_events::{
    Config, EventStatistics, ExportManifest, HybridExtractor, JsonExporter, PipelineOrchestrator,
    RunCounts, TextNormalizer, load_normalized,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DISTRIBUTION_ROWS: usize = 10;

#[derive(Parser)]
#[command(name = "cti_events")]
#[command(version = "0.1.0")]
#[command(
    about = "Normalize threat-intelligence sentences and extract actor-action-object events",
    long_about = None
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Default)]
struct Overrides {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Parallel workers
    #[arg(short, long, value_name = "NUM")]
    workers: Option<usize>,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Hide progress bars
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter noise and normalize a JSONL corpus
    Normalize {
        /// Corpus file or directory; defaults to corpus.input_path
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Extract events from a previously written normalized.json
    Extract {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Precomputed dependency parses (JSONL)
        #[arg(long, value_name = "FILE")]
        parses: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Normalize, extract and export in one pass
    Run {
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long, value_name = "FILE")]
        parses: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Show how a single sentence is classified, normalized and extracted
    Inspect {
        text: String,

        #[arg(long, value_name = "FILE")]
        parses: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cti_events::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let outcome = match cli.command {
        Commands::Normalize {
            input,
            limit,
            overrides,
        } => {
            let mut config = apply_overrides(config, &overrides);
            config.corpus.limit = limit.or(config.corpus.limit);
            cmd_normalize(config, input).await
        }
        Commands::Extract {
            input,
            parses,
            overrides,
        } => {
            let mut config = apply_overrides(config, &overrides);
            config.extraction.parses_path = parses.or(config.extraction.parses_path);
            cmd_extract(config, &input).await
        }
        Commands::Run {
            input,
            limit,
            parses,
            overrides,
        } => {
            let mut config = apply_overrides(config, &overrides);
            config.corpus.limit = limit.or(config.corpus.limit);
            config.extraction.parses_path = parses.or(config.extraction.parses_path);
            cmd_run(config, input).await
        }
        Commands::Inspect { text, parses } => {
            let mut config = config;
            config.extraction.parses_path = parses.or(config.extraction.parses_path);
            cmd_inspect(&config, &text)
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }

    Ok(())
}

fn apply_overrides(mut config: Config, overrides: &Overrides) -> Config {
    if let Some(output) = &overrides.output {
        config.output.directory = output.clone();
    }
    if let Some(workers) = overrides.workers {
        config.pipeline.parallel_workers = workers;
    }
    if overrides.compact {
        config.output.pretty = false;
    }
    if overrides.no_progress {
        config.pipeline.show_progress = false;
    }
    config
}

fn corpus_input(config: &Config, input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| config.corpus.input_path.clone())
}

async fn cmd_normalize(config: Config, input: Option<PathBuf>) -> Result<()> {
    let input = corpus_input(&config, input);
    let output_dir = config.output.directory.clone();
    let pretty = config.output.pretty;

    println!("{}", format_step(1, 2, &format!("Normalizing {}", input.display())));
    let orchestrator =
        PipelineOrchestrator::new(config).context("Failed to initialize pipeline")?;
    let output = orchestrator
        .normalize_corpus(&input)
        .await
        .context("Normalization failed")?;

    println!("{}", format_step(2, 2, "Writing normalized records"));
    let exporter = JsonExporter::new(&output_dir, pretty)?;
    let path = exporter.write_normalized(&output.records)?;

    let counts = RunCounts {
        records_loaded: output.records_loaded,
        malformed_lines_skipped: output.skipped_lines,
        noise_dropped: output.noise.dropped,
        records_normalized: output.records.len(),
        ..RunCounts::default()
    };
    let manifest = ExportManifest::new(output.files, counts, vec![output.metrics], "none");
    exporter.write_manifest(&manifest)?;

    println!(
        "{}",
        format_success(&format!(
            "{} of {} records kept, written to {}",
            output.records.len(),
            output.records_loaded,
            path.display()
        ))
    );

    if output.noise.dropped > 0 {
        let dropped: Vec<(String, usize)> = output
            .noise
            .by_kind
            .iter()
            .map(|(kind, count)| (kind.as_str().to_string(), *count))
            .collect();
        println!(
            "{}",
            format_distribution(
                "Dropped as noise",
                dropped.iter().map(|(kind, count)| (kind, count)),
                DISTRIBUTION_ROWS
            )
        );
    }
    if output.skipped_lines > 0 {
        println!(
            "{}",
            format_warning(&format!("{} malformed lines skipped", output.skipped_lines))
        );
    }

    Ok(())
}

async fn cmd_extract(config: Config, input: &Path) -> Result<()> {
    let output_dir = config.output.directory.clone();
    let pretty = config.output.pretty;

    println!("{}", format_step(1, 2, &format!("Loading {}", input.display())));
    let records = load_normalized(input)
        .with_context(|| format!("Failed to read normalized records from {}", input.display()))?;

    let orchestrator =
        PipelineOrchestrator::new(config).context("Failed to initialize pipeline")?;
    let record_count = records.len();
    let output = orchestrator
        .extract_events(records)
        .await
        .context("Extraction failed")?;

    println!("{}", format_step(2, 2, "Writing events and statistics"));
    let exporter = JsonExporter::new(&output_dir, pretty)?;
    exporter.write_events(&output.events)?;
    exporter.write_statistics(&output.statistics)?;

    let counts = RunCounts {
        records_normalized: record_count,
        candidate_events: output.candidates,
        duplicates_removed: output.duplicates_removed,
        events: output.events.len(),
        ..RunCounts::default()
    };
    let manifest = ExportManifest::new(
        vec![],
        counts,
        vec![output.metrics],
        orchestrator.parser_name(),
    );
    exporter.write_manifest(&manifest)?;

    print_event_summary(&output.statistics, record_count, &output_dir.join(EVENTS_FILE));
    Ok(())
}

async fn cmd_run(config: Config, input: Option<PathBuf>) -> Result<()> {
    let input = corpus_input(&config, input);
    let output_dir = config.output.directory.clone();

    let orchestrator =
        PipelineOrchestrator::new(config).context("Failed to initialize pipeline")?;
    let summary = orchestrator
        .run(&input, &output_dir)
        .await
        .with_context(|| format!("Pipeline failed for {}", input.display()))?;

    println!(
        "{}",
        format_success(&format!(
            "{} records normalized to {}",
            summary.stats.records_normalized,
            output_dir.join(NORMALIZED_FILE).display()
        ))
    );
    print_event_summary(
        &summary.statistics,
        summary.stats.records_normalized,
        &output_dir.join(EVENTS_FILE),
    );
    println!("Run id: {}", summary.manifest.run_id);

    Ok(())
}

fn cmd_inspect(config: &Config, text: &str) -> Result<()> {
    let normalizer = TextNormalizer::new(&config.normalization);
    let parser = parser_from_config(&config.extraction).context("Failed to load parser")?;
    let extractor = HybridExtractor::new(parser, &config.extraction);

    match classify_noise(text) {
        Some(kind) => {
            println!("{}", format_warning(&format!("Noise: {}", kind.as_str())));
            return Ok(());
        }
        None => println!("{}", format_success("Not noise")),
    }

    let normalized = normalizer.normalize(text);
    println!("Normalized: {}", normalized);
    println!(
        "Candidate:  {}",
        if is_candidate_sentence(&normalized) { "yes" } else { "no" }
    );

    let events = extractor.extract_sentence("inspect", &normalized);
    if events.is_empty() {
        println!("{}", format_warning("No events extracted"));
    } else {
        println!("{}", serde_json::to_string_pretty(&events)?);
    }

    Ok(())
}

fn print_event_summary(statistics: &EventStatistics, sentences: usize, events_path: &Path) {
    println!(
        "{}",
        format_success(&format!(
            "{} events from {} sentences ({:.1}% of {}), avg confidence {:.3}, written to {}",
            statistics.total_events,
            statistics.unique_sentences,
            statistics.extraction_rate(sentences),
            sentences,
            statistics.avg_confidence,
            events_path.display()
        ))
    );

    if statistics.total_events == 0 {
        return;
    }

    println!(
        "{}",
        format_distribution(
            "Extraction methods",
            &statistics.extraction_methods,
            DISTRIBUTION_ROWS
        )
    );
    println!(
        "{}",
        format_distribution("Effects", &statistics.effect_distribution, DISTRIBUTION_ROWS)
    );
    println!(
        "{}",
        format_distribution("Top actors", &statistics.actor_distribution, DISTRIBUTION_ROWS)
    );
}
