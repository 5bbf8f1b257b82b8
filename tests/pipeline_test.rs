// file: tests/pipeline_test.rs
// description: end-to-end pipeline run over a corpus written to disk
// reference: exercises the public library api and the exported json files

use cti_events::{Config, PipelineOrchestrator, load_normalized};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CORPUS: &[&str] = &[
    r#"{"id": "s1", "text": "The Lazarus group deployed a backdoor"}"#,
    r#"{"id": "s2", "text": "| Indicator | Type |"}"#,
    r#"{"id": "s3", "text": "The malware connected to http://evil.example/gate every hour."}"#,
    r#"{"id": "s4", "text": "Summary: The attackers exploited CVE-2021-44228 against exposed servers."}"#,
];

const PARSES: &str = r#"{"text": "The Lazarus group deployed a backdoor", "tokens": [
{"text": "The", "pos": "DET", "lemma": "the", "dep": "det", "head": 2},
{"text": "Lazarus", "pos": "PROPN", "lemma": "Lazarus", "dep": "compound", "head": 2},
{"text": "group", "pos": "NOUN", "lemma": "group", "dep": "nsubj", "head": 3},
{"text": "deployed", "pos": "VERB", "lemma": "deploy", "dep": "ROOT", "head": 3},
{"text": "a", "pos": "DET", "lemma": "a", "dep": "det", "head": 5},
{"text": "backdoor", "pos": "NOUN", "lemma": "backdoor", "dep": "dobj", "head": 3, "space_after": false}]}"#;

struct Fixture {
    _temp: TempDir,
    corpus: PathBuf,
    output: PathBuf,
    config: Config,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();

    let corpus = temp.path().join("corpus");
    fs::create_dir_all(&corpus).unwrap();
    fs::write(corpus.join("train.jsonl"), CORPUS.join("\n")).unwrap();
    fs::write(corpus.join("notes.txt"), "not part of the corpus").unwrap();

    // the parse line must be a single JSONL line
    let parses = temp.path().join("parses.jsonl");
    fs::write(&parses, PARSES.replace('\n', "")).unwrap();

    let output = temp.path().join("outputs");

    let mut config = Config::default_config();
    config.pipeline.parallel_workers = 2;
    config.pipeline.show_progress = false;
    config.extraction.parses_path = Some(parses);
    config.output.directory = output.clone();

    Fixture {
        _temp: temp,
        corpus,
        output,
        config,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn events_for<'a>(events: &'a [Value], sentence_id: &str) -> Vec<&'a Value> {
    events
        .iter()
        .filter(|event| event["source_sentence_id"] == sentence_id)
        .collect()
}

#[test]
fn test_run_writes_all_outputs() {
    let fixture = fixture();
    let orchestrator = PipelineOrchestrator::new(fixture.config.clone()).unwrap();

    let summary =
        tokio_test::block_on(orchestrator.run(&fixture.corpus, &fixture.output)).unwrap();

    for name in ["normalized.json", "events.json", "statistics.json", "manifest.json"] {
        assert!(fixture.output.join(name).is_file(), "{} missing", name);
    }

    let normalized = read_json(&fixture.output.join("normalized.json"));
    let normalized = normalized.as_array().unwrap();
    let ids: Vec<&str> = normalized
        .iter()
        .map(|record| record["sentence_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["s1", "s3", "s4"]);
    assert_eq!(
        normalized[1]["normalized_text"],
        "The malware connected to <URL> every hour."
    );
    assert_eq!(
        normalized[2]["normalized_text"],
        "The attackers exploited CVE-2021-44228 against exposed servers."
    );
    assert_eq!(
        normalized[2]["raw_text"],
        "Summary: The attackers exploited CVE-2021-44228 against exposed servers."
    );

    assert_eq!(summary.stats.records_loaded, 4);
    assert_eq!(summary.stats.records_dropped, 1);
    assert_eq!(summary.stats.records_normalized, 3);
}

#[test]
fn test_events_from_every_strategy_family() {
    let fixture = fixture();
    let orchestrator = PipelineOrchestrator::new(fixture.config.clone()).unwrap();
    tokio_test::block_on(orchestrator.run(&fixture.corpus, &fixture.output)).unwrap();

    let events = read_json(&fixture.output.join("events.json"));
    let events = events.as_array().unwrap();

    let s1 = events_for(events, "s1");
    assert!(s1.iter().any(|event| {
        event["extraction_method"] == "dependency_parse"
            && event["actor"] == "The Lazarus group"
            && event["action"] == "deploy"
            && event["object"] == "a backdoor"
            && event["effect"] == "persistence"
    }));

    let s3 = events_for(events, "s3");
    assert!(s3.iter().any(|event| {
        event["extraction_method"] == "ioc_pattern"
            && event["action"] == "established_c2_connection"
            && event["object"] == "remote_server"
            && event["effect"] == "command_and_control"
    }));

    let s4 = events_for(events, "s4");
    assert!(s4.iter().any(|event| {
        event["extraction_method"] == "vulnerability_pattern"
            && event["object"] == "CVE-2021-44228"
            && event["effect"] == "initial_access"
            && event["confidence"] == 0.85
    }));

    let keys: HashSet<String> = events
        .iter()
        .map(|event| {
            format!(
                "{}|{}|{}|{}",
                event["actor"], event["action"], event["object"], event["source_sentence_id"]
            )
        })
        .collect();
    assert_eq!(keys.len(), events.len());
}

#[test]
fn test_statistics_and_manifest_agree() {
    let fixture = fixture();
    let orchestrator = PipelineOrchestrator::new(fixture.config.clone()).unwrap();
    let summary =
        tokio_test::block_on(orchestrator.run(&fixture.corpus, &fixture.output)).unwrap();

    let events = read_json(&fixture.output.join("events.json"));
    let statistics = read_json(&fixture.output.join("statistics.json"));
    let manifest = read_json(&fixture.output.join("manifest.json"));

    let total = events.as_array().unwrap().len();
    assert_eq!(statistics["total_events"], total);
    assert_eq!(statistics["unique_sentences"], 3);
    assert_eq!(summary.statistics.total_events, total);

    assert_eq!(manifest["parser"], "precomputed");
    assert_eq!(manifest["counts"]["records_loaded"], 4);
    assert_eq!(manifest["counts"]["noise_dropped"], 1);
    assert_eq!(manifest["counts"]["events"], total);

    let inputs = manifest["input_files"].as_array().unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0]["relative_path"], "train.jsonl");
    assert_eq!(inputs[0]["sha256"].as_str().unwrap().len(), 64);

    let stages: Vec<&str> = manifest["stages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|stage| stage["operation"].as_str().unwrap())
        .collect();
    assert_eq!(stages, vec!["normalize", "extract"]);
    assert_eq!(manifest["files"].as_array().unwrap().len(), 3);
}

#[test]
fn test_extract_from_reloaded_records_matches_run() {
    let fixture = fixture();
    let orchestrator = PipelineOrchestrator::new(fixture.config.clone()).unwrap();
    tokio_test::block_on(orchestrator.run(&fixture.corpus, &fixture.output)).unwrap();

    let records = load_normalized(&fixture.output.join("normalized.json")).unwrap();
    let reextracted = tokio_test::block_on(orchestrator.extract_events(records)).unwrap();

    let written = read_json(&fixture.output.join("events.json"));
    assert_eq!(serde_json::to_value(&reextracted.events).unwrap(), written);
}

#[test]
fn test_without_parses_dependency_events_disappear() {
    let mut fixture = fixture();
    fixture.config.extraction.parses_path = None;
    let orchestrator = PipelineOrchestrator::new(fixture.config.clone()).unwrap();

    let normalized = tokio_test::block_on(orchestrator.normalize_corpus(&fixture.corpus)).unwrap();
    let extracted = tokio_test::block_on(orchestrator.extract_events(normalized.records)).unwrap();

    assert!(!extracted.events.is_empty());
    assert_eq!(
        extracted.statistics.extraction_methods.get("dependency_parse"),
        None
    );
}
