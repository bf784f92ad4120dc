//! Command implementations for the Solace CLI.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::TrainingCorpus;
use crate::engine::{EngineConfig, ResponseEngine};
use crate::error::LoadFailure;
use crate::ml::intent_classifier::Classifier;
use crate::store::{FileModelStore, ModelStore, decode_artifact, read_header};

/// Execute a CLI command.
pub fn execute_command(args: SolaceArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Chat(chat_args) => chat(chat_args, &args),
        Command::Inspect => inspect(&args),
    }
}

/// Build the engine configuration from the config file and CLI overrides.
pub fn load_config(args: &SolaceArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(corpus) = &args.corpus {
        config.corpus_path = Some(corpus.clone());
    }
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    Ok(config)
}

fn load_corpus(config: &EngineConfig) -> Result<TrainingCorpus> {
    match &config.corpus_path {
        Some(path) => TrainingCorpus::from_json_file(path)
            .with_context(|| format!("Failed to load corpus from {}", path.display())),
        None => Ok(TrainingCorpus::builtin()),
    }
}

fn build_engine(config: EngineConfig) -> Result<ResponseEngine> {
    ResponseEngine::from_config(config).context("Failed to create response engine")
}

/// Train a model and save the artifact.
fn train(args: &TrainArgs, cli_args: &SolaceArgs) -> Result<()> {
    let config = load_config(cli_args)?;

    if args.dry_run {
        let corpus = load_corpus(&config)?;
        let stats = corpus.validate().context("Corpus cannot be trained")?;
        return output_result(
            "Corpus is valid",
            &DryRunResult {
                documents: stats.documents,
                intents: stats.intents,
                responses: stats.responses,
                intents_without_responses: stats.intents_without_responses,
                intents_without_utterances: stats.intents_without_utterances,
            },
            cli_args,
        );
    }

    let model_path = config.model_path.display().to_string();
    let engine = build_engine(config)?;
    let report = engine.retrain().context("Training failed")?;
    if !report.saved {
        bail!("Model trained but could not be saved to {model_path}");
    }

    output_result(
        "Model trained successfully",
        &TrainResult { model_path, report },
        cli_args,
    )
}

/// Classify a single message.
fn classify(args: &ClassifyArgs, cli_args: &SolaceArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(threshold) = args.threshold {
        config.confidence_threshold = threshold;
    }

    let engine = build_engine(config)?;
    let response = engine.classify(&args.text);
    let scores = if args.scores {
        Some(engine.distribution(&args.text)?.ranked())
    } else {
        None
    };

    output_result(
        "Classification",
        &ClassifyResult { response, scores },
        cli_args,
    )
}

/// Reply to each line read from stdin.
fn chat(args: &ChatArgs, cli_args: &SolaceArgs) -> Result<()> {
    let engine = build_engine(load_config(cli_args)?)?;
    let source = engine.initialize();
    info!("chat session started with {source} model");

    let stdin = io::stdin();
    let interactive = stdin.is_terminal() && cli_args.output_format == OutputFormat::Human;
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        output_reply(&engine.classify(message), args.show_intent, cli_args)?;
    }

    Ok(())
}

/// Decode the artifact and report on it.
fn inspect(cli_args: &SolaceArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let store = FileModelStore::new(&config.model_path);
    let mut result = InspectResult {
        path: store.location(),
        size_bytes: 0,
        format_version: None,
        status: "ok".to_string(),
        model: None,
    };

    let bytes = match store.read_bytes() {
        Ok(bytes) => bytes,
        Err(failure) => {
            result.status = failure.to_string();
            return output_result("Model artifact", &result, cli_args);
        }
    };
    result.size_bytes = bytes.len() as u64;
    result.format_version = read_header(&bytes).ok().map(|header| header.version);

    match decode_artifact(&bytes) {
        Ok(model) => {
            let corpus = load_corpus(&config)?;
            let fingerprint = corpus.fingerprint()?;
            let freshness = model.ensure_current(fingerprint, &config.training_settings());
            if let Err(LoadFailure::Stale(reason)) = &freshness {
                result.status = format!("stale: {reason}");
            }

            result.model = Some(ArtifactSummary {
                classifier: model.classifier.name().to_string(),
                intents: model.classifier.intents().to_vec(),
                vocabulary_size: model.vocabulary.len(),
                documents: model.stats.documents,
                training_accuracy: model.stats.training_accuracy,
                corpus_fingerprint: format!("{:08x}", model.corpus_fingerprint),
                trained_at: model.trained_at.to_rfc3339(),
                current: freshness.is_ok(),
            });
        }
        Err(failure) => result.status = failure.to_string(),
    }

    if cli_args.verbosity() > 1 {
        println!("Artifact size: {}", format_bytes(result.size_bytes));
    }
    output_result("Model artifact", &result, cli_args)
}
