//! Output formatting for CLI commands.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SolaceArgs};
use crate::engine::{ClassifyResponse, TrainingReport};
use crate::ml::intent_classifier::ClassificationResult;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_path: String,
    #[serde(flatten)]
    pub report: TrainingReport,
}

/// Result structure for corpus validation without training.
#[derive(Debug, Serialize, Deserialize)]
pub struct DryRunResult {
    pub documents: usize,
    pub intents: usize,
    pub responses: usize,
    pub intents_without_responses: Vec<String>,
    pub intents_without_utterances: Vec<String>,
}

/// Result structure for one-shot classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    #[serde(flatten)]
    pub response: ClassifyResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<ClassificationResult>>,
}

/// Result structure for artifact inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResult {
    pub path: String,
    pub size_bytes: u64,
    pub format_version: Option<u32>,
    /// `ok`, or the reason the artifact cannot be used.
    pub status: String,
    pub model: Option<ArtifactSummary>,
}

/// Decoded artifact contents.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub classifier: String,
    pub intents: Vec<String>,
    pub vocabulary_size: usize,
    pub documents: usize,
    pub training_accuracy: f64,
    pub corpus_fingerprint: String,
    pub trained_at: String,
    /// Whether the artifact matches the configured corpus and settings.
    pub current: bool,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SolaceArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SolaceArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_value_human(&value, 0);
    Ok(())
}

fn print_value_human(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) => {
                        println!("{pad}{key}:");
                        print_value_human(val, indent + 1);
                    }
                    serde_json::Value::Array(items) if items.iter().any(|i| i.is_object()) => {
                        println!("{pad}{key}:");
                        for item in items {
                            println!("{pad}  - {}", format_inline(item));
                        }
                    }
                    _ => println!("{pad}{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{pad}{}", format_value(value)),
    }
}

/// Print one chat reply.
pub fn output_reply(
    response: &ClassifyResponse,
    show_intent: bool,
    args: &SolaceArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(response, args),
        OutputFormat::Human => {
            println!("{}", response.response_text);
            if show_intent {
                println!(
                    "  [{} {:.3}]",
                    response.intent.as_deref().unwrap_or("fallback"),
                    response.confidence
                );
            }
            println!();
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SolaceArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}

/// Format an object on a single line as `key=value` pairs.
fn format_inline(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{key}={}", format_value(val)))
            .collect::<Vec<_>>()
            .join(" "),
        _ => format_value(value),
    }
}

/// Format bytes into human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
