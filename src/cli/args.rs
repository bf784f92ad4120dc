//! Command line argument parsing for the Solace CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Solace - intent classification and response selection for supportive chat
#[derive(Parser, Debug, Clone)]
#[command(name = "solace")]
#[command(about = "Train, inspect and talk to a Solace intent model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SolaceArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SOLACE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Training corpus file (JSON); overrides the configuration
    #[arg(long, value_name = "CORPUS_FILE", env = "SOLACE_CORPUS", global = true)]
    pub corpus: Option<PathBuf>,

    /// Model artifact path; overrides the configuration
    #[arg(short, long, value_name = "MODEL_FILE", env = "SOLACE_MODEL", global = true)]
    pub model: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SolaceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from the corpus and save the artifact
    Train(TrainArgs),

    /// Classify a single message
    Classify(ClassifyArgs),

    /// Read messages from stdin and reply to each one
    Chat(ChatArgs),

    /// Show metadata of the saved model artifact
    Inspect,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Only validate the corpus; do not write an artifact
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for one-shot classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Message to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Include the full intent distribution
    #[arg(long)]
    pub scores: bool,

    /// Override the confidence threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

/// Arguments for interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Show intent and confidence next to each reply
    #[arg(long)]
    pub show_intent: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        let args = SolaceArgs::try_parse_from(["solace", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SolaceArgs::try_parse_from(["solace", "-vv", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SolaceArgs::try_parse_from(["solace", "--quiet", "-v", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = SolaceArgs::try_parse_from(["solace", "--format", "json", "inspect"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);

        assert!(SolaceArgs::try_parse_from(["solace", "--format", "yaml", "inspect"]).is_err());
    }

    #[test]
    fn test_classify_args() {
        let args = SolaceArgs::try_parse_from([
            "solace",
            "classify",
            "I cannot sleep",
            "--scores",
            "--threshold",
            "0.7",
            "--model",
            "/tmp/model.slcm",
        ])
        .unwrap();

        assert_eq!(args.model, Some(PathBuf::from("/tmp/model.slcm")));
        if let Command::Classify(classify) = args.command {
            assert_eq!(classify.text, "I cannot sleep");
            assert!(classify.scores);
            assert_eq!(classify.threshold, Some(0.7));
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_train_args() {
        let args =
            SolaceArgs::try_parse_from(["solace", "--corpus", "corpus.json", "train", "--dry-run"])
                .unwrap();

        assert_eq!(args.corpus, Some(PathBuf::from("corpus.json")));
        assert!(matches!(args.command, Command::Train(TrainArgs { dry_run: true })));
    }

    #[test]
    fn test_missing_command() {
        assert!(SolaceArgs::try_parse_from(["solace"]).is_err());
    }
}
