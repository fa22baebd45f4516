pub mod classify;
pub mod demo;
pub mod init;
pub mod model;
pub mod rules;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::{DeduceError, Result};
use crate::rules::RuleSet;
use crate::settings::Settings;

/// Rules come from the flag, then the settings file, then the built-ins.
pub(crate) fn resolve_rules(flag: Option<&str>, settings: &Settings) -> Result<RuleSet> {
    let configured = flag
        .map(str::to_string)
        .or_else(|| (!settings.rules_path.is_empty()).then(|| settings.rules_path.clone()));
    match configured {
        Some(path) => RuleSet::load(Path::new(&path)),
        None => RuleSet::default_set(),
    }
}

/// Model path from the flag or the settings file; there is no built-in.
pub(crate) fn resolve_model_path(flag: Option<&str>, settings: &Settings) -> Result<String> {
    flag.map(str::to_string)
        .or_else(|| (!settings.model_path.is_empty()).then(|| settings.model_path.clone()))
        .ok_or_else(|| {
            DeduceError::Model(
                "no model artifact configured; pass --model, run `deduce init --model <path>`, \
                 or disable ML with --no-ml"
                    .to_string(),
            )
        })
}

#[derive(Parser)]
#[command(name = "deduce", about = "Tax-deductible transaction classifier.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a transactions CSV and print the results.
    Classify {
        /// Transactions CSV with columns: date, amount, merchant, description
        input: String,
        /// Write results to a CSV file
        #[arg(long)]
        output: Option<String>,
        /// Write results to a JSON file
        #[arg(long)]
        json: Option<String>,
        /// Custom rules JSON file (default: built-in rules)
        #[arg(long)]
        rules: Option<String>,
        /// Model artifact path (default: from settings)
        #[arg(long)]
        model: Option<String>,
        /// Disable the ML fallback; deferred rows become non-deductible
        #[arg(long = "no-ml")]
        no_ml: bool,
        /// Deductible probability threshold, between 0 and 1
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Inspect or dry-run the classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Inspect the model artifact.
    Model {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Write the settings file (model path, threshold, ML toggle).
    Init {
        /// Model artifact path to store
        #[arg(long)]
        model: Option<String>,
        /// Default deductible probability threshold
        #[arg(long)]
        threshold: Option<f64>,
        /// Default to rule-only classification
        #[arg(long = "no-ml")]
        no_ml: bool,
    },
    /// Write sample transactions and a demo model to try deduce out.
    Demo {
        /// Output directory (default: deduce-demo)
        #[arg(long)]
        dir: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List the active rules in evaluation order.
    List {
        /// Custom rules JSON file
        #[arg(long)]
        rules: Option<String>,
    },
    /// Show which rule fires for a piece of transaction text.
    Check {
        /// Text to evaluate, e.g. "team lunch with client"
        text: String,
        /// Custom rules JSON file
        #[arg(long)]
        rules: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ModelCommands {
    /// Show artifact path, vocabulary size, and fingerprint.
    Info {
        /// Model artifact path (default: from settings)
        #[arg(long)]
        model: Option<String>,
    },
}
