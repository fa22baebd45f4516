mod classifier;
mod cli;
mod error;
mod exporter;
mod labeler;
mod loader;
mod models;
mod rules;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ModelCommands, RulesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input,
            output,
            json,
            rules,
            model,
            no_ml,
            threshold,
        } => cli::classify::run(
            &input,
            output.as_deref(),
            json.as_deref(),
            rules.as_deref(),
            model.as_deref(),
            no_ml,
            threshold,
        ),
        Commands::Rules { command } => match command {
            RulesCommands::List { rules } => cli::rules::list(rules.as_deref()),
            RulesCommands::Check { text, rules } => cli::rules::check(&text, rules.as_deref()),
        },
        Commands::Model { command } => match command {
            ModelCommands::Info { model } => cli::model::info(model.as_deref()),
        },
        Commands::Init {
            model,
            threshold,
            no_ml,
        } => cli::init::run(model, threshold, no_ml),
        Commands::Demo { dir } => cli::demo::run(dir.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
