use std::path::Path;

use colored::Colorize;

use crate::classifier::Classifier;
use crate::cli::{resolve_model_path, resolve_rules};
use crate::error::Result;
use crate::exporter;
use crate::labeler::Labeler;
use crate::loader::load_transactions;
use crate::models::Policy;
use crate::settings::load_settings;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &str,
    output: Option<&str>,
    json: Option<&str>,
    rules_file: Option<&str>,
    model_file: Option<&str>,
    no_ml: bool,
    threshold: Option<f64>,
) -> Result<()> {
    let settings = load_settings();
    let use_ml = if no_ml { false } else { settings.use_ml };
    let policy = Policy::new(use_ml, threshold.unwrap_or(settings.threshold))?;

    let rules = resolve_rules(rules_file, &settings)?;

    // The model loads before any transaction is read; a bad artifact is a
    // startup failure, never a mid-batch one.
    let model = if policy.use_ml {
        let path = resolve_model_path(model_file, &settings)?;
        Some(Classifier::load(Path::new(&path))?)
    } else {
        None
    };

    let txns = load_transactions(Path::new(input))?;
    let labeler = Labeler::new(&rules, model.as_ref(), policy)?;
    let results = labeler.run(&txns);

    println!("{}", exporter::render_table(&results));
    println!("{}", exporter::summary(&results).bold());
    if !policy.use_ml {
        println!("{}", "ML disabled; deferred rows defaulted to non-deductible".dimmed());
    }

    if let Some(path) = output {
        exporter::write_csv(Path::new(path), &results)?;
        println!("Wrote {path}");
    }
    if let Some(path) = json {
        exporter::write_json(Path::new(path), &results)?;
        println!("Wrote {path}");
    }
    Ok(())
}
