use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::ClassificationResult;

const OUTPUT_COLUMNS: [&str; 5] = ["date", "merchant", "description", "deductible", "reason"];

/// Render results as a terminal table, verdicts colored.
pub fn render_table(results: &[ClassificationResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Merchant", "Description", "Deductible", "Reason"]);
    for r in results {
        let verdict = if r.deductible {
            "true".green().to_string()
        } else {
            "false".red().to_string()
        };
        table.add_row(vec![
            Cell::new(&r.date),
            Cell::new(&r.merchant),
            Cell::new(&r.description),
            Cell::new(verdict),
            Cell::new(&r.reason),
        ]);
    }
    table
}

/// One-line batch summary for the status output.
pub fn summary(results: &[ClassificationResult]) -> String {
    let deductible = results.iter().filter(|r| r.deductible).count();
    format!(
        "{} deductible, {} non-deductible",
        deductible,
        results.len() - deductible
    )
}

/// Write results as CSV with `deductible` as a boolean literal. The header
/// row is written even for an empty batch.
pub fn write_csv(path: &Path, results: &[ClassificationResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(OUTPUT_COLUMNS)?;
    for r in results {
        wtr.write_record([
            r.date.as_str(),
            r.merchant.as_str(),
            r.description.as_str(),
            if r.deductible { "true" } else { "false" },
            r.reason.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write results as a pretty-printed JSON array (2-space indentation).
pub fn write_json(path: &Path, results: &[ClassificationResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
