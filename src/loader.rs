use std::path::Path;

use crate::error::{DeduceError, Result};
use crate::models::Transaction;

/// Required input columns, matched case-sensitively against the CSV header.
pub const REQUIRED_COLUMNS: &[&str] = &["date", "amount", "merchant", "description"];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Combine merchant and description into the canonical lowercase text field.
/// Absent values contribute the empty string; this never fails.
pub fn normalize_text(merchant: &str, description: &str) -> String {
    format!("{} {}", merchant.trim(), description.trim()).to_lowercase()
}

/// Parse an amount cell, tolerating thousands separators, currency symbols,
/// surrounding quotes, and accounting-style parenthesized negatives.
fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// load_transactions
// ---------------------------------------------------------------------------

/// Read a transactions CSV into memory, deriving the canonical text field.
///
/// The whole file is parsed before anything is returned, so structural errors
/// (missing columns, ragged rows, unparsable amounts) surface before any
/// classification can start and no partial batch escapes.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(std::io::BufReader::new(file));

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(DeduceError::MissingColumns(missing.join(", ")));
    }

    let col = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let (idx_date, idx_amount, idx_merchant, idx_desc) = (
        col("date"),
        col("amount"),
        col("merchant"),
        col("description"),
    );

    let mut txns = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 2; // 1-based, counting the header line
        let raw_amount = record.get(idx_amount).unwrap_or("");
        let amount = parse_amount(raw_amount).ok_or_else(|| DeduceError::BadAmount {
            row,
            value: raw_amount.to_string(),
        })?;
        let merchant = record.get(idx_merchant).unwrap_or("").trim().to_string();
        let description = record.get(idx_desc).unwrap_or("").trim().to_string();
        txns.push(Transaction {
            date: record.get(idx_date).unwrap_or("").trim().to_string(),
            amount,
            text: normalize_text(&merchant, &description),
            merchant,
            description,
        });
    }
    Ok(txns)
}
