use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::classifier::ModelArtifact;
use crate::error::Result;

struct DemoTxn {
    month: u32,
    day: u32,
    merchant: &'static str,
    description: &'static str,
    amount: f64,
}

/// A spread of rule hits, negative overrides, and ambiguous rows that only
/// the model can decide.
const TXNS: &[DemoTxn] = &[
    DemoTxn { month: 1, day: 3, merchant: "WeWork", description: "Monthly coworking membership", amount: 450.00 },
    DemoTxn { month: 1, day: 5, merchant: "Adobe", description: "Creative Cloud subscription", amount: 54.99 },
    DemoTxn { month: 1, day: 9, merchant: "Chipotle", description: "Team lunch with client", amount: 64.20 },
    DemoTxn { month: 1, day: 14, merchant: "Delta", description: "Flight to client site in Austin", amount: 389.40 },
    DemoTxn { month: 1, day: 18, merchant: "Walmart", description: "Weekly groceries", amount: 112.53 },
    DemoTxn { month: 1, day: 21, merchant: "Coursera", description: "Machine learning certification", amount: 79.00 },
    DemoTxn { month: 1, day: 27, merchant: "Cafe Luna", description: "Saturday brunch", amount: 28.75 },
    DemoTxn { month: 2, day: 2, merchant: "Apple", description: "MacBook for freelance work", amount: 1999.00 },
    DemoTxn { month: 2, day: 6, merchant: "Shell", description: "Gas for client meeting drive", amount: 41.30 },
    DemoTxn { month: 2, day: 10, merchant: "Delta", description: "Family vacation to Hawaii", amount: 1240.00 },
    DemoTxn { month: 2, day: 12, merchant: "Staples", description: "Printer paper and toner", amount: 67.23 },
    DemoTxn { month: 2, day: 15, merchant: "Zoom", description: "Call with mom and dad", amount: 0.00 },
    DemoTxn { month: 2, day: 19, merchant: "Uber", description: "Ride to office from airport", amount: 23.80 },
    DemoTxn { month: 2, day: 24, merchant: "Amazon", description: "Office supplies restock", amount: 88.10 },
    DemoTxn { month: 3, day: 1, merchant: "Regus", description: "Shared office space rental", amount: 380.00 },
    DemoTxn { month: 3, day: 4, merchant: "GoDaddy", description: "Domain renewal", amount: 19.99 },
    DemoTxn { month: 3, day: 8, merchant: "Squarespace", description: "Annual website plan", amount: 192.00 },
    DemoTxn { month: 3, day: 11, merchant: "Netflix", description: "Monthly streaming plan", amount: 15.49 },
    DemoTxn { month: 3, day: 16, merchant: "Local Print Shop", description: "Business cards printing", amount: 45.00 },
    DemoTxn { month: 3, day: 22, merchant: "Best Buy", description: "USB cables and adapters", amount: 31.97 },
    DemoTxn { month: 3, day: 28, merchant: "Spotify", description: "Premium plan", amount: 10.99 },
];

/// Hand-weighted artifact sized for the demo rows that fall through the
/// rules: web infrastructure leans deductible, entertainment leans personal.
fn demo_artifact() -> ModelArtifact {
    let entries: &[(&str, f64, f64)] = &[
        // (token, idf, weight)
        ("website", 1.4, 2.2),
        ("domain", 1.5, 2.6),
        ("hosting", 1.4, 2.4),
        ("renewal", 1.2, 0.8),
        ("invoice", 1.6, 2.0),
        ("business cards", 1.8, 3.0),
        ("printing", 1.3, 1.1),
        ("usb", 1.5, 0.6),
        ("cables", 1.5, 0.5),
        ("annual", 1.1, 0.4),
        ("streaming", 1.3, -2.8),
        ("premium", 1.2, -0.6),
        ("game", 1.4, -2.2),
        ("plan", 1.0, -0.2),
    ];
    let mut vocabulary = HashMap::new();
    let mut idf = Vec::new();
    let mut weights = Vec::new();
    for (i, (token, token_idf, weight)) in entries.iter().enumerate() {
        vocabulary.insert(token.to_string(), i);
        idf.push(*token_idf);
        weights.push(*weight);
    }
    let merchant_weights = HashMap::from([
        ("godaddy".to_string(), 0.9),
        ("squarespace".to_string(), 0.8),
        ("netflix".to_string(), -1.5),
        ("spotify".to_string(), -1.2),
        ("best buy".to_string(), 0.3),
    ]);
    ModelArtifact {
        vocabulary,
        idf,
        weights,
        intercept: -0.2,
        merchant_weights,
    }
}

pub fn run(dir: Option<&str>) -> Result<()> {
    let dir = PathBuf::from(dir.unwrap_or("deduce-demo"));
    std::fs::create_dir_all(&dir)?;
    let year = Local::now().year();

    let csv_path = dir.join("transactions.csv");
    let mut wtr = csv::Writer::from_path(&csv_path)?;
    wtr.write_record(["date", "amount", "merchant", "description"])?;
    for t in TXNS {
        wtr.write_record([
            format!("{year:04}-{:02}-{:02}", t.month, t.day),
            format!("{:.2}", t.amount),
            t.merchant.to_string(),
            t.description.to_string(),
        ])?;
    }
    wtr.flush()?;

    let model_path = dir.join("model.json");
    let json = serde_json::to_string_pretty(&demo_artifact())?;
    std::fs::write(&model_path, format!("{json}\n"))?;

    println!("Wrote {} ({} transactions)", csv_path.display(), TXNS.len());
    println!("Wrote {}", model_path.display());
    println!();
    println!(
        "Try:\n  deduce classify {} --model {}",
        csv_path.display(),
        model_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;

    #[test]
    fn test_demo_artifact_is_valid() {
        let clf = Classifier::from_artifact(demo_artifact()).unwrap();
        assert!(clf.vocabulary_len() > 0);
        // Ambiguous demo rows land on the intended side of 0.5
        assert!(clf.predict("godaddy domain renewal", "GoDaddy") > 0.5);
        assert!(clf.predict("netflix monthly streaming plan", "Netflix") < 0.5);
    }

    #[test]
    fn test_demo_files_written() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("demo");
        run(Some(target.to_str().unwrap())).unwrap();
        assert!(target.join("transactions.csv").exists());
        assert!(target.join("model.json").exists());
        let content = std::fs::read_to_string(target.join("transactions.csv")).unwrap();
        assert!(content.starts_with("date,amount,merchant,description\n"));
        assert_eq!(content.lines().count(), TXNS.len() + 1);
    }
}
