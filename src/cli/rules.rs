use comfy_table::{Cell, Table};

use crate::cli::resolve_rules;
use crate::error::Result;
use crate::loader::normalize_text;
use crate::settings::load_settings;

pub fn list(rules_file: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let rules = resolve_rules(rules_file, &settings)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Pattern", "Label", "Reason"]);
    for (i, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&rule.pattern),
            Cell::new(rule.label),
            Cell::new(&rule.reason),
        ]);
    }
    println!("Rules (first match wins)\n{table}");
    Ok(())
}

pub fn check(text: &str, rules_file: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let rules = resolve_rules(rules_file, &settings)?;

    let normalized = normalize_text("", text);
    let normalized = normalized.trim();
    let (i, rule) = rules.first_match(normalized);
    println!("Text:    {normalized}");
    println!("Rule #{i}: '{}'", rule.pattern);
    println!("Label:   {}", rule.label);
    println!("Reason:  {}", rule.reason);
    Ok(())
}
