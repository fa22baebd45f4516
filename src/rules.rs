use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{DeduceError, Result};
use crate::models::Label;

/// One rule as it appears in a rules JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub label: Label,
    pub reason: String,
}

/// A compiled rule. Patterns are matched case-insensitively.
#[derive(Debug)]
pub struct Rule {
    pub pattern: String,
    pub label: Label,
    pub reason: String,
    regex: Regex,
}

/// An ordered rule sequence with a guaranteed trailing catch-all.
///
/// Priority is position, not pattern specificity: the first matching rule
/// wins even when a later rule would match a longer span. The fallback is
/// split off at construction so `evaluate` can never come up empty.
#[derive(Debug)]
pub struct RuleSet {
    head: Vec<Rule>,
    fallback: Rule,
}

fn compile_one(spec: &RuleSpec) -> Result<Rule> {
    let regex = RegexBuilder::new(&spec.pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| DeduceError::BadRules(format!("bad pattern '{}': {e}", spec.pattern)))?;
    Ok(Rule {
        pattern: spec.pattern.clone(),
        label: spec.label,
        reason: spec.reason.clone(),
        regex,
    })
}

impl RuleSet {
    /// Compile an ordered rule sequence, enforcing the catch-all contract:
    /// exactly one defer rule, last in the sequence, matching any text.
    pub fn compile(specs: &[RuleSpec]) -> Result<RuleSet> {
        let (last, rest) = specs
            .split_last()
            .ok_or_else(|| DeduceError::BadRules("rule set is empty".to_string()))?;
        if last.label != Label::Defer {
            return Err(DeduceError::BadRules(
                "the final rule must have label 'defer'".to_string(),
            ));
        }
        if let Some(spec) = rest.iter().find(|s| s.label == Label::Defer) {
            return Err(DeduceError::BadRules(format!(
                "only the final rule may defer, but '{}' does",
                spec.pattern
            )));
        }
        let fallback = compile_one(last)?;
        if !fallback.regex.is_match("") || !fallback.regex.is_match("a") {
            return Err(DeduceError::BadRules(format!(
                "the final rule must match any text, but '{}' does not",
                fallback.pattern
            )));
        }
        let head = rest.iter().map(compile_one).collect::<Result<Vec<_>>>()?;
        Ok(RuleSet { head, fallback })
    }

    /// Built-in default rule sequence.
    pub fn default_set() -> Result<RuleSet> {
        Self::compile(&default_rules())
    }

    /// Load a rule sequence from a JSON file.
    pub fn load(path: &Path) -> Result<RuleSet> {
        let content = std::fs::read_to_string(path)?;
        let specs: Vec<RuleSpec> = serde_json::from_str(&content)
            .map_err(|e| DeduceError::BadRules(format!("{}: {e}", path.display())))?;
        Self::compile(&specs)
    }

    /// Index and rule of the first match. Falls through to the catch-all.
    pub fn first_match(&self, text: &str) -> (usize, &Rule) {
        for (i, rule) in self.head.iter().enumerate() {
            if rule.regex.is_match(text) {
                return (i, rule);
            }
        }
        (self.head.len(), &self.fallback)
    }

    /// First-match-wins evaluation. Always produces a result; a text no
    /// concrete rule matches comes back as the catch-all's defer.
    pub fn evaluate(&self, text: &str) -> (Label, &str) {
        let (_, rule) = self.first_match(text);
        (rule.label, rule.reason.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.head.iter().chain(std::iter::once(&self.fallback))
    }

    pub fn len(&self) -> usize {
        self.head.len() + 1
    }
}

/// Default deductibility rules, first match wins.
///
/// Position carries the policy: negative overrides sit above every
/// positive rule, and the generic personal-meal rule sits below the
/// business-meal rule so "team lunch with client" resolves as a business
/// meal even though both patterns match.
pub fn default_rules() -> Vec<RuleSpec> {
    let spec = |pattern: &str, label: Label, reason: &str| RuleSpec {
        pattern: pattern.to_string(),
        label,
        reason: reason.to_string(),
    };
    vec![
        spec(
            r"\bzoom\b.*\b(mom|dad|mother|father|brother|sister|family|parent)\b",
            Label::NonDeductible,
            "Personal Zoom call",
        ),
        spec(
            r"\b(grocery|groceries|household supplies|walmart|target|costco)\b",
            Label::NonDeductible,
            "Personal groceries or household supplies",
        ),
        spec(
            r"\b(vacation|holiday|gift|birthday|anniversary|party|celebration)\b",
            Label::NonDeductible,
            "Personal occasion",
        ),
        spec(
            r"\b(staples|office depot|office max|office supplies)\b",
            Label::Deductible,
            "Office supplies",
        ),
        spec(
            r"\b(macbook|laptop|computer|monitor|printer|keyboard|mouse|webcam|headset)\b.*\b(work|business|freelance|remote job|job)\b",
            Label::Deductible,
            "Business equipment purchase",
        ),
        spec(
            r"\b(wework|regus|coworking|shared office|office space rental)\b",
            Label::Deductible,
            "Coworking membership",
        ),
        spec(
            r"\b(online course|webinar|training|certification|bootcamp|coursera|udemy|edx)\b",
            Label::Deductible,
            "Professional development",
        ),
        spec(
            r"\b(gas|fuel|mileage|toll|parking)\b.*\b(business|client|meeting|work)\b",
            Label::Deductible,
            "Business transportation",
        ),
        spec(
            r"\b(lunch|dinner|breakfast|meal)\b.*\b(client|team|coworker|meeting|business|work)\b|\b(client|team|coworker|meeting|business|work)\b.*\b(lunch|dinner|breakfast|meal)\b",
            Label::Deductible,
            "Business meal",
        ),
        spec(
            r"\b(flight|airfare|airlines|hotel|lyft|uber|taxi|train|rail|airbnb|car rental|ride)\b.*\b(work|business|client|meeting|office|job|site)\b",
            Label::Deductible,
            "Business travel",
        ),
        spec(
            r"\b(lunch|dinner|breakfast|brunch|meal|restaurant|cafe)\b",
            Label::NonDeductible,
            "Personal meal",
        ),
        spec(
            r"\b(zoom|slack|aws|github|jira|notion|dropbox|adobe|microsoft 365|gcp|azure|quickbooks|intuit)\b",
            Label::Deductible,
            "Business software subscription",
        ),
        spec(
            r"\b(amazon)\b.*\b(office|supplies|business|equipment|work)\b",
            Label::Deductible,
            "Office-related Amazon purchase",
        ),
        spec(
            r".*",
            Label::Defer,
            "No rule matched \u{2014} defer to ML",
        ),
    ]
}
