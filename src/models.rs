use serde::{Deserialize, Serialize};

use crate::error::{DeduceError, Result};

/// A single input transaction with its derived canonical text.
///
/// `text` is computed once at load time (lowercased merchant + description)
/// and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: String,
    pub amount: f64,
    pub merchant: String,
    pub description: String,
    pub text: String,
}

/// Outcome of a single rule: a concrete decision or a hand-off to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Deductible,
    NonDeductible,
    Defer,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Label::Deductible => "deductible",
            Label::NonDeductible => "non_deductible",
            Label::Defer => "defer",
        };
        write!(f, "{name}")
    }
}

/// Final verdict for one transaction. One per input row, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub date: String,
    pub merchant: String,
    pub description: String,
    pub deductible: bool,
    pub reason: String,
}

/// Per-run decision policy. Does not mutate rule or model state.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub use_ml: bool,
    pub threshold: f64,
}

impl Policy {
    pub fn new(use_ml: bool, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DeduceError::InvalidThreshold(threshold));
        }
        Ok(Self { use_ml, threshold })
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            use_ml: true,
            threshold: 0.5,
        }
    }
}
