use crate::classifier::Classifier;
use crate::error::{DeduceError, Result};
use crate::models::{ClassificationResult, Label, Policy, Transaction};
use crate::rules::RuleSet;

/// Applies the two-stage decision pipeline: rules first, model on defer.
///
/// Holds only shared read-only state, so one labeler can serve a whole
/// batch (and could serve concurrent batches) without locking.
pub struct Labeler<'a> {
    rules: &'a RuleSet,
    model: Option<&'a Classifier>,
    policy: Policy,
}

impl<'a> Labeler<'a> {
    /// A policy with ML enabled requires a loaded model up front; rejecting
    /// the combination here keeps `decide` itself infallible.
    pub fn new(rules: &'a RuleSet, model: Option<&'a Classifier>, policy: Policy) -> Result<Self> {
        if policy.use_ml && model.is_none() {
            return Err(DeduceError::Model(
                "ML is enabled but no model is loaded".to_string(),
            ));
        }
        Ok(Self {
            rules,
            model,
            policy,
        })
    }

    /// Classify one transaction.
    ///
    /// A concrete rule label is a hard override: the model is never
    /// consulted when a rule fires. On defer, either the model decides via
    /// the threshold, or (ML disabled) the non-deductible safe default
    /// applies with the defer rule's reason untouched.
    pub fn decide(&self, txn: &Transaction) -> ClassificationResult {
        let (label, reason) = self.rules.evaluate(&txn.text);
        let (deductible, reason) = match (label, self.model) {
            (Label::Deductible, _) => (true, reason.to_string()),
            (Label::NonDeductible, _) => (false, reason.to_string()),
            (Label::Defer, Some(model)) if self.policy.use_ml => {
                let p = model.predict(&txn.text, &txn.merchant);
                (p >= self.policy.threshold, format!("{reason}; ML (p={p:.2})"))
            }
            (Label::Defer, _) => (false, reason.to_string()),
        };
        ClassificationResult {
            date: txn.date.clone(),
            merchant: txn.merchant.clone(),
            description: txn.description.clone(),
            deductible,
            reason,
        }
    }

    /// Classify a batch, one result per transaction, in input order.
    pub fn run(&self, txns: &[Transaction]) -> Vec<ClassificationResult> {
        txns.iter().map(|txn| self.decide(txn)).collect()
    }
}
