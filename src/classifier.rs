use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DeduceError, Result};

/// On-disk model artifact: a TF-IDF vocabulary plus linear model weights,
/// produced by an offline training run. Opaque to everything but this
/// module; the rest of the crate only sees `Classifier::predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Token (unigram or space-joined bigram) to feature column.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    pub idf: Vec<f64>,
    /// Logistic-regression weight per column.
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Optional categorical contribution per lowercased merchant name.
    #[serde(default)]
    pub merchant_weights: HashMap<String, f64>,
}

/// A loaded, validated model. Immutable for the life of the process and
/// shareable read-only across threads; a retrained artifact is only picked
/// up by a fresh process.
#[derive(Debug)]
pub struct Classifier {
    artifact: ModelArtifact,
    fingerprint: String,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Lowercase word tokens plus adjacent-pair bigrams, mirroring the
/// vectorizer the artifact was trained with.
fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    let mut tokens = words.clone();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }
    tokens
}

impl Classifier {
    /// Read and validate a model artifact. Called once at startup when ML
    /// is enabled; any failure here is fatal. Rule-only operation is never
    /// an error-recovery path, only the explicit policy toggle.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            DeduceError::Model(format!("cannot read model artifact {}: {e}", path.display()))
        })?;
        let artifact: ModelArtifact = serde_json::from_slice(&data).map_err(|e| {
            DeduceError::Model(format!("corrupt model artifact {}: {e}", path.display()))
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&data);
        Self::new(artifact, hex::encode(hasher.finalize()))
    }

    /// Build a classifier from an in-memory artifact (demo generation,
    /// tests). The fingerprint covers the serialized form.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let data = serde_json::to_vec(&artifact)?;
        let mut hasher = Sha256::new();
        hasher.update(&data);
        Self::new(artifact, hex::encode(hasher.finalize()))
    }

    fn new(artifact: ModelArtifact, fingerprint: String) -> Result<Self> {
        let n = artifact.vocabulary.len();
        if artifact.idf.len() != n || artifact.weights.len() != n {
            return Err(DeduceError::Model(format!(
                "inconsistent model artifact: {} vocabulary entries, {} idf values, {} weights",
                n,
                artifact.idf.len(),
                artifact.weights.len()
            )));
        }
        if let Some((token, &col)) = artifact.vocabulary.iter().find(|(_, &col)| col >= n) {
            return Err(DeduceError::Model(format!(
                "inconsistent model artifact: token '{token}' maps to column {col} of {n}"
            )));
        }
        Ok(Self {
            artifact,
            fingerprint,
        })
    }

    /// Probability that the text describes a deductible expense, in [0,1].
    ///
    /// Length-normalized TF-IDF over the artifact vocabulary, dot product
    /// with the weights, plus the merchant's categorical weight when the
    /// artifact carries one, squashed through the logistic function.
    pub fn predict(&self, text: &str, merchant: &str) -> f64 {
        let tokens = tokenize(text);
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in &tokens {
            if let Some(&col) = self.artifact.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let mut z = self.artifact.intercept;
        if !tokens.is_empty() {
            let n = tokens.len() as f64;
            for (col, count) in counts {
                z += (count / n) * self.artifact.idf[col] * self.artifact.weights[col];
            }
        }
        if let Some(w) = self.artifact.merchant_weights.get(&merchant.to_lowercase()) {
            z += w;
        }
        sigmoid(z)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.artifact.vocabulary.len()
    }

    pub fn merchant_count(&self) -> usize {
        self.artifact.merchant_weights.len()
    }

    /// SHA-256 of the artifact bytes, for `model info`.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(entries: &[(&str, f64)], intercept: f64) -> ModelArtifact {
        let mut vocabulary = HashMap::new();
        let mut idf = Vec::new();
        let mut weights = Vec::new();
        for (i, (token, weight)) in entries.iter().enumerate() {
            vocabulary.insert(token.to_string(), i);
            idf.push(1.0);
            weights.push(*weight);
        }
        ModelArtifact {
            vocabulary,
            idf,
            weights,
            intercept,
            merchant_weights: HashMap::new(),
        }
    }

    #[test]
    fn test_tokenize_unigrams_and_bigrams() {
        let tokens = tokenize("Team Lunch w/ Client");
        assert!(tokens.contains(&"team".to_string()));
        assert!(tokens.contains(&"client".to_string()));
        assert!(tokens.contains(&"team lunch".to_string()));
        assert!(!tokens.contains(&"team client".to_string()));
    }

    #[test]
    fn test_predict_is_a_probability() {
        let clf = Classifier::from_artifact(artifact(&[("coworking", 50.0)], -50.0)).unwrap();
        let p = clf.predict("coworking coworking coworking", "");
        assert!((0.0..=1.0).contains(&p));
        let p = clf.predict("nothing known here", "");
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_predict_separates_classes() {
        let clf = Classifier::from_artifact(artifact(
            &[("coworking", 6.0), ("vacation", -6.0)],
            0.0,
        ))
        .unwrap();
        assert!(clf.predict("coworking membership", "") > 0.5);
        assert!(clf.predict("vacation booking", "") < 0.5);
    }

    #[test]
    fn test_unknown_text_falls_back_to_intercept() {
        let clf = Classifier::from_artifact(artifact(&[("coworking", 6.0)], 0.0)).unwrap();
        // No vocabulary hit: probability is sigmoid(intercept) = 0.5
        assert!((clf.predict("random obscure purchase xyz", "") - 0.5).abs() < 1e-9);
        assert!((clf.predict("", "") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_merchant_weight_shifts_probability() {
        let mut art = artifact(&[], 0.0);
        art.merchant_weights.insert("wework".to_string(), 3.0);
        let clf = Classifier::from_artifact(art).unwrap();
        assert!(clf.predict("monthly membership", "WeWork") > 0.9);
        assert!((clf.predict("monthly membership", "unknown co") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut art = artifact(&[("a", 1.0), ("b", 2.0)], 0.0);
        art.weights.pop();
        let err = Classifier::from_artifact(art).unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn test_out_of_range_column_rejected() {
        let mut art = artifact(&[("a", 1.0)], 0.0);
        art.vocabulary.insert("b".to_string(), 9);
        art.idf.push(1.0);
        art.weights.push(1.0);
        assert!(Classifier::from_artifact(art).is_err());
    }

    #[test]
    fn test_load_roundtrip_and_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let art = artifact(&[("github", 2.5)], -0.4);
        std::fs::write(&path, serde_json::to_string_pretty(&art).unwrap()).unwrap();
        let clf = Classifier::load(&path).unwrap();
        assert_eq!(clf.vocabulary_len(), 1);
        assert_eq!(clf.fingerprint().len(), 64);
        assert!(clf.predict("github team plan", "") > 0.0);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Classifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Classifier::load(&path).unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }
}
