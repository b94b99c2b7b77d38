use crate::error::ScamRadarError;
use crate::features::FeatureSet;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Record handed to the statistical model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInput {
    pub clean_text: String,
    pub has_money: bool,
    pub has_url: bool,
    pub has_phone: bool,
}

impl From<&FeatureSet> for ModelInput {
    fn from(features: &FeatureSet) -> Self {
        Self {
            clean_text: features.clean_text.clone(),
            has_money: features.has_money,
            has_url: features.has_url,
            has_phone: features.has_phone,
        }
    }
}

/// Binary scam/legit probability model.
pub trait ProbabilityModel: Send + Sync {
    /// Returns `[p_legit, p_scam]`.
    fn predict_proba(&self, input: &ModelInput) -> Result<[f64; 2]>;

    fn name(&self) -> &str;

    fn scam_probability(&self, input: &ModelInput) -> Result<f64> {
        let [_, p_scam] = self.predict_proba(input)?;
        if !p_scam.is_finite() || !(0.0..=1.0).contains(&p_scam) {
            return Err(anyhow!(
                "model '{}' returned invalid scam probability {}",
                self.name(),
                p_scam
            ));
        }
        Ok(p_scam)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureWeights {
    pub has_money: f64,
    pub has_url: f64,
    pub has_phone: f64,
}

/// Longest word n-gram an artifact may request.
pub const MAX_NGRAM: usize = 5;

fn default_ngram_range() -> [usize; 2] {
    [1, 2]
}

/// Logistic model over word n-grams and the structural flags, read from a
/// JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default = "LinearModel::default_name")]
    pub name: String,
    pub intercept: f64,
    #[serde(default)]
    pub feature_weights: FeatureWeights,
    #[serde(default)]
    pub token_weights: HashMap<String, f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: [usize; 2],
}

impl LinearModel {
    fn default_name() -> String {
        "linear".to_string()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: LinearModel = serde_json::from_str(json).context("Invalid model artifact")?;
        model.validate()?;
        Ok(model)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScamRadarError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScamRadarError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&content).map_err(|e| {
            ScamRadarError::ModelUnavailable(format!("{}: {:#}", path.display(), e))
        })?;

        log::info!(
            "Loaded model '{}' from {} ({} token weights)",
            model.name,
            path.display(),
            model.token_weights.len()
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let [min, max] = self.ngram_range;
        if min == 0 || min > max || max > MAX_NGRAM {
            return Err(anyhow!(
                "invalid ngram_range [{}, {}], expected 1 <= min <= max <= {}",
                min,
                max,
                MAX_NGRAM
            ));
        }
        let flags = &self.feature_weights;
        let weights_finite = self.intercept.is_finite()
            && [flags.has_money, flags.has_url, flags.has_phone]
                .iter()
                .all(|w| w.is_finite())
            && self.token_weights.values().all(|w| w.is_finite());
        if !weights_finite {
            return Err(anyhow!("model weights must be finite"));
        }
        Ok(())
    }

    /// Distinct word n-grams of the lowercased text.
    pub fn ngrams(&self, text: &str) -> HashSet<String> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let [min, max] = self.ngram_range;
        let mut grams = HashSet::new();
        for n in min..=max {
            for window in words.windows(n) {
                grams.insert(window.join(" "));
            }
        }
        grams
    }

    fn decision_value(&self, input: &ModelInput) -> f64 {
        let flag = |present: bool, weight: f64| if present { weight } else { 0.0 };

        let token_score: f64 = self
            .ngrams(&input.clean_text)
            .iter()
            .filter_map(|gram| self.token_weights.get(gram))
            .sum();

        self.intercept
            + token_score
            + flag(input.has_money, self.feature_weights.has_money)
            + flag(input.has_url, self.feature_weights.has_url)
            + flag(input.has_phone, self.feature_weights.has_phone)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ProbabilityModel for LinearModel {
    fn predict_proba(&self, input: &ModelInput) -> Result<[f64; 2]> {
        let p_scam = sigmoid(self.decision_value(input));
        Ok([1.0 - p_scam, p_scam])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
