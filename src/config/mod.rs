pub mod yaml_config;

use crate::error::ScamRadarError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    pub model_path: String,
    pub tables: DetectionTables,
    pub scoring: ScoringConfig,
}

/// Keyword and domain tables consulted by the case analyzer.
///
/// Trusted entities are kept as an ordered list: when several brand aliases
/// occur in one message, the first entry in this list decides the case.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionTables {
    pub trusted_entities: Vec<TrustedEntity>,
    pub authority_keywords: Vec<String>,
    pub shortener_domains: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrustedEntity {
    pub keyword: String,
    pub domain: String,
}

/// Constants for the piecewise probability adjustment and label thresholds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub impersonation_floor: f64,
    pub impersonation_spread: f64,
    pub dampening_factor: f64,
    pub shortener_floor: f64,
    pub shortener_spread: f64,
    pub shortener_ceiling: f64,
    pub high_risk_threshold: f64,
    pub suspicious_threshold: f64,
}

fn entity(keyword: &str, domain: &str) -> TrustedEntity {
    TrustedEntity {
        keyword: keyword.to_string(),
        domain: domain.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DetectionTables {
    fn default() -> Self {
        Self {
            trusted_entities: vec![
                entity("vietnamobile", "vietnamobile.com.vn"),
                entity("viettel", "viettel.vn"),
                entity("viettelpay", "viettel.vn"),
                entity("viettel money", "viettel.vn"),
                entity("mobifone", "mobifone.vn"),
                entity("vinaphone", "vinaphone.com.vn"),
                entity("bidv", "bidv.com.vn"),
                entity("smartbanking", "bidv.com.vn"),
                entity("momo", "momo.vn"),
                entity("techcombank", "techcombank.com"),
                entity("vietinbank", "vietinbank.vn"),
                entity("vietcombank", "vietcombank.com.vn"),
                entity("agribank", "agribank.com.vn"),
                entity("mb bank", "mbbank.com.vn"),
                entity("shopee", "shopee.vn"),
                entity("lazada", "lazada.vn"),
                entity("tiki", "tiki.vn"),
            ],
            authority_keywords: strings(&[
                "chính phủ",
                "thủ tướng",
                "nhà nước",
                "bộ công an",
                "bộ quốc phòng",
                "bộ y tế",
                "bộ tài chính",
                "vtv",
                "vneid",
                "an sinh xã hội",
                "nghị quyết",
            ]),
            shortener_domains: strings(&[
                "bit.ly",
                "t.co",
                "tinyurl.com",
                "is.gd",
                "soo.gd",
                "s.id",
                "lnkd.in",
                "db.tt",
                "qr.ae",
                "ow.ly",
                "buff.ly",
                "adf.ly",
                "tr.im",
            ]),
        }
    }
}

impl DetectionTables {
    /// Lowercase every keyword and domain so matching can run against
    /// lowercased message text.
    pub fn normalized(mut self) -> Self {
        for entity in &mut self.trusted_entities {
            entity.keyword = entity.keyword.trim().to_lowercase();
            entity.domain = entity.domain.trim().to_lowercase();
        }
        for keyword in &mut self.authority_keywords {
            *keyword = keyword.trim().to_lowercase();
        }
        for domain in &mut self.shortener_domains {
            *domain = domain.trim().to_lowercase();
        }
        self
    }

    pub fn is_shortener(&self, domain: &str) -> bool {
        self.shortener_domains.iter().any(|d| d == domain)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            impersonation_floor: 0.95,
            impersonation_spread: 0.049,
            dampening_factor: 0.1,
            shortener_floor: 0.5,
            shortener_spread: 0.1,
            shortener_ceiling: 0.5,
            high_risk_threshold: 0.85,
            suspicious_threshold: 0.5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: "models/demo_model.json".to_string(),
            tables: DetectionTables::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ScamRadarError> {
        let scoring = &self.scoring;
        let probabilities = [
            ("impersonation_floor", scoring.impersonation_floor),
            ("impersonation_spread", scoring.impersonation_spread),
            ("dampening_factor", scoring.dampening_factor),
            ("shortener_floor", scoring.shortener_floor),
            ("shortener_spread", scoring.shortener_spread),
            ("shortener_ceiling", scoring.shortener_ceiling),
            ("high_risk_threshold", scoring.high_risk_threshold),
            ("suspicious_threshold", scoring.suspicious_threshold),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScamRadarError::Config(format!(
                    "scoring.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if scoring.impersonation_floor + scoring.impersonation_spread > 1.0 {
            return Err(ScamRadarError::Config(
                "impersonation_floor + impersonation_spread exceeds 1.0".to_string(),
            ));
        }

        if scoring.suspicious_threshold >= scoring.high_risk_threshold {
            return Err(ScamRadarError::Config(format!(
                "suspicious_threshold ({}) must be below high_risk_threshold ({})",
                scoring.suspicious_threshold, scoring.high_risk_threshold
            )));
        }

        for entity in &self.tables.trusted_entities {
            if entity.keyword.trim().is_empty() || entity.domain.trim().is_empty() {
                return Err(ScamRadarError::Config(format!(
                    "trusted entity '{}' -> '{}' has an empty field",
                    entity.keyword, entity.domain
                )));
            }
        }

        if self.tables.authority_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ScamRadarError::Config(
                "authority_keywords contains an empty keyword".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
