//! Score Combiner Component
//!
//! Applies the case-based overrides to the statistical model's scam
//! probability and maps the adjusted value onto a three-tier label.

use crate::config::ScoringConfig;
use crate::detection::CaseInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelTier {
    HighRisk,
    Suspicious,
    Unconfirmed,
}

impl LabelTier {
    /// Text shown to the user for this tier.
    pub fn display_label(&self) -> &'static str {
        match self {
            LabelTier::HighRisk => "⚠️ Khả năng cao là lừa đảo",
            LabelTier::Suspicious => "🤔 Có dấu hiệu đáng ngờ",
            LabelTier::Unconfirmed => "✅ Chưa đủ dữ kiện để xác nhận lừa đảo",
        }
    }
}

impl fmt::Display for LabelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub base_probability: f64,
    pub adjusted_probability: f64,
    pub label: LabelTier,
}

impl ScoreResult {
    /// Adjusted probability as a percentage with two decimals.
    pub fn probability_display(&self) -> String {
        format!("Khả năng lừa đảo: {:.2}%", self.adjusted_probability * 100.0)
    }
}

/// Which adjustment fired; kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjustment {
    Impersonation,
    Vetted,
    Shortener,
    Unchanged,
}

pub struct ScoreCombiner {
    config: ScoringConfig,
}

impl Default for ScoreCombiner {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoreCombiner {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn combine(&self, base_probability: f64, case_info: &CaseInfo) -> ScoreResult {
        let base_probability = base_probability.clamp(0.0, 1.0);
        let (adjustment, adjusted) = self.adjust(base_probability, case_info);
        let adjusted_probability = adjusted.clamp(0.0, 1.0);
        let label = self.label_for(adjusted_probability);

        log::debug!(
            "Score: base={:.4} adjusted={:.4} via {:?} -> {:?}",
            base_probability,
            adjusted_probability,
            adjustment,
            label
        );

        ScoreResult {
            base_probability,
            adjusted_probability,
            label,
        }
    }

    /// First applicable rule wins. The shortener tier compares against the
    /// unadjusted base probability.
    fn adjust(&self, base: f64, case_info: &CaseInfo) -> (Adjustment, f64) {
        let c = &self.config;
        if case_info.case.is_impersonation() {
            (
                Adjustment::Impersonation,
                c.impersonation_floor + base * c.impersonation_spread,
            )
        } else if case_info.case.is_vetted() {
            (Adjustment::Vetted, base * c.dampening_factor)
        } else if case_info.has_shortener && base < c.shortener_ceiling {
            (
                Adjustment::Shortener,
                c.shortener_floor + base * c.shortener_spread,
            )
        } else {
            (Adjustment::Unchanged, base)
        }
    }

    pub fn label_for(&self, adjusted_probability: f64) -> LabelTier {
        match adjusted_probability {
            p if p > self.config.high_risk_threshold => LabelTier::HighRisk,
            p if p > self.config.suspicious_threshold => LabelTier::Suspicious,
            _ => LabelTier::Unconfirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::CaseKind;

    const EPSILON: f64 = 1e-9;

    fn combine(base: f64, case: CaseKind, has_shortener: bool) -> ScoreResult {
        ScoreCombiner::default().combine(base, &CaseInfo::new(case, has_shortener))
    }

    #[test]
    fn test_impersonation_forces_high_risk() {
        for base in [0.0, 0.1, 0.5, 0.99, 1.0] {
            for case in [CaseKind::BrandImpersonation, CaseKind::AuthorityImpersonation] {
                let result = combine(base, case, false);
                assert!(result.adjusted_probability >= 0.95);
                assert!(result.adjusted_probability <= 0.999 + EPSILON);
                assert_eq!(result.label, LabelTier::HighRisk);
            }
        }
        let result = combine(0.5, CaseKind::BrandImpersonation, false);
        assert!((result.adjusted_probability - 0.9745).abs() < EPSILON);
    }

    #[test]
    fn test_vetted_cases_are_dampened() {
        for base in [0.0, 0.3, 0.9, 1.0] {
            for case in [CaseKind::SafeAnnouncement, CaseKind::TrustedPromo] {
                let result = combine(base, case, true);
                assert!(result.adjusted_probability <= 0.1 * base + EPSILON);
                assert_eq!(result.label, LabelTier::Unconfirmed);
            }
        }
    }

    #[test]
    fn test_impersonation_overrides_shortener() {
        let result = combine(0.2, CaseKind::AuthorityImpersonation, true);
        assert!((result.adjusted_probability - (0.95 + 0.2 * 0.049)).abs() < EPSILON);
    }

    #[test]
    fn test_shortener_nudges_low_probability() {
        let result = combine(0.3, CaseKind::Normal, true);
        assert!((result.adjusted_probability - 0.53).abs() < EPSILON);
        assert_eq!(result.label, LabelTier::Suspicious);

        let result = combine(0.0, CaseKind::Normal, true);
        assert!((result.adjusted_probability - 0.5).abs() < EPSILON);
        assert_eq!(result.label, LabelTier::Unconfirmed);
    }

    #[test]
    fn test_shortener_ignored_at_or_above_half() {
        let result = combine(0.5, CaseKind::Normal, true);
        assert_eq!(result.adjusted_probability, 0.5);

        let result = combine(0.7, CaseKind::Normal, true);
        assert_eq!(result.adjusted_probability, 0.7);
        assert_eq!(result.label, LabelTier::Suspicious);
    }

    #[test]
    fn test_normal_passes_through() {
        let result = combine(0.42, CaseKind::Normal, false);
        assert_eq!(result.base_probability, 0.42);
        assert_eq!(result.adjusted_probability, 0.42);
        assert_eq!(result.label, LabelTier::Unconfirmed);
    }

    #[test]
    fn test_label_boundaries() {
        let combiner = ScoreCombiner::default();
        assert_eq!(combiner.label_for(0.85), LabelTier::Suspicious);
        assert_eq!(combiner.label_for(0.850001), LabelTier::HighRisk);
        assert_eq!(combiner.label_for(0.5), LabelTier::Unconfirmed);
        assert_eq!(combiner.label_for(0.500001), LabelTier::Suspicious);
        assert_eq!(combiner.label_for(0.0), LabelTier::Unconfirmed);
    }

    #[test]
    fn test_out_of_range_base_is_clamped() {
        let result = combine(1.7, CaseKind::Normal, false);
        assert_eq!(result.adjusted_probability, 1.0);
        assert_eq!(result.label, LabelTier::HighRisk);
    }

    #[test]
    fn test_probability_display() {
        let result = combine(0.25, CaseKind::Normal, false);
        assert_eq!(result.probability_display(), "Khả năng lừa đảo: 25.00%");

        let result = combine(0.0, CaseKind::TrustedPromo, false);
        assert_eq!(result.probability_display(), "Khả năng lừa đảo: 0.00%");
    }
}
