use crate::components::{ExplanationGenerator, LabelTier, ScoreCombiner, ScoreResult};
use crate::config::Config;
use crate::detection::{CaseAnalyzer, CaseInfo};
use crate::error::ScamRadarError;
use crate::features::{FeatureExtractor, FeatureSet};
use crate::machine_learning::{LinearModel, ModelInput, ProbabilityModel};
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub const SYSTEM_ERROR_LABEL: &str = "Lỗi Hệ Thống";
pub const SYSTEM_ERROR_PROBABILITY: &str = "Đã có lỗi xảy ra";
pub const MODEL_UNAVAILABLE_DETAIL: &str = "Mô hình phân loại chưa được tải.";

/// Sample messages covering each case of the analyzer.
pub const SAMPLE_MESSAGES: [&str; 5] = [
    "Chuc mung quy khach da nhan duoc 1 luot mo tu chuong trinh SAC MAU HOA BINH RINH QUA QUOC KHANH . Vui long truy cap website https://quockhanh.vietnamobile.com.vn de nhan qua.",
    "Chính phủ vừa ban hành Nghị quyết số 263/NQ-CP về việc tặng quà nhân dân nhân dịp kỷ niệm 80 năm Cách mạng tháng Tám và Quốc khánh 2.9.",
    "Con bạn đã bị tai nạn trên đường Trần Duy Hưng. Hãy chuyển cho Jack 5000000 VND để cứu con.",
    "Chính phủ đã tặng cho bạn 100.000 đồng nhân dịp 2/9. Hãy đăng kí nhận qua đường link bit.ly/nhanqua29",
    "Tai khoan SmartBanking cua ban da bi khoa. Vui long truy cap www.bidv-vn.xyz de mo khoa ngay.",
];

/// The three strings shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationOutput {
    pub label: String,
    pub probability: String,
    pub explanation: String,
}

impl ClassificationOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn system_error(detail: &str) -> Self {
        Self {
            label: SYSTEM_ERROR_LABEL.to_string(),
            probability: SYSTEM_ERROR_PROBABILITY.to_string(),
            explanation: format!("Chi tiết lỗi: {}", detail),
        }
    }

    /// System-error triple for a failed analysis.
    pub fn from_error(error: &ScamRadarError) -> Self {
        match error {
            ScamRadarError::ModelUnavailable(_) => Self::system_error(MODEL_UNAVAILABLE_DETAIL),
            ScamRadarError::ClassificationFailure(detail) => Self::system_error(detail),
            other => Self::system_error(&other.to_string()),
        }
    }

    pub fn into_tuple(self) -> (String, String, String) {
        (self.label, self.probability, self.explanation)
    }
}

/// Full record of one classification.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub features: FeatureSet,
    pub case_info: CaseInfo,
    pub score: ScoreResult,
    pub explanation: String,
}

impl Analysis {
    pub fn label(&self) -> LabelTier {
        self.score.label
    }

    pub fn to_output(&self) -> ClassificationOutput {
        ClassificationOutput {
            label: self.score.label.display_label().to_string(),
            probability: self.score.probability_display(),
            explanation: self.explanation.clone(),
        }
    }
}

/// Runs the extraction, case analysis, scoring and explanation pipeline.
///
/// Holds only read-only state, so one instance can serve concurrent callers.
pub struct ScamClassifier {
    model: Result<Box<dyn ProbabilityModel>, String>,
    case_analyzer: CaseAnalyzer,
    score_combiner: ScoreCombiner,
}

impl ScamClassifier {
    pub fn new(config: &Config, model: Box<dyn ProbabilityModel>) -> Self {
        Self::build(config, Ok(model))
    }

    /// A classifier whose model failed to load. Every non-blank message
    /// reports a system error.
    pub fn without_model(config: &Config, reason: impl Into<String>) -> Self {
        Self::build(config, Err(reason.into()))
    }

    /// Load the model artifact named by `config.model_path`, or
    /// `model_override` when given. A missing artifact is not fatal.
    pub fn from_config(config: &Config, model_override: Option<&str>) -> Self {
        let path = model_override.unwrap_or(config.model_path.as_str());
        match LinearModel::load_from_file(path) {
            Ok(model) => Self::new(config, Box::new(model)),
            Err(e) => {
                log::error!("{}. Classification is disabled.", e);
                Self::without_model(config, e.to_string())
            }
        }
    }

    fn build(config: &Config, model: Result<Box<dyn ProbabilityModel>, String>) -> Self {
        let tables = Arc::new(config.tables.clone().normalized());
        Self {
            model,
            case_analyzer: CaseAnalyzer::new(tables),
            score_combiner: ScoreCombiner::new(config.scoring.clone()),
        }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().ok().map(|m| m.name())
    }

    /// Structured analysis. `Ok(None)` for blank input.
    pub fn analyze(&self, message: &str) -> Result<Option<Analysis>, ScamRadarError> {
        if message.trim().is_empty() {
            return Ok(None);
        }

        let model = self
            .model
            .as_ref()
            .map_err(|reason| ScamRadarError::ModelUnavailable(reason.clone()))?;

        let features = FeatureExtractor::extract(message);
        let case_info = self.case_analyzer.analyze(message, &features);

        let base_probability = model
            .scam_probability(&ModelInput::from(&features))
            .map_err(|e| ScamRadarError::ClassificationFailure(format!("{:#}", e)))?;

        let score = self.score_combiner.combine(base_probability, &case_info);
        let explanation = ExplanationGenerator::explain(&features, score.label, &case_info);

        Ok(Some(Analysis {
            features,
            case_info,
            score,
            explanation,
        }))
    }

    /// Never fails: blank input yields three empty strings and any failure,
    /// including a panic inside the model, is reported through the
    /// system-error triple.
    pub fn classify(&self, message: &str) -> ClassificationOutput {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.analyze(message)))
            .unwrap_or_else(|payload| {
                let detail = panic_detail(payload.as_ref());
                log::error!("Classification panicked: {}", detail);
                Err(ScamRadarError::ClassificationFailure(detail))
            });

        match outcome {
            Ok(Some(analysis)) => analysis.to_output(),
            Ok(None) => ClassificationOutput::empty(),
            Err(e) => {
                match &e {
                    ScamRadarError::ModelUnavailable(reason) => {
                        log::error!("Cannot classify message, model unavailable: {}", reason)
                    }
                    other => log::error!("Classification failed: {}", other),
                }
                ClassificationOutput::from_error(&e)
            }
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
