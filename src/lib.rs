pub mod classifier;
pub mod components;
pub mod config;
pub mod detection;
pub mod domain_utils;
pub mod error;
pub mod features;
pub mod machine_learning;

pub use classifier::{Analysis, ClassificationOutput, ScamClassifier, SAMPLE_MESSAGES};
pub use components::{LabelTier, ScoreResult};
pub use config::Config;
pub use detection::{CaseInfo, CaseKind};
pub use error::ScamRadarError;
pub use features::{FeatureExtractor, FeatureSet};
pub use machine_learning::{LinearModel, ModelInput, ProbabilityModel};
