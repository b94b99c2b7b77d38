//! Decision components applied after case analysis
//!
//! The score combiner turns the model's base probability into an adjusted
//! probability and label tier; the explanation generator describes the result.

pub mod explanation;
pub mod score_combiner;

pub use explanation::ExplanationGenerator;
pub use score_combiner::{LabelTier, ScoreCombiner, ScoreResult};
