pub mod case_analyzer;

pub use case_analyzer::CaseAnalyzer;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a message. Exactly one applies per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseKind {
    TrustedPromo,
    BrandImpersonation,
    AuthorityImpersonation,
    SafeAnnouncement,
    Normal,
}

impl CaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::TrustedPromo => "TRUSTED_PROMO",
            CaseKind::BrandImpersonation => "BRAND_IMPERSONATION",
            CaseKind::AuthorityImpersonation => "AUTHORITY_IMPERSONATION",
            CaseKind::SafeAnnouncement => "SAFE_ANNOUNCEMENT",
            CaseKind::Normal => "NORMAL",
        }
    }

    pub fn is_impersonation(&self) -> bool {
        matches!(
            self,
            CaseKind::BrandImpersonation | CaseKind::AuthorityImpersonation
        )
    }

    pub fn is_vetted(&self) -> bool {
        matches!(self, CaseKind::SafeAnnouncement | CaseKind::TrustedPromo)
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInfo {
    pub case: CaseKind,
    pub has_shortener: bool,
}

impl CaseInfo {
    pub fn new(case: CaseKind, has_shortener: bool) -> Self {
        Self {
            case,
            has_shortener,
        }
    }
}
