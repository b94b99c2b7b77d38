use super::score_combiner::LabelTier;
use crate::detection::{CaseInfo, CaseKind};
use crate::features::FeatureSet;

const BRAND_IMPERSONATION: &str = "Cảnh báo: Tin nhắn này có dấu hiệu mạo danh một thương hiệu/nhà mạng uy tín. Nó sử dụng tên thương hiệu để tạo lòng tin nhưng lại dẫn người dùng đến một trang web giả mạo.";
const AUTHORITY_IMPERSONATION: &str = "Cảnh báo: Tin nhắn này có dấu hiệu mạo danh một tổ chức uy tín. Nó sử dụng các thuật ngữ đáng tin cậy nhưng lại yêu cầu bạn thực hiện hành động rủi ro (bấm link lạ, gọi số lạ).";
const SAFE_ANNOUNCEMENT: &str = "Ghi chú: Tin nhắn chứa từ khóa từ cơ quan/tổ chức uy tín và không yêu cầu thực hiện hành động rủi ro. Hệ thống ghi nhận đây có thể là một thông báo chính thức.";
const TRUSTED_PROMO: &str = "Ghi chú: Mặc dù tin nhắn có các đặc điểm của tin quảng cáo, hệ thống xác định đây là một chương trình hợp lệ từ một nguồn uy tín.";

const APPEARS_SAFE: &str = "Tin nhắn có vẻ an toàn, không chứa các dấu hiệu lừa đảo phổ biến.";
const SHORTENER_WARNING: &str = "Lưu ý: Tin nhắn này chứa một đường link rút gọn (ví dụ: bit.ly, t.co...). Đây là một kỹ thuật thường được sử dụng để che giấu trang web đích, người dùng cần hết sức cẩn thận.";

const HIGH_RISK_PREFIX: &str = "Cảnh báo: Tin nhắn này";
const SUSPICIOUS_PREFIX: &str = "Lưu ý: Tin nhắn này có dấu hiệu đáng ngờ vì nó";

pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn explain(features: &FeatureSet, label: LabelTier, case_info: &CaseInfo) -> String {
        if let Some(template) = Self::case_template(case_info.case) {
            return template.to_string();
        }

        match label {
            LabelTier::Unconfirmed => APPEARS_SAFE.to_string(),
            LabelTier::Suspicious if case_info.has_shortener => SHORTENER_WARNING.to_string(),
            LabelTier::Suspicious => Self::signal_summary(SUSPICIOUS_PREFIX, features),
            LabelTier::HighRisk => Self::signal_summary(HIGH_RISK_PREFIX, features),
        }
    }

    fn case_template(case: CaseKind) -> Option<&'static str> {
        match case {
            CaseKind::BrandImpersonation => Some(BRAND_IMPERSONATION),
            CaseKind::AuthorityImpersonation => Some(AUTHORITY_IMPERSONATION),
            CaseKind::SafeAnnouncement => Some(SAFE_ANNOUNCEMENT),
            CaseKind::TrustedPromo => Some(TRUSTED_PROMO),
            CaseKind::Normal => None,
        }
    }

    fn signal_summary(prefix: &str, features: &FeatureSet) -> String {
        let detected = features.detected_signals();
        if detected.is_empty() {
            format!(
                "{} chứa các từ ngữ và cấu trúc câu thường thấy trong các tin nhắn lừa đảo.",
                prefix
            )
        } else {
            format!("{} đề cập đến {}.", prefix, detected.join(", "))
        }
    }
}
