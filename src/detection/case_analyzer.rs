use super::{CaseInfo, CaseKind};
use crate::config::{DetectionTables, TrustedEntity};
use crate::domain_utils::DomainUtils;
use crate::features::{FeatureExtractor, FeatureSet};
use std::sync::Arc;

/// Outcome of checking one trusted-entity alias against a message.
enum EntityVerdict {
    /// Alias absent, or present without any link to judge.
    Skip,
    Trusted,
    Impersonated,
}

/// Classifies a message into a [`CaseKind`] using the brand, authority and
/// shortener tables. The tables are shared and never mutated.
#[derive(Debug, Clone)]
pub struct CaseAnalyzer {
    tables: Arc<DetectionTables>,
}

impl Default for CaseAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(DetectionTables::default()))
    }
}

impl CaseAnalyzer {
    pub fn new(tables: Arc<DetectionTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &DetectionTables {
        &self.tables
    }

    pub fn analyze(&self, text: &str, features: &FeatureSet) -> CaseInfo {
        let lower_text = text.to_lowercase();
        let domains: Vec<Option<String>> = FeatureExtractor::extract_urls(&lower_text)
            .into_iter()
            .map(DomainUtils::registrable_domain)
            .collect();

        let has_shortener = domains
            .iter()
            .flatten()
            .any(|domain| self.tables.is_shortener(domain));

        let case = self
            .check_trusted_entities(&lower_text, &domains)
            .unwrap_or_else(|| self.check_authority(&lower_text, features));

        log::debug!(
            "Case analysis: case={} has_shortener={} urls={}",
            case,
            has_shortener,
            domains.len()
        );

        CaseInfo::new(case, has_shortener)
    }

    /// First alias (in table order) that appears alongside a link decides the case.
    fn check_trusted_entities(
        &self,
        lower_text: &str,
        domains: &[Option<String>],
    ) -> Option<CaseKind> {
        self.tables
            .trusted_entities
            .iter()
            .find_map(|entity| match Self::judge_entity(entity, lower_text, domains) {
                EntityVerdict::Skip => None,
                EntityVerdict::Trusted => Some(CaseKind::TrustedPromo),
                EntityVerdict::Impersonated => {
                    log::debug!(
                        "Brand alias '{}' links away from {}",
                        entity.keyword,
                        entity.domain
                    );
                    Some(CaseKind::BrandImpersonation)
                }
            })
    }

    fn judge_entity(
        entity: &TrustedEntity,
        lower_text: &str,
        domains: &[Option<String>],
    ) -> EntityVerdict {
        if !lower_text.contains(&entity.keyword) || domains.is_empty() {
            return EntityVerdict::Skip;
        }

        let links_to_trusted = domains
            .iter()
            .flatten()
            .any(|domain| *domain == entity.domain);

        if links_to_trusted {
            EntityVerdict::Trusted
        } else {
            EntityVerdict::Impersonated
        }
    }

    fn check_authority(&self, lower_text: &str, features: &FeatureSet) -> CaseKind {
        let is_authority = self
            .tables
            .authority_keywords
            .iter()
            .any(|keyword| lower_text.contains(keyword.as_str()));

        if !is_authority {
            return CaseKind::Normal;
        }

        if features.has_url || features.has_phone {
            CaseKind::AuthorityImpersonation
        } else {
            CaseKind::SafeAnnouncement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> CaseInfo {
        let features = FeatureExtractor::extract(text);
        CaseAnalyzer::default().analyze(text, &features)
    }

    #[test]
    fn test_brand_impersonation_smartbanking() {
        let info = analyze(
            "Tai khoan SmartBanking cua ban da bi khoa. Vui long truy cap www.bidv-vn.xyz de mo khoa ngay.",
        );
        assert_eq!(info.case, CaseKind::BrandImpersonation);
        assert!(!info.has_shortener);
    }

    #[test]
    fn test_trusted_promo_with_official_domain() {
        let info = analyze(
            "Chuc mung quy khach da nhan duoc 1 luot mo tu chuong trinh SAC MAU HOA BINH RINH QUA QUOC KHANH . Vui long truy cap website https://quockhanh.vietnamobile.com.vn de nhan qua.",
        );
        assert_eq!(info.case, CaseKind::TrustedPromo);
    }

    #[test]
    fn test_authority_with_shortener() {
        let info = analyze(
            "Chính phủ đã tặng cho bạn 100.000 đồng nhân dịp 2/9. Hãy đăng kí nhận qua đường link bit.ly/nhanqua29",
        );
        assert_eq!(info.case, CaseKind::AuthorityImpersonation);
        assert!(info.has_shortener);
    }

    #[test]
    fn test_authority_without_risky_action_is_safe() {
        let info = analyze(
            "Chính phủ vừa ban hành Nghị quyết số 263/NQ-CP về việc tặng quà nhân dân nhân dịp kỷ niệm 80 năm Cách mạng tháng Tám và Quốc khánh 2.9.",
        );
        assert_eq!(info.case, CaseKind::SafeAnnouncement);
        assert!(!info.has_shortener);
    }

    #[test]
    fn test_authority_with_phone_is_impersonation() {
        let info = analyze("Bộ Công An yêu cầu bạn gọi ngay 0912345678 để xác minh");
        assert_eq!(info.case, CaseKind::AuthorityImpersonation);
    }

    #[test]
    fn test_brand_without_link_falls_through() {
        // Alias present but nothing to compare against: authority check decides.
        let info = analyze("Shopee thông báo: nhà nước hỗ trợ phí vận chuyển");
        assert_eq!(info.case, CaseKind::SafeAnnouncement);

        let info = analyze("Cam on ban da dung Momo");
        assert_eq!(info.case, CaseKind::Normal);
    }

    #[test]
    fn test_first_alias_in_table_order_wins() {
        // "viettel" precedes "viettelpay"; both resolve to viettel.vn.
        let info = analyze("ViettelPay khuyen mai tai https://viettel.vn/uu-dai");
        assert_eq!(info.case, CaseKind::TrustedPromo);

        // "bidv" is checked before "tiki" and decides impersonation.
        let info = analyze("BIDV va Tiki tang qua tai tiki.vn/qua");
        assert_eq!(info.case, CaseKind::BrandImpersonation);
    }

    #[test]
    fn test_brand_with_any_trusted_link_is_promo() {
        let info = analyze("Shopee: xem tai shopee.vn/sale hoac lazada.vn");
        assert_eq!(info.case, CaseKind::TrustedPromo);
    }

    #[test]
    fn test_shortener_flag_on_normal_message() {
        let info = analyze("Xem anh cua ban o day tinyurl.com/abcd");
        assert_eq!(info.case, CaseKind::Normal);
        assert!(info.has_shortener);
    }

    #[test]
    fn test_normal_message() {
        let info = analyze("Toi nay an com o nha nhe");
        assert_eq!(info, CaseInfo::new(CaseKind::Normal, false));
    }

    #[test]
    fn test_custom_tables() {
        let tables = DetectionTables {
            trusted_entities: vec![TrustedEntity {
                keyword: "zalopay".to_string(),
                domain: "zalopay.vn".to_string(),
            }],
            authority_keywords: vec![],
            shortener_domains: vec!["rb.gy".to_string()],
        };
        let analyzer = CaseAnalyzer::new(Arc::new(tables));
        let text = "ZaloPay hoan tien tai rb.gy/xyz";
        let info = analyzer.analyze(text, &FeatureExtractor::extract(text));
        assert_eq!(info.case, CaseKind::BrandImpersonation);
        assert!(info.has_shortener);
    }
}
