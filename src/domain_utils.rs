use url::Url;

/// Labels that act as an effective second-level suffix (`abc.com.vn`).
const SECOND_LEVEL_LABELS: [&str; 4] = ["co", "com", "gov", "org"];

/// Minimal domain hierarchy utilities
pub struct DomainUtils;

impl DomainUtils {
    /// Resolve a URL-like string to its registrable domain.
    ///
    /// Bare hosts such as `bit.ly/abc` are accepted; a scheme is assumed when
    /// missing. Returns `None` when no host can be parsed.
    pub fn registrable_domain(url: &str) -> Option<String> {
        let candidate = if url.contains("://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };

        let parsed = Url::parse(&candidate).ok()?;
        let host = parsed.host_str()?;
        if host.is_empty() {
            return None;
        }

        let host = Self::canonicalize_domain(host);
        let labels: Vec<&str> = host.split('.').collect();

        let keep = if labels.len() > 2 && SECOND_LEVEL_LABELS.contains(&labels[labels.len() - 2]) {
            3
        } else {
            2
        };

        let start = labels.len().saturating_sub(keep);
        Some(labels[start..].join("."))
    }

    /// Canonicalize domain (remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_domain_plain() {
        assert_eq!(
            DomainUtils::registrable_domain("https://shopee.vn/flash-sale"),
            Some("shopee.vn".to_string())
        );
        assert_eq!(
            DomainUtils::registrable_domain("bit.ly/nhanqua29"),
            Some("bit.ly".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_strips_www() {
        assert_eq!(
            DomainUtils::registrable_domain("www.bidv-vn.xyz"),
            Some("bidv-vn.xyz".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_second_level_suffix() {
        assert_eq!(
            DomainUtils::registrable_domain("https://quockhanh.vietnamobile.com.vn"),
            Some("vietnamobile.com.vn".to_string())
        );
        assert_eq!(
            DomainUtils::registrable_domain("dichvucong.gov.vn/portal"),
            Some("dichvucong.gov.vn".to_string())
        );
        // Two labels never take the three-label branch.
        assert_eq!(
            DomainUtils::registrable_domain("com.vn"),
            Some("com.vn".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_subdomain_of_plain_tld() {
        assert_eq!(
            DomainUtils::registrable_domain("http://login.viettel.vn/otp"),
            Some("viettel.vn".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_ignores_port_and_case() {
        assert_eq!(
            DomainUtils::registrable_domain("HTTP://Pay.MoMo.vn:8080/x"),
            Some("momo.vn".to_string())
        );
    }

    #[test]
    fn test_registrable_domain_malformed() {
        assert_eq!(DomainUtils::registrable_domain("http://"), None);
        assert_eq!(DomainUtils::registrable_domain("http://[::1"), None);
        assert_eq!(DomainUtils::registrable_domain(""), None);
    }

    #[test]
    fn test_canonicalize_domain() {
        assert_eq!(
            DomainUtils::canonicalize_domain("www.example.com"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("example.com"),
            "example.com"
        );
    }
}
