use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Explicit `http(s)://` or `www.` links, or bare `label.tld[/path]` hosts.
/// Matched against lowercased text.
pub const URL_PATTERN: &str =
    r"(?:(?:https?://|www\.)[a-zA-Z0-9./\-_?=&%]+|[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?:/\S*)?)";

const MONEY_PATTERN: &str = r"\b\d+(?:[.,]\d+)?\s*(?:k|nghìn|triệu|tỷ|đ|vnd|vnđ|\$|usd|€|eur)\b";

const PHONE_PATTERN: &str = r"\b(\+84|0)(\d[\s.]?){8,10}\b";

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(URL_PATTERN).expect("valid url pattern"));
static MONEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(MONEY_PATTERN).expect("valid money pattern"));
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("valid phone pattern"));

/// Presence signals derived once from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub has_money: bool,
    pub has_url: bool,
    pub has_phone: bool,
    pub clean_text: String,
}

impl FeatureSet {
    /// Human labels for the signals that are present, in money/url/phone order.
    pub fn detected_signals(&self) -> Vec<&'static str> {
        [
            ("tiền bạc", self.has_money),
            ("đường link", self.has_url),
            ("số điện thoại", self.has_phone),
        ]
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect()
    }
}

pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract(text: &str) -> FeatureSet {
        let lower_text = text.to_lowercase();

        FeatureSet {
            has_money: MONEY_REGEX.is_match(&lower_text),
            has_url: URL_REGEX.is_match(&lower_text),
            has_phone: PHONE_REGEX.is_match(&lower_text),
            clean_text: text.to_string(),
        }
    }

    /// All URL-like substrings, in order of appearance. Expects lowercased text.
    pub fn extract_urls(lower_text: &str) -> Vec<&str> {
        URL_REGEX.find_iter(lower_text).map(|m| m.as_str()).collect()
    }
}
