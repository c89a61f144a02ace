//! Search URLs on the ratings site.
//!
//! Both searches hit the same endpoint with a single `sw` parameter. The name
//! search writes `sw==<term>`: the extra `=` is what the site expects for a
//! free-text name query and must be kept byte for byte.

use crate::lifecycle::config::SearchConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoints {
    base_url: String,
}

impl SearchEndpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.base_url.trim())
    }

    pub fn phone_search(&self, phone: &str) -> String {
        format!("{}?sw={}", self.base_url, encode_component(phone))
    }

    pub fn name_search(&self, name: &str) -> String {
        format!("{}?sw=={}", self.base_url, encode_component(name))
    }
}

impl Default for SearchEndpoints {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

/// Percent-encodes like JavaScript's `encodeURIComponent`, which leaves
/// `! ' ( ) *` alone on top of the unreserved set.
pub fn encode_component(term: &str) -> String {
    urlencoding::encode(term)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_and_name_conventions_differ() {
        let endpoints = SearchEndpoints::default();
        assert_eq!(
            endpoints.phone_search("03-3547-6797"),
            "https://tabelog.com/rstLst/?sw=03-3547-6797"
        );
        assert_eq!(
            endpoints.name_search("Sushi Dai"),
            "https://tabelog.com/rstLst/?sw==Sushi%20Dai"
        );
    }

    #[test]
    fn test_japanese_names_are_utf8_percent_encoded() {
        assert_eq!(encode_component("すし 匠"), "%E3%81%99%E3%81%97%20%E5%8C%A0");
    }

    #[test]
    fn test_encoding_matches_encode_uri_component() {
        assert_eq!(encode_component("Joe's (Pizza)*!"), "Joe's%20(Pizza)*!");
        assert_eq!(encode_component("a&b=c/d?e#f+g"), "a%26b%3Dc%2Fd%3Fe%23f%2Bg");
        assert_eq!(encode_component("A-Z_a.z~0"), "A-Z_a.z~0");
    }

    #[test]
    fn test_custom_base_url() {
        let endpoints = SearchEndpoints::new("http://127.0.0.1:8080/rstLst/");
        assert_eq!(
            endpoints.phone_search("0120"),
            "http://127.0.0.1:8080/rstLst/?sw=0120"
        );
    }
}
