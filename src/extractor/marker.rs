//! Tolerant markers.
//!
//! A [`Marker`] names one structural landmark of the ratings site's markup. Every
//! lookup answers `Option`: a marker that is not present yields `None` for that
//! field and nothing else, so one missing landmark never sinks a whole parse.

use regex::Regex;
use tracing::debug;

pub struct Marker {
    name: &'static str,
    pattern: Regex,
}

impl Marker {
    /// Compiles a marker from a constant pattern.
    ///
    /// # Panics
    /// If `pattern` is not a valid regex. Patterns are literals in this crate.
    pub fn compile(name: &'static str, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for marker '{}': {}", name, e));
        Self { name, pattern }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Byte offset where the first occurrence starts.
    pub fn locate(&self, html: &str) -> Option<usize> {
        self.pattern.find(html).map(|m| m.start())
    }

    /// Text of the first capture group of the first occurrence.
    pub fn capture<'h>(&self, html: &'h str) -> Option<&'h str> {
        self.pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// First capture parsed as a decimal; malformed text is treated as absent.
    pub fn capture_decimal(&self, html: &str) -> Option<f64> {
        let text = self.capture(html)?;
        let value = parse_decimal(text);
        if value.is_none() {
            debug!(marker = self.name, text, "Malformed decimal");
        }
        value
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
