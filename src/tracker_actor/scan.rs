//! Reading a place out of a page snapshot.
//!
//! All functions here are pure over [`PageSnapshot`].

use crate::tracker_actor::{NodeId, PageSnapshot};
use regex::Regex;
use std::sync::LazyLock;

/// Digits and hyphens, starting and ending on a digit.
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9][0-9-]+[0-9])").expect("phone pattern is valid"));

/// The place found on the page and the element the badge attaches to.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPlace {
    pub name: String,
    pub anchor: NodeId,
}

/// Hiragana, Katakana, Kanji (incl. extension A), CJK punctuation and
/// full/half-width forms.
pub fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'
        | '\u{3040}'..='\u{309F}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{FF00}'..='\u{FF9F}'
        | '\u{4E00}'..='\u{9FAF}'
        | '\u{3400}'..='\u{4DBF}')
}

pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

/// Finds the place on screen.
///
/// The title is the first visible heading that is not a placeholder. A
/// Japanese-script subheading, when present, replaces it as both the name and
/// the anchor: the ratings site indexes places by their Japanese name.
pub fn detect_place(snapshot: &PageSnapshot, ignored_titles: &[String]) -> Option<DetectedPlace> {
    let title = snapshot.headings.iter().find(|heading| {
        let text = heading.text.trim();
        heading.visible && !text.is_empty() && !ignored_titles.iter().any(|t| t == text)
    })?;

    if let Some(japanese) = japanese_name(snapshot) {
        return Some(japanese);
    }

    Some(DetectedPlace {
        name: title.text.trim().to_string(),
        anchor: title.node,
    })
}

fn japanese_name(snapshot: &PageSnapshot) -> Option<DetectedPlace> {
    snapshot.subheadings.iter().find_map(|sub| {
        let from_span = sub
            .first_span
            .as_ref()
            .filter(|span| contains_japanese(&span.text))
            .map(|span| (span.text.trim(), span.node));
        let candidate = from_span.or_else(|| {
            contains_japanese(&sub.text).then(|| (sub.text.trim(), sub.node))
        });
        candidate
            .filter(|(text, _)| !text.is_empty())
            .map(|(text, node)| DetectedPlace {
                name: text.to_string(),
                anchor: node,
            })
    })
}

/// Phone number from the first control whose label starts with one of
/// `prefixes`. Absent when no label matches or the label holds no number.
pub fn extract_phone(snapshot: &PageSnapshot, prefixes: &[String]) -> Option<String> {
    let label = snapshot.controls.iter().find_map(|control| {
        control
            .label
            .as_deref()
            .filter(|label| prefixes.iter().any(|p| label.starts_with(p.as_str())))
    })?;

    PHONE_NUMBER
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
