//! Single-pass scanner for markup with no nested tags.
//!
//! Used only when [`classify`](crate::classify) says the string is flat.
//! One compiled regex drives a left-to-right walk producing alternating
//! literal/tag segments; the iterator never revisits input, so adjacent
//! or empty matches cannot loop.

use once_cell::sync::Lazy;
use regex::Regex;

/// One piece of a flat markup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text between tags.
    Literal(String),
    /// A `{@name contents}` invocation; contents are plain text in the
    /// flat case.
    Tag { name: String, contents: String },
}

// `{@name}` or `{@name contents}` with a single space separating the
// name from its contents. Contents cannot contain braces in a flat
// string; anything that does not match stays literal.
static FLAT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{@(\w+)(?: ([^{}]*))?\}").expect("flat tag pattern is valid"));

/// Splits a flat markup string into literal and tag segments.
///
/// A tag-free string yields exactly one [`Segment::Literal`] equal to the
/// input; empty literal prefixes between adjacent tags are dropped.
pub fn scan_flat(s: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in FLAT_TAG.captures_iter(s) {
        let m = caps.get(0).unwrap();
        if m.start() > last {
            segments.push(Segment::Literal(s[last..m.start()].to_string()));
        }
        segments.push(Segment::Tag {
            name: caps[1].to_string(),
            contents: caps
                .get(2)
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
        });
        last = m.end();
    }
    if last < s.len() {
        segments.push(Segment::Literal(s[last..].to_string()));
    }
    segments
}
