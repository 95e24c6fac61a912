//! Cheap pre-classification of markup strings.
//!
//! Before committing to a parse strategy, every input goes through two
//! lightweight probes:
//!
//! 1. a brace-balance scan that finds the first `{@` with no matching `}`,
//! 2. a regex probe for a second `{@` opening before the first close.
//!
//! The nesting probe is a conservative over-approximation: it may send a
//! string to the recursive matcher that the flat scanner could also have
//! handled, but anything structurally nested is never misrouted to the
//! flat path (which cannot handle nesting and would leave literal braces
//! in the output). Unbalanced input always classifies as unclosed, nested
//! or not, so it only ever reaches the reporter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Outcome of the pre-parse probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No tag contains another tag; the flat scanner applies.
    Flat,
    /// At least one tag nests inside another and every open has a close.
    NestedClosed,
    /// Some `{@` never finds its `}`; only the unclosed reporter may
    /// touch this string.
    NestedUnclosed,
}

// A second `{@` before the first `}` that would close the current tag.
static NESTED_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{@[^}]*\{@").expect("nesting probe pattern is valid"));

/// Classifies a markup string without parsing it.
pub fn classify(s: &str) -> Classification {
    if first_unclosed(s).is_some() {
        Classification::NestedUnclosed
    } else if NESTED_PROBE.is_match(s) {
        Classification::NestedClosed
    } else {
        Classification::Flat
    }
}

/// Byte offset of the first `{@` whose tag is never closed, or `None`
/// when every open is balanced.
///
/// Only `{@` counts as an open; a stray `}` with nothing open is literal
/// text and ignored.
pub(crate) fn first_unclosed(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut opens: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'@') {
            opens.push(i);
            i += 2;
        } else {
            if bytes[i] == b'}' {
                opens.pop();
            }
            i += 1;
        }
    }
    opens.first().copied()
}
