//! Depth-counting resolver for nested tag markup.
//!
//! This is the expensive path, taken only when
//! [`classify`](crate::classify) reports closed nesting. There is no
//! tokenizer: the matcher walks raw bytes keeping a brace depth counter,
//! carves out the outer tag's span, resolves its contents depth-first
//! (children are fully resolved before the parent's renderer runs) and
//! then continues with the remainder of the string.
//!
//! Recursion depth equals tag-nesting depth, not input length, so
//! realistic documents stay far from any stack limit. Each nesting level
//! re-scans only its own span, keeping total cost near-linear; no regex
//! runs on this path at all.

use crate::node::{ErrorNode, RenderNode};
use crate::registry::{ArgMode, TagArgs, TagContent, TagRegistry};
use crate::unclosed::report_unclosed;

/// Resolves a string with (closed) nested tags into render nodes.
pub(crate) fn resolve_nested(s: &str, registry: &TagRegistry) -> Vec<RenderNode> {
    let mut nodes = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let Some(open) = rest.find("{@") else {
            nodes.push(RenderNode::Text(rest.to_string()));
            break;
        };
        if open > 0 {
            nodes.push(RenderNode::Text(rest[..open].to_string()));
        }
        let Some(close) = matching_close(rest, open) else {
            // Classification guarantees balance; if that ever breaks,
            // degrade to the unclosed reporter instead of looping.
            nodes.extend(report_unclosed(&rest[open..]));
            break;
        };
        let (name, contents) = split_tag(&rest[open + 2..close]);
        nodes.push(resolve_tag(name, contents, registry));
        rest = &rest[close + 1..];
    }
    nodes
}

/// Resolves one tag invocation through the registry.
///
/// Verbatim contents containing further tags recurse first, so the
/// renderer always receives fully-resolved children. A registry miss
/// produces an inline error marker and parsing continues.
pub(crate) fn resolve_tag(name: &str, contents: &str, registry: &TagRegistry) -> RenderNode {
    let Some(def) = registry.lookup(name) else {
        return RenderNode::Error(ErrorNode::unknown_tag(name, contents));
    };
    let args = match def.mode() {
        // Pipe splitting operates on the raw unresolved text.
        ArgMode::Piped => TagArgs::Piped(contents.split('|').map(str::to_string).collect()),
        ArgMode::Verbatim if contents.contains("{@") => {
            TagArgs::Verbatim(TagContent::Nodes(resolve_nested(contents, registry)))
        }
        ArgMode::Verbatim => TagArgs::Verbatim(TagContent::Raw(contents.to_string())),
    };
    def.render(args)
}

/// Byte offset of the `}` closing the tag opened at `open`.
///
/// Depth starts at 1 for the tag just opened; every `{@` before the
/// matching close pushes a level, every `}` pops one.
fn matching_close(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 1usize;
    let mut i = open + 2;
    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'@') {
            depth += 1;
            i += 2;
        } else {
            if bytes[i] == b'}' {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            i += 1;
        }
    }
    None
}

/// Splits a tag span (`name contents`) at the end of the name token.
///
/// The name is one or more word characters; a single space separates it
/// from the contents.
pub(crate) fn split_tag(span: &str) -> (&str, &str) {
    let end = span
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(span.len());
    let name = &span[..end];
    let rest = &span[end..];
    (name, rest.strip_prefix(' ').unwrap_or(rest))
}
