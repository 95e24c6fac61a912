//! Partial rendering of markup with an unterminated tag.
//!
//! Recursive resolution is never attempted on unbalanced input (it could
//! scan forever looking for a close that does not exist). Instead this
//! reporter produces a human-diagnosable rendering: everything before the
//! dangling open stays literal, the dangling tag gets an inline marker,
//! the trailing text is rendered raw (it sits inside an unterminated
//! construct and cannot be trusted), and a final diagnostic node names
//! the failure and the fix.

use crate::classify::first_unclosed;
use crate::nested::split_tag;
use crate::node::{ErrorKind, ErrorNode, RenderNode};

/// Renders unbalanced markup without parsing past the dangling open.
///
/// Never panics; always returns something renderable.
pub(crate) fn report_unclosed(s: &str) -> Vec<RenderNode> {
    let Some(open) = first_unclosed(s) else {
        // Balanced input should never be routed here; pass it through.
        return vec![RenderNode::Text(s.to_string())];
    };

    let mut nodes = Vec::new();
    if open > 0 {
        nodes.push(RenderNode::Text(s[..open].to_string()));
    }

    let (name, trailing) = split_tag(&s[open + 2..]);
    nodes.push(RenderNode::Error(ErrorNode {
        kind: ErrorKind::UnclosedTag,
        tag: (!name.is_empty()).then(|| name.to_string()),
        message: format!("{{@{name} ← unclosed tag"),
        fragment: Some(s[open..].to_string()),
    }));

    if !trailing.is_empty() {
        nodes.push(RenderNode::Text(trailing.to_string()));
    }

    nodes.push(RenderNode::Error(ErrorNode {
        kind: ErrorKind::UnclosedTag,
        tag: (!name.is_empty()).then(|| name.to_string()),
        message: "string could not be fully parsed: a tag is never closed; \
                  add the missing `}`"
            .to_string(),
        fragment: None,
    }));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_after_closed_tag() {
        let nodes = report_unclosed("waa {@b bold} {@b never ever closing!");
        assert_eq!(nodes.len(), 4);
        // Prefix stays literal, including the already-closed tag.
        assert_eq!(nodes[0], RenderNode::Text("waa {@b bold} ".into()));
        let RenderNode::Error(err) = &nodes[1] else {
            panic!("expected dangling-tag marker, got {:?}", nodes[1]);
        };
        assert_eq!(err.kind, ErrorKind::UnclosedTag);
        assert_eq!(err.tag.as_deref(), Some("b"));
        assert!(err.message.contains("unclosed tag"));
        assert_eq!(nodes[2], RenderNode::Text("never ever closing!".into()));
        assert!(nodes[3].is_error(ErrorKind::UnclosedTag));
    }

    #[test]
    fn outer_unclosed_with_balanced_inner() {
        let nodes = report_unclosed("waa {@b never ever closing! {@b bold}");
        assert_eq!(nodes[0], RenderNode::Text("waa ".into()));
        assert!(nodes[1].is_error(ErrorKind::UnclosedTag));
        // Trailing raw text is not re-parsed.
        assert_eq!(
            nodes[2],
            RenderNode::Text("never ever closing! {@b bold}".into())
        );
    }

    #[test]
    fn dangling_at_start_has_no_prefix_node() {
        let nodes = report_unclosed("{@i oops");
        assert!(nodes[0].is_error(ErrorKind::UnclosedTag));
        assert_eq!(nodes[1], RenderNode::Text("oops".into()));
    }

    #[test]
    fn marker_fragment_carries_raw_suffix() {
        let nodes = report_unclosed("x {@u dangling text");
        let RenderNode::Error(err) = &nodes[1] else {
            panic!("expected error marker");
        };
        assert_eq!(err.fragment.as_deref(), Some("{@u dangling text"));
    }

    #[test]
    fn balanced_input_passes_through() {
        let nodes = report_unclosed("all fine");
        assert_eq!(nodes, vec![RenderNode::Text("all fine".into())]);
    }
}
