//! Parse tree types produced by the markup engine.
//!
//! Every render call produces a sequence of [`RenderNode`]s. Failures are
//! part of the tree, not exceptions: malformed input yields [`ErrorNode`]
//! markers alongside whatever content could still be resolved.

/// Classification of a recoverable parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A syntactically well-formed tag whose name is not in the registry.
    UnknownTag,
    /// A `{@` that never finds its matching `}`.
    UnclosedTag,
    /// The outer input claimed to be structured data but could not be decoded.
    MalformedDocument,
    /// A panic escaped the parser internals. Defensive boundary only;
    /// should not occur for any input.
    Internal,
}

/// An inline error marker embedded in the parse tree.
///
/// Carries enough to reconstruct what went wrong: the kind, the tag name
/// (when one could be extracted) and the original source fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub kind: ErrorKind,
    /// Tag name involved, when one could be extracted.
    pub tag: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Original source fragment, for diagnosis.
    pub fragment: Option<String>,
}

impl ErrorNode {
    /// Marker for a well-formed tag with no registry entry.
    pub fn unknown_tag(name: &str, contents: &str) -> Self {
        let fragment = if contents.is_empty() {
            format!("{{@{name}}}")
        } else {
            format!("{{@{name} {contents}}}")
        };
        ErrorNode {
            kind: ErrorKind::UnknownTag,
            tag: Some(name.to_string()),
            message: format!("unknown tag: {name}"),
            fragment: Some(fragment),
        }
    }
}

/// One node of the resolved parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// Literal text.
    Text(String),
    /// A resolved tag wrapping zero or more child nodes.
    Styled {
        /// Canonical tag name (post-alias-resolution).
        tag: String,
        children: Vec<RenderNode>,
    },
    /// A cross-record link produced by a piped tag.
    Link { label: String, target: String },
    /// A recoverable failure, rendered inline.
    Error(ErrorNode),
}

impl RenderNode {
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text(text.into())
    }

    pub fn styled(tag: impl Into<String>, children: Vec<RenderNode>) -> Self {
        RenderNode::Styled {
            tag: tag.into(),
            children,
        }
    }

    /// True for error markers of the given kind.
    pub fn is_error(&self, kind: ErrorKind) -> bool {
        matches!(self, RenderNode::Error(e) if e.kind == kind)
    }
}

/// Flattens a node sequence into its text content, ignoring all markup.
///
/// Link labels count as text; error markers contribute nothing.
pub fn plain_text(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        match node {
            RenderNode::Text(text) => out.push_str(text),
            RenderNode::Styled { children, .. } => collect_text(children, out),
            RenderNode::Link { label, .. } => out.push_str(label),
            RenderNode::Error(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_recurses_through_styles() {
        let nodes = vec![
            RenderNode::text("a "),
            RenderNode::styled(
                "bold",
                vec![
                    RenderNode::text("b "),
                    RenderNode::styled("italic", vec![RenderNode::text("c")]),
                ],
            ),
        ];
        assert_eq!(plain_text(&nodes), "a b c");
    }

    #[test]
    fn plain_text_uses_link_labels() {
        let nodes = vec![RenderNode::Link {
            label: "fireball".into(),
            target: "spells/fireball".into(),
        }];
        assert_eq!(plain_text(&nodes), "fireball");
    }

    #[test]
    fn plain_text_skips_error_markers() {
        let nodes = vec![
            RenderNode::text("ok"),
            RenderNode::Error(ErrorNode::unknown_tag("nope", "x")),
        ];
        assert_eq!(plain_text(&nodes), "ok");
    }

    #[test]
    fn unknown_tag_fragment_reconstructs_source() {
        let err = ErrorNode::unknown_tag("spell", "fireball|phb");
        assert_eq!(err.fragment.as_deref(), Some("{@spell fireball|phb}"));
        assert_eq!(err.tag.as_deref(), Some("spell"));

        let bare = ErrorNode::unknown_tag("hr", "");
        assert_eq!(bare.fragment.as_deref(), Some("{@hr}"));
    }
}
