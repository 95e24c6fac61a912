//! # Bracetag - Inline Tag Markup Engine
//!
//! `bracetag` parses a small domain-specific markup language, strings
//! containing bracketed directives like `{@b bold text}`, into a tree of
//! styled inline nodes. Tags nest arbitrarily, the vocabulary is
//! pluggable, and malformed input degrades into inline error markers
//! instead of failures: every input string, however broken, yields a
//! renderable tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use bracetag::{parse_markup, plain_text, RenderNode, TagRegistry};
//!
//! let registry = TagRegistry::standard();
//! let nodes = parse_markup("some {@b bold {@i and italic}} text", &registry);
//!
//! assert_eq!(plain_text(&nodes), "some bold and italic text");
//! assert_eq!(
//!     nodes[1],
//!     RenderNode::styled(
//!         "bold",
//!         vec![
//!             RenderNode::text("bold "),
//!             RenderNode::styled("italic", vec![RenderNode::text("and italic")]),
//!         ]
//!     )
//! );
//! ```
//!
//! ## How Parsing Works
//!
//! Every string is first classified by two cheap probes (a brace-balance
//! scan and a nesting regex), then routed to one of three resolvers:
//!
//! - flat strings take a single-pass regex scanner,
//! - nested strings take a recursive brace-depth matcher that resolves
//!   children before parents,
//! - strings with an unterminated tag take a reporter that renders what
//!   it can plus diagnostic markers, without ever attempting recursion.
//!
//! The classifier over-approximates: a string that *might* nest always
//! takes the recursive path, so nesting is never misrouted to the flat
//! scanner.
//!
//! ## Custom Vocabularies
//!
//! ```rust
//! use bracetag::{parse_markup, RenderNode, TagDefinition, TagRegistry};
//!
//! let registry = TagRegistry::builder()
//!     .tag(
//!         TagDefinition::verbatim("spell", |args| {
//!             RenderNode::styled("spell", args.into_nodes())
//!         })
//!         .alias("sp"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let nodes = parse_markup("{@sp fireball}", &registry);
//! assert_eq!(
//!     nodes,
//!     vec![RenderNode::styled("spell", vec![RenderNode::text("fireball")])]
//! );
//! ```
//!
//! ## Structured Input
//!
//! [`render`] first tries the input as JSON. A JSON object with a known
//! `type` passes through as a [`DocumentNode`] for a downstream renderer
//! to walk; a JSON string literal has its contents markup-parsed;
//! anything else is treated as literal markup text.
//!
//! ```rust
//! use bracetag::{render, DocumentNode, RenderTree, TagRegistry};
//!
//! let registry = TagRegistry::standard();
//! let tree = render(r#"{ "type": "list", "items": ["a", "b"] }"#, &registry);
//! assert!(matches!(tree, RenderTree::Document(DocumentNode::List { .. })));
//! ```

mod classify;
mod document;
mod error;
mod flat;
mod nested;
mod node;
mod registry;
mod unclosed;

pub use classify::{classify, Classification};
pub use document::{DocumentNode, Entry};
pub use error::RegistryError;
pub use flat::{scan_flat, Segment};
pub use node::{plain_text, ErrorKind, ErrorNode, RenderNode};
pub use registry::{
    ArgMode, RenderFn, TagArgs, TagContent, TagDefinition, TagRegistry, TagRegistryBuilder,
};

/// The fully-resolved result of a [`render`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTree {
    /// Inline markup resolved into render nodes.
    Markup(Vec<RenderNode>),
    /// A structured document, passed through unparsed for a downstream
    /// renderer.
    Document(DocumentNode),
}

/// Renders a raw input that may be markup text or JSON-encoded structure.
///
/// - a JSON object decodes into a [`DocumentNode`] and passes through;
///   a decode failure substitutes a synthetic [`DocumentNode::Error`]
/// - a JSON string literal has its contents parsed as markup
/// - anything else (including invalid JSON) is parsed as markup text
///
/// Like everything in this crate, this never returns an error and never
/// panics: the host always receives something renderable.
pub fn render(input: &str, registry: &TagRegistry) -> RenderTree {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(serde_json::Value::String(text)) => RenderTree::Markup(parse_markup(&text, registry)),
        Ok(value @ serde_json::Value::Object(_)) => match serde_json::from_value(value) {
            Ok(doc) => RenderTree::Document(doc),
            Err(err) => RenderTree::Document(DocumentNode::Error {
                message: err.to_string(),
            }),
        },
        _ => RenderTree::Markup(parse_markup(input, registry)),
    }
}

/// Passes an already-structured node through unchanged.
pub fn render_document(node: DocumentNode) -> RenderTree {
    RenderTree::Document(node)
}

/// Parses a markup string into render nodes.
///
/// Pure over its input: same string and registry always produce the same
/// tree, nothing is cached, and a shared registry needs no locking. Any
/// panic escaping the internals (which should not happen for any input)
/// is converted into an [`ErrorKind::Internal`] marker at this boundary.
pub fn parse_markup(input: &str, registry: &TagRegistry) -> Vec<RenderNode> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        parse_markup_inner(input, registry)
    }));
    result.unwrap_or_else(|_| {
        vec![RenderNode::Error(ErrorNode {
            kind: ErrorKind::Internal,
            tag: None,
            message: "markup parser failed unexpectedly; re-render to retry".to_string(),
            fragment: Some(input.to_string()),
        })]
    })
}

fn parse_markup_inner(input: &str, registry: &TagRegistry) -> Vec<RenderNode> {
    match classify(input) {
        Classification::Flat => scan_flat(input)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => RenderNode::Text(text),
                Segment::Tag { name, contents } => nested::resolve_tag(&name, &contents, registry),
            })
            .collect(),
        Classification::NestedClosed => nested::resolve_nested(input, registry),
        Classification::NestedUnclosed => unclosed::report_unclosed(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_string_literal_is_markup_parsed() {
        let registry = TagRegistry::standard();
        let tree = render(r#""plain {@b bold}""#, &registry);
        let RenderTree::Markup(nodes) = tree else {
            panic!("expected markup");
        };
        assert_eq!(nodes[0], RenderNode::text("plain "));
        assert_eq!(
            nodes[1],
            RenderNode::styled("bold", vec![RenderNode::text("bold")])
        );
    }

    #[test]
    fn invalid_json_falls_back_to_markup() {
        let registry = TagRegistry::standard();
        let tree = render("not json {@i at all}", &registry);
        let RenderTree::Markup(nodes) = tree else {
            panic!("expected markup");
        };
        assert_eq!(plain_text(&nodes), "not json at all");
    }

    #[test]
    fn unrecognized_object_becomes_error_document() {
        let registry = TagRegistry::standard();
        let tree = render(r#"{ "type": "hologram" }"#, &registry);
        assert!(matches!(
            tree,
            RenderTree::Document(DocumentNode::Error { .. })
        ));
    }

    #[test]
    fn structured_node_passes_through_unparsed() {
        let registry = TagRegistry::standard();
        let json = r#"{ "type": "inset", "name": "Sidebar", "entries": ["{@b kept raw}"] }"#;
        let RenderTree::Document(DocumentNode::Inset { entries, .. }) = render(json, &registry)
        else {
            panic!("expected inset pass-through");
        };
        // Markup inside entries is untouched; the downstream renderer
        // decides when to parse it.
        assert_eq!(entries, vec![Entry::Text("{@b kept raw}".into())]);
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        let registry = TagRegistry::standard();
        assert_eq!(parse_markup("", &registry), Vec::new());
    }

    #[test]
    fn render_document_is_identity() {
        let doc = DocumentNode::List { items: vec![] };
        assert_eq!(render_document(doc.clone()), RenderTree::Document(doc));
    }
}
