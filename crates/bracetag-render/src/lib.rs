//! # Bracetag Render - Styled Terminal Output
//!
//! Turns [`bracetag`] parse trees into strings for a terminal. Three
//! output modes are supported:
//!
//! - [`OutputMode::Term`]: apply ANSI styles from a [`Palette`]
//! - [`OutputMode::Plain`]: strip all markup, keep the text
//! - [`OutputMode::Debug`]: keep tag boundaries visible
//!
//! Error markers produced by the parser stay visible in every mode; a
//! tree that contains failures still renders, it just renders ugly.
//!
//! ## Example
//!
//! ```rust
//! use bracetag::{parse_markup, TagRegistry};
//! use bracetag_render::{render_nodes, OutputMode, Palette};
//!
//! let registry = TagRegistry::standard();
//! let palette = Palette::standard();
//!
//! let nodes = parse_markup("some {@b bold {@i nested}} text", &registry);
//! let plain = render_nodes(&nodes, &palette, OutputMode::Plain);
//! assert_eq!(plain, "some bold nested text");
//!
//! let debug = render_nodes(&nodes, &palette, OutputMode::Debug);
//! assert_eq!(debug, "some {@bold bold {@italic nested}} text");
//! ```

use std::collections::HashMap;

use bracetag::{
    parse_markup, DocumentNode, Entry, ErrorKind, ErrorNode, RenderNode, RenderTree, TagRegistry,
};
use console::Style;

/// How to surface tags in the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Apply ANSI escape codes from the palette.
    Term,
    /// Strip all markup, outputting only the content.
    Plain,
    /// Keep tag boundaries visible, for inspecting structure.
    Debug,
}

/// Maps canonical tag names to terminal styles.
///
/// Built once and treated as read-only, like the tag registry it mirrors.
#[derive(Debug, Clone)]
pub struct Palette {
    styles: HashMap<String, Style>,
    error_style: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Palette {
            styles: HashMap::new(),
            error_style: Style::new().red().bold(),
        }
    }

    /// Styles for the standard vocabulary.
    pub fn standard() -> Self {
        Palette::new()
            .add("bold", Style::new().bold())
            .add("italic", Style::new().italic())
            .add("underline", Style::new().underlined())
            .add("strike", Style::new().strikethrough())
            .add("code", Style::new().dim())
            .add("note", Style::new().dim().italic())
            .add("link", Style::new().cyan().underlined())
    }

    /// Registers a style for a canonical tag name.
    pub fn add(mut self, name: impl Into<String>, style: Style) -> Self {
        self.styles.insert(name.into(), style);
        self
    }

    /// Overrides the style used for inline error markers.
    pub fn error_style(mut self, style: Style) -> Self {
        self.error_style = style;
        self
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }
}

/// Renders a full render tree: markup nodes directly, structured
/// documents via the document walker.
pub fn render_tree(
    tree: &RenderTree,
    registry: &TagRegistry,
    palette: &Palette,
    mode: OutputMode,
) -> String {
    match tree {
        RenderTree::Markup(nodes) => render_nodes(nodes, palette, mode),
        RenderTree::Document(doc) => render_document(doc, registry, palette, mode),
    }
}

/// Renders a node sequence into a single string.
pub fn render_nodes(nodes: &[RenderNode], palette: &Palette, mode: OutputMode) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, palette, mode, &mut out);
    }
    out
}

fn render_node(node: &RenderNode, palette: &Palette, mode: OutputMode, out: &mut String) {
    match node {
        RenderNode::Text(text) => out.push_str(text),
        RenderNode::Styled { tag, children } => {
            let inner = render_nodes(children, palette, mode);
            match mode {
                OutputMode::Plain => out.push_str(&inner),
                OutputMode::Debug => {
                    out.push_str("{@");
                    out.push_str(tag);
                    out.push(' ');
                    out.push_str(&inner);
                    out.push('}');
                }
                OutputMode::Term => match palette.get(tag) {
                    Some(style) => out.push_str(&style.apply_to(&inner).to_string()),
                    None => out.push_str(&inner),
                },
            }
        }
        RenderNode::Link { label, target } => match mode {
            OutputMode::Plain => out.push_str(label),
            OutputMode::Debug => {
                out.push_str("{@link ");
                out.push_str(label);
                out.push('|');
                out.push_str(target);
                out.push('}');
            }
            OutputMode::Term => {
                match palette.get("link") {
                    Some(style) => out.push_str(&style.apply_to(label).to_string()),
                    None => out.push_str(label),
                }
                if target != label {
                    out.push_str(" (");
                    out.push_str(target);
                    out.push(')');
                }
            }
        },
        RenderNode::Error(err) => {
            let surface = error_surface(err);
            match mode {
                OutputMode::Term => out.push_str(&palette.error_style.apply_to(surface).to_string()),
                OutputMode::Plain | OutputMode::Debug => out.push_str(&surface),
            }
        }
    }
}

/// The visible text for an error marker.
///
/// Unknown tags keep the `(flag, name, raw contents)` triple recoverable
/// from the output; other kinds surface the parser's message.
fn error_surface(err: &ErrorNode) -> String {
    match (err.kind, &err.tag, &err.fragment) {
        (ErrorKind::UnknownTag, Some(tag), Some(fragment)) => {
            format!("UNKNOWN tag=\"{tag}\" ERROR: {fragment}")
        }
        _ => err.message.clone(),
    }
}

/// Walks a structured document, markup-parsing each text entry.
pub fn render_document(
    node: &DocumentNode,
    registry: &TagRegistry,
    palette: &Palette,
    mode: OutputMode,
) -> String {
    match node {
        DocumentNode::Section { name, entries } | DocumentNode::Entries { name, entries } => {
            let mut lines = Vec::new();
            if let Some(name) = name {
                lines.push(heading(name, palette, mode));
            }
            lines.extend(entries.iter().map(|e| render_entry(e, registry, palette, mode)));
            lines.join("\n")
        }
        DocumentNode::List { items } => items
            .iter()
            .map(|item| format!("• {}", render_entry(item, registry, palette, mode)))
            .collect::<Vec<_>>()
            .join("\n"),
        DocumentNode::Inset { name, entries } => {
            let mut lines = Vec::new();
            if let Some(name) = name {
                lines.push(heading(name, palette, mode));
            }
            for entry in entries {
                lines.push(format!("  {}", render_entry(entry, registry, palette, mode)));
            }
            lines.join("\n")
        }
        DocumentNode::Quote { entries, by } => {
            let body = entries
                .iter()
                .map(|e| render_entry(e, registry, palette, mode))
                .collect::<Vec<_>>()
                .join("\n");
            match by {
                Some(by) => format!("\u{201c}{body}\u{201d}\n— {by}"),
                None => format!("\u{201c}{body}\u{201d}"),
            }
        }
        DocumentNode::Error { message } => {
            let surface = format!("document error: {message}");
            match mode {
                OutputMode::Term => palette.error_style.apply_to(surface).to_string(),
                OutputMode::Plain | OutputMode::Debug => surface,
            }
        }
    }
}

fn render_entry(
    entry: &Entry,
    registry: &TagRegistry,
    palette: &Palette,
    mode: OutputMode,
) -> String {
    match entry {
        Entry::Text(text) => render_nodes(&parse_markup(text, registry), palette, mode),
        Entry::Node(node) => render_document(node, registry, palette, mode),
    }
}

fn heading(name: &str, palette: &Palette, mode: OutputMode) -> String {
    match (mode, palette.get("bold")) {
        (OutputMode::Term, Some(style)) => style.apply_to(name).to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TagRegistry {
        TagRegistry::standard()
    }

    #[test]
    fn plain_mode_strips_all_markup() {
        let nodes = parse_markup("a {@b b {@i c}} d", &registry());
        assert_eq!(
            render_nodes(&nodes, &Palette::standard(), OutputMode::Plain),
            "a b c d"
        );
    }

    #[test]
    fn debug_mode_shows_canonical_tag_boundaries() {
        let nodes = parse_markup("{@b x {@i y}}", &registry());
        assert_eq!(
            render_nodes(&nodes, &Palette::standard(), OutputMode::Debug),
            "{@bold x {@italic y}}"
        );
    }

    #[test]
    fn unknown_tag_surface_carries_the_triple() {
        let nodes = parse_markup("{@wat huh}", &registry());
        let out = render_nodes(&nodes, &Palette::standard(), OutputMode::Plain);
        assert_eq!(out, "UNKNOWN tag=\"wat\" ERROR: {@wat huh}");
    }

    #[test]
    fn unclosed_surface_names_the_failure() {
        let nodes = parse_markup("waa {@b nope", &registry());
        let out = render_nodes(&nodes, &Palette::standard(), OutputMode::Plain);
        assert!(out.contains("unclosed tag"));
        assert!(out.contains("nope"));
        assert!(out.contains("add the missing `}`"));
    }

    #[test]
    fn link_renders_label_and_target() {
        let nodes = parse_markup("{@link docs|https://example.com}", &registry());
        let plain = render_nodes(&nodes, &Palette::standard(), OutputMode::Plain);
        assert_eq!(plain, "docs");
        let debug = render_nodes(&nodes, &Palette::standard(), OutputMode::Debug);
        assert_eq!(debug, "{@link docs|https://example.com}");
    }

    #[test]
    fn list_document_gets_bullets() {
        let doc = DocumentNode::List {
            items: vec![
                Entry::Text("plain".into()),
                Entry::Text("{@b bold}".into()),
            ],
        };
        let out = render_document(&doc, &registry(), &Palette::standard(), OutputMode::Plain);
        assert_eq!(out, "• plain\n• bold");
    }

    #[test]
    fn quote_document_carries_attribution() {
        let doc = DocumentNode::Quote {
            entries: vec![Entry::Text("words".into())],
            by: Some("someone".into()),
        };
        let out = render_document(&doc, &registry(), &Palette::standard(), OutputMode::Plain);
        assert!(out.contains("words"));
        assert!(out.ends_with("— someone"));
    }
}
