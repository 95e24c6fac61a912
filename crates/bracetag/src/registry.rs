//! Tag vocabulary: names, aliases, argument modes and renderers.
//!
//! A [`TagRegistry`] maps tag names to renderer functions. It is built
//! once, validated, and treated as read-only afterwards; the parser only
//! ever looks names up in it. Sharing a registry across threads needs no
//! synchronization.
//!
//! # Example
//!
//! ```rust
//! use bracetag::{parse_markup, RenderNode, TagDefinition, TagRegistry};
//!
//! let registry = TagRegistry::builder()
//!     .tag(
//!         TagDefinition::verbatim("shout", |args| {
//!             RenderNode::styled("shout", args.into_nodes())
//!         })
//!         .alias("sh"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let nodes = parse_markup("{@sh hey}", &registry);
//! assert_eq!(
//!     nodes,
//!     vec![RenderNode::styled("shout", vec![RenderNode::text("hey")])]
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::node::RenderNode;

/// How a tag's inner content is turned into renderer arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    /// The content is handed to the renderer as-is: a raw string for flat
    /// tags, resolved child nodes when the content itself contains tags.
    Verbatim,
    /// The raw content is split on `|` into positional slots before the
    /// renderer runs.
    ///
    /// Splitting operates on the *unresolved* text: nested tags inside an
    /// individual pipe argument are not resolved first. This is a
    /// documented limitation of the format, not an oversight.
    Piped,
}

/// Content handed to a verbatim renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum TagContent {
    /// Flat content with no tags inside.
    Raw(String),
    /// Fully-resolved child nodes (content contained nested tags).
    Nodes(Vec<RenderNode>),
}

/// Arguments handed to a tag renderer, shaped by the tag's [`ArgMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum TagArgs {
    Verbatim(TagContent),
    Piped(Vec<String>),
}

impl TagArgs {
    /// Positional pipe-delimited slot `i`, when present.
    ///
    /// For verbatim raw content, slot 0 is the whole content.
    pub fn part(&self, i: usize) -> Option<&str> {
        match self {
            TagArgs::Piped(parts) => parts.get(i).map(String::as_str),
            TagArgs::Verbatim(TagContent::Raw(s)) if i == 0 => Some(s),
            TagArgs::Verbatim(_) => None,
        }
    }

    /// Consumes the arguments into child render nodes.
    pub fn into_nodes(self) -> Vec<RenderNode> {
        match self {
            TagArgs::Verbatim(TagContent::Raw(s)) => {
                if s.is_empty() {
                    Vec::new()
                } else {
                    vec![RenderNode::Text(s)]
                }
            }
            TagArgs::Verbatim(TagContent::Nodes(nodes)) => nodes,
            TagArgs::Piped(parts) => vec![RenderNode::Text(parts.join("|"))],
        }
    }
}

/// Renderer function invoked once a tag's arguments are resolved.
pub type RenderFn = Arc<dyn Fn(TagArgs) -> RenderNode + Send + Sync>;

/// A single entry in the tag vocabulary.
#[derive(Clone)]
pub struct TagDefinition {
    canonical: String,
    aliases: Vec<String>,
    mode: ArgMode,
    render: RenderFn,
}

impl TagDefinition {
    /// A tag whose content passes straight through to the renderer.
    pub fn verbatim(
        canonical: impl Into<String>,
        render: impl Fn(TagArgs) -> RenderNode + Send + Sync + 'static,
    ) -> Self {
        TagDefinition {
            canonical: canonical.into(),
            aliases: Vec::new(),
            mode: ArgMode::Verbatim,
            render: Arc::new(render),
        }
    }

    /// A tag whose raw content is split on `|` into positional slots.
    pub fn piped(
        canonical: impl Into<String>,
        render: impl Fn(TagArgs) -> RenderNode + Send + Sync + 'static,
    ) -> Self {
        TagDefinition {
            canonical: canonical.into(),
            aliases: Vec::new(),
            mode: ArgMode::Piped,
            render: Arc::new(render),
        }
    }

    /// Registers an additional name resolving to this tag.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn mode(&self) -> ArgMode {
        self.mode
    }

    /// Invokes the tag's renderer.
    pub fn render(&self, args: TagArgs) -> RenderNode {
        (self.render)(args)
    }
}

impl fmt::Debug for TagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagDefinition")
            .field("canonical", &self.canonical)
            .field("aliases", &self.aliases)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Immutable tag-name → definition table.
///
/// Both canonical names and aliases resolve to the same definition. Use
/// [`TagRegistry::standard`] for the built-in vocabulary or
/// [`TagRegistry::builder`] to construct your own.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, Arc<TagDefinition>>,
}

impl TagRegistry {
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder { defs: Vec::new() }
    }

    /// The built-in vocabulary: `bold` (`b`), `italic` (`i`), `underline`
    /// (`u`), `strike` (`s`), `code`, `note`, and the piped `link` tag
    /// (`label|target`).
    pub fn standard() -> Self {
        TagRegistry::builder()
            .tag(TagDefinition::verbatim("bold", style_renderer("bold")).alias("b"))
            .tag(TagDefinition::verbatim("italic", style_renderer("italic")).alias("i"))
            .tag(TagDefinition::verbatim("underline", style_renderer("underline")).alias("u"))
            .tag(TagDefinition::verbatim("strike", style_renderer("strike")).alias("s"))
            .tag(TagDefinition::verbatim("code", style_renderer("code")))
            .tag(TagDefinition::verbatim("note", style_renderer("note")))
            .tag(TagDefinition::piped("link", |args| {
                let label = args.part(0).unwrap_or("").to_string();
                let target = args
                    .part(1)
                    .map(str::to_string)
                    .unwrap_or_else(|| label.clone());
                RenderNode::Link { label, target }
            }))
            .build()
            .expect("built-in vocabulary is consistent")
    }

    /// Resolves a tag name (canonical or alias) to its definition.
    ///
    /// A miss is an expected outcome, not an error: the parser renders an
    /// inline marker for unknown tags and keeps going.
    pub fn lookup(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name).map(Arc::as_ref)
    }

    /// Number of registered definitions, aliases not counted.
    pub fn len(&self) -> usize {
        self.tags
            .values()
            .map(|def| def.canonical())
            .collect::<std::collections::HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Builder for [`TagRegistry`]; validates name uniqueness on `build`.
#[derive(Debug, Default)]
pub struct TagRegistryBuilder {
    defs: Vec<TagDefinition>,
}

impl TagRegistryBuilder {
    pub fn tag(mut self, def: TagDefinition) -> Self {
        self.defs.push(def);
        self
    }

    /// Validates that canonical names are unique and every alias resolves
    /// to exactly one definition.
    pub fn build(self) -> Result<TagRegistry, RegistryError> {
        let mut tags: HashMap<String, Arc<TagDefinition>> = HashMap::new();
        for def in self.defs {
            let def = Arc::new(def);
            if let Some(existing) = tags.get(def.canonical()) {
                return Err(RegistryError::DuplicateTag(existing.canonical().to_string()));
            }
            tags.insert(def.canonical().to_string(), Arc::clone(&def));
            for alias in def.aliases() {
                if let Some(existing) = tags.get(alias) {
                    return Err(RegistryError::AliasCollision {
                        alias: alias.clone(),
                        canonical: def.canonical().to_string(),
                        existing: existing.canonical().to_string(),
                    });
                }
                tags.insert(alias.clone(), Arc::clone(&def));
            }
        }
        Ok(TagRegistry { tags })
    }
}

fn style_renderer(tag: &'static str) -> impl Fn(TagArgs) -> RenderNode + Send + Sync {
    move |args| RenderNode::styled(tag, args.into_nodes())
}
