//! Structured document boundary.
//!
//! The markup engine itself only parses inline strings. Surrounding
//! hierarchical content (sections, lists, insets, quotes) arrives as
//! JSON with a `type` discriminator and passes through this crate
//! untouched; walking it is the job of a downstream renderer.
//!
//! The vocabulary here is deliberately a closed sum type with one
//! variant per node kind: dispatch happens on the enum, never on
//! runtime property probing.

use serde::{Deserialize, Serialize};

/// A structured document node, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentNode {
    /// A titled top-level section.
    Section {
        name: Option<String>,
        #[serde(default)]
        entries: Vec<Entry>,
    },
    /// An untitled or sub-titled run of entries.
    Entries {
        name: Option<String>,
        #[serde(default)]
        entries: Vec<Entry>,
    },
    /// A bulleted list.
    List {
        #[serde(default)]
        items: Vec<Entry>,
    },
    /// A visually offset box.
    Inset {
        name: Option<String>,
        #[serde(default)]
        entries: Vec<Entry>,
    },
    /// A quotation with optional attribution.
    Quote {
        #[serde(default)]
        entries: Vec<Entry>,
        by: Option<String>,
    },
    /// Synthetic node substituted when structured input cannot be
    /// decoded; carries the decode error text.
    Error { message: String },
}

/// An entry inside a structured node: raw markup text or a nested node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Node(Box<DocumentNode>),
}
