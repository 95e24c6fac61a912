//! Error types for registry construction.
//!
//! Parse-time failures never surface as `Err` values; they become
//! [`ErrorNode`](crate::ErrorNode) markers in the tree. The only
//! `Result`-typed errors in this crate come from building a
//! [`TagRegistry`](crate::TagRegistry) with an inconsistent vocabulary.

use thiserror::Error;

/// Errors raised while building a [`TagRegistry`](crate::TagRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two definitions claim the same canonical name.
    #[error("duplicate tag: {0}")]
    DuplicateTag(String),

    /// An alias collides with an existing canonical name or alias.
    #[error("alias `{alias}` for `{canonical}` collides with existing tag `{existing}`")]
    AliasCollision {
        alias: String,
        canonical: String,
        existing: String,
    },
}
