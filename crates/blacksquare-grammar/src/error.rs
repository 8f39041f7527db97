//! Error types for the grammar crate.
//!
//! Only registry construction can fail. Tokens that do not resolve, or that
//! are ill-formed for their family, are skipped rather than reported.

use thiserror::Error;

/// Errors raised while building a [`PropertyRegistry`](crate::PropertyRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two definitions share the same name.
    #[error("duplicate property name '{0}'")]
    DuplicateName(String),

    /// A definition has an empty name.
    #[error("property definition at index {index} has an empty name")]
    EmptyName { index: usize },

    /// A definition has an empty CSS property.
    #[error("property '{name}' has no CSS property")]
    EmptyProperty { name: String },
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
