//! BlackSquare grammar - utility class parsing and CSS synthesis.
//!
//! This crate turns markup that uses BlackSquare utility classes into a
//! stylesheet. It has no filesystem access: callers hand it the markup text
//! and a [`PropertyRegistry`] of design tokens, and get a CSS string back.
//!
//! # Class Families
//!
//! | Family | Example | Output |
//! |--------|---------|--------|
//! | Structured (`oo-`) | `oo-margin-top_2` | `.oo-margin-top_2 {margin-top:calc(var(--oo-margin) * 2);}` |
//! | Enumerated (`ee-`) | `ee-border-style_solid` | `.ee-border-style_solid{border-style:solid}` |
//!
//! Structured classes name a registry entry, optionally followed by a
//! declared direction suffix and an `_`-separated multiplier. Each one also
//! declares a custom property in `:root`. Enumerated classes carry their own
//! property and value and never touch the registry.
//!
//! # Pipeline
//!
//! ```text
//! text ──extract──▶ class names ──synthesize──▶ :root{...} + rules
//!                                   │
//!                      Resolver ◀───┘ (registry lookup + direction)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use blacksquare_grammar::{synthesize, PropertyDefinition, PropertyRegistry, SynthOptions};
//!
//! let registry = PropertyRegistry::new(vec![
//!     PropertyDefinition::color("text-color-primary", "color", "black"),
//! ])
//! .unwrap();
//!
//! let css = synthesize(
//!     r#"<p className="oo-text-color-primary">hi</p>"#,
//!     &registry,
//!     &SynthOptions::default(),
//! );
//! assert_eq!(
//!     css,
//!     ":root{--oo-text-color-primary: black;}.oo-text-color-primary {color:var(--oo-text-color-primary);}"
//! );
//! ```
//!
//! # Skipped Classes
//!
//! Classes that do not resolve, name an undeclared direction, or are
//! ill-formed for their family produce no output. They are assumed to be
//! ordinary markup classes, not authoring mistakes.

mod error;
mod extract;
mod registry;
mod resolve;
mod synth;
mod token;

// Re-export public API
pub use error::{RegistryError, Result};
pub use extract::{class_name_occurrences, extract_class_names};
pub use registry::{PropertyDefinition, PropertyKind, PropertyRegistry, TokenValue};
pub use resolve::{resolve_direction, Direction, MatchPolicy, Resolver, SIDE_SUFFIXES};
pub use synth::{synthesize, Stylesheet, SynthOptions, Synthesizer, DEFAULT_UNIT};
pub use token::{
    strip_prefix, ClassToken, EnumeratedToken, StructuredToken, ENUMERATED_PREFIX,
    STRUCTURED_PREFIX,
};
