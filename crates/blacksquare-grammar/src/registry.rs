//! Design-token definitions and the registry that indexes them.
//!
//! A [`PropertyRegistry`] is built once from configuration and only read
//! afterwards. Besides keeping definitions in their declared order, it
//! precomputes an index keyed by *full stripped name*: the definition name
//! followed by each of its declared direction suffixes.
//!
//! ```text
//! margin  (direction: ["", "-top", "-left"])
//!   "margin"      -> margin, ""
//!   "margin-top"  -> margin, "-top"
//!   "margin-left" -> margin, "-left"
//! ```
//!
//! A literally registered name always takes the slot over a composed
//! `name + suffix` key, so a registry holding both `margin` (with `-top`)
//! and a standalone `margin-top` resolves `margin-top` to the latter.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::{RegistryError, Result};

/// The value family of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Numeric token consumed through `calc()`, declared with a unit.
    Range,
    /// Literal token (usually a color) consumed through `var()`.
    Color,
}

/// The declared value of a design token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

/// A single design token as declared in the `props` section of the
/// configuration file.
///
/// Field names follow the configuration format (`type`, `val`,
/// `direction`); the longer spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub property: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: PropertyKind,
    #[serde(rename = "val", alias = "value")]
    pub value: TokenValue,
    #[serde(default, rename = "direction", alias = "directions")]
    pub directions: Vec<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

impl PropertyDefinition {
    /// Creates a range definition without directions or bounds.
    pub fn range(name: &str, property: &str, value: f64) -> Self {
        Self::new(name, property, PropertyKind::Range, TokenValue::Number(value))
    }

    /// Creates a color definition.
    pub fn color(name: &str, property: &str, value: &str) -> Self {
        Self::new(name, property, PropertyKind::Color, TokenValue::from(value))
    }

    fn new(name: &str, property: &str, kind: PropertyKind, value: TokenValue) -> Self {
        Self {
            name: name.to_string(),
            property: property.to_string(),
            kind,
            value,
            directions: Vec::new(),
            min: None,
            max: None,
            step: None,
        }
    }

    /// Sets the declared direction suffixes.
    pub fn with_directions<I, S>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directions = directions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `min`/`max`/`step` bounds.
    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    /// Declared direction suffixes.
    ///
    /// A definition without a `direction` list behaves as if it declared
    /// only the empty suffix.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        let fallback = self.directions.is_empty().then_some("");
        self.directions
            .iter()
            .map(String::as_str)
            .chain(fallback)
    }

    /// Returns `true` for range tokens.
    pub fn is_range(&self) -> bool {
        self.kind == PropertyKind::Range
    }
}

#[derive(Debug, Clone)]
struct IndexEntry {
    definition: usize,
    suffix: String,
}

/// Ordered, read-only collection of [`PropertyDefinition`]s.
///
/// Deserializes directly from the `props` array, validating as it goes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<PropertyDefinition>")]
pub struct PropertyRegistry {
    definitions: Vec<PropertyDefinition>,
    by_name: HashMap<String, usize>,
    index: HashMap<String, IndexEntry>,
}

impl PropertyRegistry {
    /// Builds a registry, validating names and normalizing directions.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EmptyName`] if a definition has no name
    /// - [`RegistryError::EmptyProperty`] if a definition has no CSS property
    /// - [`RegistryError::DuplicateName`] if two definitions share a name
    pub fn new(definitions: Vec<PropertyDefinition>) -> Result<Self> {
        let mut definitions = definitions;
        let mut by_name = HashMap::with_capacity(definitions.len());

        for (i, def) in definitions.iter_mut().enumerate() {
            if def.name.is_empty() {
                return Err(RegistryError::EmptyName { index: i });
            }
            if def.property.is_empty() {
                return Err(RegistryError::EmptyProperty {
                    name: def.name.clone(),
                });
            }
            if by_name.insert(def.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateName(def.name.clone()));
            }
            if !def.directions.is_empty() && !def.directions.iter().any(|d| d.is_empty()) {
                def.directions.insert(0, String::new());
            }
        }

        let mut index = HashMap::new();
        for (i, def) in definitions.iter().enumerate() {
            index.insert(
                def.name.clone(),
                IndexEntry {
                    definition: i,
                    suffix: String::new(),
                },
            );
        }
        for (i, def) in definitions.iter().enumerate() {
            for suffix in def.suffixes().filter(|s| !s.is_empty()) {
                index
                    .entry(format!("{}{}", def.name, suffix))
                    .or_insert_with(|| IndexEntry {
                        definition: i,
                        suffix: suffix.to_string(),
                    });
            }
        }

        Ok(Self {
            definitions,
            by_name,
            index,
        })
    }

    /// Gets a definition by its exact name.
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    /// Looks up a full stripped name (`name + suffix`).
    ///
    /// Returns the definition and the declared suffix that produced the key.
    pub fn lookup(&self, full_name: &str) -> Option<(&PropertyDefinition, &str)> {
        self.index
            .get(full_name)
            .map(|e| (&self.definitions[e.definition], e.suffix.as_str()))
    }

    /// Iterates definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.definitions.iter()
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl TryFrom<Vec<PropertyDefinition>> for PropertyRegistry {
    type Error = RegistryError;

    fn try_from(definitions: Vec<PropertyDefinition>) -> Result<Self> {
        Self::new(definitions)
    }
}
