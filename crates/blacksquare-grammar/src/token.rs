//! Class token families.
//!
//! Every utility class belongs to one of two families, told apart by a fixed
//! prefix:
//!
//! | Prefix | Family | Grammar |
//! |--------|--------|---------|
//! | `oo-` | [`StructuredToken`] | `oo-<name>[<direction>][_<multiplier>]` |
//! | `ee-` | [`EnumeratedToken`] | `ee-<property>_<value>` |
//!
//! Anything else is an unrelated markup class and parses to `None`.

/// Prefix of registry-backed utility classes.
pub const STRUCTURED_PREFIX: &str = "oo-";

/// Prefix of self-describing utility classes.
pub const ENUMERATED_PREFIX: &str = "ee-";

const MULTIPLIER_SEPARATOR: char = '_';

/// A parsed utility class, borrowing from the original class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassToken<'a> {
    Structured(StructuredToken<'a>),
    Enumerated(EnumeratedToken<'a>),
}

impl<'a> ClassToken<'a> {
    /// Classifies a class name by prefix.
    pub fn parse(raw: &'a str) -> Option<Self> {
        if let Some(rest) = raw.strip_prefix(STRUCTURED_PREFIX) {
            return Some(ClassToken::Structured(StructuredToken::from_parts(raw, rest)));
        }
        raw.strip_prefix(ENUMERATED_PREFIX)
            .map(|rest| ClassToken::Enumerated(EnumeratedToken { raw, rest }))
    }

    /// The class name exactly as it appeared in markup.
    pub fn raw(&self) -> &'a str {
        match self {
            ClassToken::Structured(t) => t.raw,
            ClassToken::Enumerated(t) => t.raw,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ClassToken::Structured(_))
    }
}

/// An `oo-` class, resolved against the property registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredToken<'a> {
    raw: &'a str,
    body: &'a str,
    multiplier: Option<&'a str>,
}

impl<'a> StructuredToken<'a> {
    fn from_parts(raw: &'a str, rest: &'a str) -> Self {
        let mut parts = rest.split(MULTIPLIER_SEPARATOR);
        let body = parts.next().unwrap_or_default();
        let multiplier = parts.next().filter(|m| !m.is_empty());
        Self {
            raw,
            body,
            multiplier,
        }
    }

    /// The full class name.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Name plus direction, without prefix or multiplier.
    ///
    /// `oo-margin-top_2` has body `margin-top`.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// The multiplier text, if one follows the first underscore.
    pub fn multiplier(&self) -> Option<&'a str> {
        self.multiplier
    }

    /// Returns `false` when a multiplier is present but is not a number.
    pub fn has_valid_multiplier(&self) -> bool {
        self.multiplier
            .map_or(true, |m| m.parse::<f64>().map_or(false, f64::is_finite))
    }
}

/// An `ee-` class carrying its own property and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratedToken<'a> {
    raw: &'a str,
    rest: &'a str,
}

impl<'a> EnumeratedToken<'a> {
    /// The full class name.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Splits the remainder once on `_` into `(property, value)`.
    ///
    /// Returns `None` when there is no underscore or either side is empty.
    pub fn declaration(&self) -> Option<(&'a str, &'a str)> {
        let (property, value) = self.rest.split_once(MULTIPLIER_SEPARATOR)?;
        if property.is_empty() || value.is_empty() {
            return None;
        }
        Some((property, value))
    }
}

/// Removes a leading `oo-` or `ee-`, leaving any other class untouched.
pub fn strip_prefix(class_name: &str) -> &str {
    class_name
        .strip_prefix(STRUCTURED_PREFIX)
        .or_else(|| class_name.strip_prefix(ENUMERATED_PREFIX))
        .unwrap_or(class_name)
}
