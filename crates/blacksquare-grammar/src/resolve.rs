//! Property and direction resolution.
//!
//! Resolution runs in two steps. [`Resolver::resolve`] maps a token body
//! (prefix and multiplier already stripped) to a [`PropertyDefinition`];
//! [`resolve_direction`] then checks the body against the suffixes that
//! definition declares.
//!
//! # Match Policies
//!
//! | Policy | Rule |
//! |--------|------|
//! | [`MatchPolicy::Exact`] | Body equals `name + declared suffix`, or `name` after removing one side suffix |
//! | [`MatchPolicy::Substring`] | First definition whose name is contained in the body |
//!
//! `Substring` reproduces how earlier releases matched and is ambiguous when
//! one registered name contains another: with `margin` registered before
//! `margin-inline`, the body `margin-inline` resolves to `margin`.

use serde::Deserialize;

use crate::registry::{PropertyDefinition, PropertyRegistry};

/// Side suffixes recognized on any range definition.
pub const SIDE_SUFFIXES: &[&str] = &["-top", "-right", "-bottom", "-left"];

/// How token bodies are matched against registry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    #[default]
    Exact,
    Substring,
}

/// The direction a structured token applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction<'a> {
    /// Empty suffix: the property applies to all directions.
    All,
    /// A declared suffix such as `-top`.
    Side(&'a str),
}

impl<'a> Direction<'a> {
    /// The suffix appended to the CSS property name.
    pub fn suffix(&self) -> &'a str {
        match self {
            Direction::All => "",
            Direction::Side(s) => s,
        }
    }
}

/// Resolves token bodies against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r PropertyRegistry,
    policy: MatchPolicy,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r PropertyRegistry, policy: MatchPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &'r PropertyRegistry {
        self.registry
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Finds the definition a token body refers to.
    ///
    /// Returns `None` when nothing matches; the caller skips the token.
    pub fn resolve(&self, body: &str) -> Option<&'r PropertyDefinition> {
        match self.policy {
            MatchPolicy::Exact => self.resolve_exact(body),
            MatchPolicy::Substring => self.resolve_substring(body),
        }
    }

    fn resolve_exact(&self, body: &str) -> Option<&'r PropertyDefinition> {
        if let Some((def, _)) = self.registry.lookup(body) {
            return Some(def);
        }
        SIDE_SUFFIXES
            .iter()
            .filter_map(|suffix| body.strip_suffix(*suffix))
            .find_map(|base| self.registry.get(base))
    }

    fn resolve_substring(&self, body: &str) -> Option<&'r PropertyDefinition> {
        self.registry.iter().find(|def| body.contains(def.name.as_str()))
    }
}

/// Matches a token body against the suffixes declared on `definition`.
///
/// Returns `None` when `body` is not `definition.name` followed by one of
/// its declared suffixes. That is distinct from [`Direction::All`], which
/// means the body is the bare name.
pub fn resolve_direction<'d>(
    definition: &'d PropertyDefinition,
    body: &str,
) -> Option<Direction<'d>> {
    let rest = body.strip_prefix(definition.name.as_str())?;
    definition
        .suffixes()
        .find(|suffix| *suffix == rest)
        .map(|suffix| {
            if suffix.is_empty() {
                Direction::All
            } else {
                Direction::Side(suffix)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides() -> [&'static str; 5] {
        ["", "-top", "-right", "-bottom", "-left"]
    }

    fn registry() -> PropertyRegistry {
        PropertyRegistry::new(vec![
            PropertyDefinition::range("margin", "margin", 1.0).with_directions(sides()),
            PropertyDefinition::range("padding", "padding", 1.0).with_directions(sides()),
            PropertyDefinition::range("border-width", "border-width", 0.1).with_directions([""]),
            PropertyDefinition::color("text-color-primary", "color", "black"),
        ])
        .unwrap()
    }

    #[test]
    fn exact_resolves_bare_name() {
        let registry = registry();
        let resolver = Resolver::new(&registry, MatchPolicy::Exact);
        assert_eq!(resolver.resolve("margin").unwrap().name, "margin");
        assert_eq!(
            resolver.resolve("text-color-primary").unwrap().name,
            "text-color-primary"
        );
    }

    #[test]
    fn exact_resolves_declared_direction() {
        let registry = registry();
        let resolver = Resolver::new(&registry, MatchPolicy::Exact);
        assert_eq!(resolver.resolve("margin-top").unwrap().name, "margin");
        assert_eq!(resolver.resolve("padding-left").unwrap().name, "padding");
    }

    #[test]
    fn exact_strips_undeclared_side() {
        // border-width declares no sides, but the base still resolves
        let registry = registry();
        let resolver = Resolver::new(&registry, MatchPolicy::Exact);
        let def = resolver.resolve("border-width-top").unwrap();
        assert_eq!(def.name, "border-width");
        assert_eq!(resolve_direction(def, "border-width-top"), None);
    }

    #[test]
    fn exact_rejects_unknown() {
        let registry = registry();
        let resolver = Resolver::new(&registry, MatchPolicy::Exact);
        assert!(resolver.resolve("margin-wrong").is_none());
        assert!(resolver.resolve("gap").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn exact_prefers_longer_registered_name() {
        let registry = PropertyRegistry::new(vec![
            PropertyDefinition::range("margin", "margin", 1.0).with_directions(sides()),
            PropertyDefinition::range("margin-top", "margin-block-start", 2.0),
        ])
        .unwrap();
        let resolver = Resolver::new(&registry, MatchPolicy::Exact);
        assert_eq!(resolver.resolve("margin-top").unwrap().name, "margin-top");
    }

    #[test]
    fn substring_matches_contained_name() {
        let registry = registry();
        let resolver = Resolver::new(&registry, MatchPolicy::Substring);
        assert_eq!(resolver.resolve("margin-top").unwrap().name, "margin");
        assert_eq!(resolver.resolve("margin-wrong").unwrap().name, "margin");
        assert!(resolver.resolve("gap").is_none());
    }

    #[test]
    fn substring_takes_first_in_registry_order() {
        let registry = PropertyRegistry::new(vec![
            PropertyDefinition::range("margin", "margin", 1.0),
            PropertyDefinition::range("margin-inline", "margin-inline", 2.0),
        ])
        .unwrap();
        let resolver = Resolver::new(&registry, MatchPolicy::Substring);
        assert_eq!(resolver.resolve("margin-inline").unwrap().name, "margin");
    }

    #[test]
    fn direction_side() {
        let registry = registry();
        let padding = registry.get("padding").unwrap();
        assert_eq!(
            resolve_direction(padding, "padding-left"),
            Some(Direction::Side("-left"))
        );
    }

    #[test]
    fn direction_all() {
        let registry = registry();
        let padding = registry.get("padding").unwrap();
        assert_eq!(resolve_direction(padding, "padding"), Some(Direction::All));
        assert_eq!(Direction::All.suffix(), "");
    }

    #[test]
    fn direction_not_declared() {
        let registry = registry();
        let padding = registry.get("padding").unwrap();
        assert_eq!(resolve_direction(padding, "padding-ggg"), None);
        assert_eq!(resolve_direction(padding, "margin"), None);
    }

    #[test]
    fn direction_without_declared_list() {
        let registry = registry();
        let color = registry.get("text-color-primary").unwrap();
        assert_eq!(
            resolve_direction(color, "text-color-primary"),
            Some(Direction::All)
        );
        assert_eq!(resolve_direction(color, "text-color-primary-top"), None);
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let policy: MatchPolicy = serde_json::from_str("\"substring\"").unwrap();
        assert_eq!(policy, MatchPolicy::Substring);
        assert_eq!(MatchPolicy::default(), MatchPolicy::Exact);
    }
}
