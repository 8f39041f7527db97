//! Stylesheet synthesis.
//!
//! A stylesheet is a `:root{}` block followed by one rule per distinct
//! utility class, in the order the classes were extracted:
//!
//! ```text
//! :root{--oo-margin: 1rem;--oo-text-color-primary: black;}
//! .oo-margin {margin:calc(var(--oo-margin));}
//! .oo-text-color-primary {color:var(--oo-text-color-primary);}
//! .ee-padding_2{padding:2rem}
//! ```
//!
//! (Shown on separate lines here; the output is a single line.)
//!
//! Each root declaration is keyed by the class name as written, so
//! `oo-margin` and `oo-margin-top_2` each declare their own custom property.
//! Class rules always reference the base variable `--oo-<name>`.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::extract::extract_class_names;
use crate::registry::{PropertyDefinition, PropertyKind, PropertyRegistry};
use crate::resolve::{resolve_direction, MatchPolicy, Resolver};
use crate::token::{ClassToken, EnumeratedToken, StructuredToken, STRUCTURED_PREFIX};

/// Unit appended to range values and integer enumerated values by default.
pub const DEFAULT_UNIT: &str = "rem";

/// Synthesis settings, read from the `settings` section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SynthOptions {
    /// Unit for range declarations and integer enumerated values.
    pub unit: String,
    /// Registry matching policy.
    #[serde(rename = "matching")]
    pub policy: MatchPolicy,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            policy: MatchPolicy::default(),
        }
    }
}

impl SynthOptions {
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// A synthesized stylesheet plus counts for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub css: String,
    /// Custom properties declared in `:root`.
    pub root_declarations: usize,
    /// Class rules emitted.
    pub rules: usize,
    /// Utility classes (either prefix) that produced no rule.
    pub skipped: Vec<String>,
}

/// Turns class names into CSS against a fixed registry.
#[derive(Debug, Clone)]
pub struct Synthesizer<'r> {
    resolver: Resolver<'r>,
    unit: String,
}

impl<'r> Synthesizer<'r> {
    pub fn new(registry: &'r PropertyRegistry, options: &SynthOptions) -> Self {
        Self {
            resolver: Resolver::new(registry, options.policy),
            unit: options.unit.clone(),
        }
    }

    // ========================================================================
    // Root block
    // ========================================================================

    /// Declaration for one structured class, or `None` if it does not resolve.
    ///
    /// Direction and multiplier are ignored: `oo-margin-top_2` declares
    /// `--oo-margin-top_2` with the value of `margin`.
    pub fn root_declaration(&self, token: &StructuredToken<'_>) -> Option<String> {
        let def = self.resolver.resolve(token.body())?;
        let unit = if def.is_range() { self.unit.as_str() } else { "" };
        Some(format!("--{}: {}{};", token.raw(), def.value, unit))
    }

    /// The `:root{...}` block for every resolvable structured class.
    pub fn root_block<S: AsRef<str>>(&self, class_names: &[S]) -> String {
        self.root_block_counted(class_names).0
    }

    fn root_block_counted<S: AsRef<str>>(&self, class_names: &[S]) -> (String, usize) {
        let mut declared = 0;
        let mut css = String::from(":root{");
        for name in distinct(class_names) {
            if let Some(ClassToken::Structured(token)) = ClassToken::parse(name) {
                if let Some(decl) = self.root_declaration(&token) {
                    css.push_str(&decl);
                    declared += 1;
                }
            }
        }
        css.push('}');
        (css, declared)
    }

    // ========================================================================
    // Class rules
    // ========================================================================

    /// The rule for a single class name.
    ///
    /// Returns `None` for non-utility classes, unresolvable structured
    /// classes, undeclared directions, invalid multipliers and enumerated
    /// classes without a `property_value` pair.
    pub fn rule_for(&self, class_name: &str) -> Option<String> {
        match ClassToken::parse(class_name)? {
            ClassToken::Structured(token) => {
                let def = self.resolver.resolve(token.body())?;
                match def.kind {
                    PropertyKind::Range => self.range_rule_for(def, &token),
                    PropertyKind::Color => Some(color_rule_for(def, &token)),
                }
            }
            ClassToken::Enumerated(token) => self.enumerated_rule(&token),
        }
    }

    /// Range rule: `.<class> {<property><dir>:calc(var(--oo-<name>) * <m>);}`.
    ///
    /// Returns `None` if the class does not resolve to a range definition.
    pub fn range_rule(&self, token: &StructuredToken<'_>) -> Option<String> {
        let def = self.resolver.resolve(token.body())?;
        self.range_rule_for(def, token)
    }

    fn range_rule_for(
        &self,
        def: &PropertyDefinition,
        token: &StructuredToken<'_>,
    ) -> Option<String> {
        if !def.is_range() || !token.has_valid_multiplier() {
            return None;
        }
        let direction = resolve_direction(def, token.body())?;
        let scale = token
            .multiplier()
            .map(|m| format!(" * {}", m))
            .unwrap_or_default();
        Some(format!(
            ".{} {{{}{}:calc(var(--{}{}){});}}",
            token.raw(),
            def.property,
            direction.suffix(),
            STRUCTURED_PREFIX,
            def.name,
            scale
        ))
    }

    /// Color rule: `.<class> {<property>:var(--oo-<name>);}`.
    ///
    /// Returns `None` if the class does not resolve to a color definition.
    pub fn color_rule(&self, token: &StructuredToken<'_>) -> Option<String> {
        let def = self.resolver.resolve(token.body())?;
        (def.kind == PropertyKind::Color).then(|| color_rule_for(def, token))
    }

    /// Enumerated rule: `.<class>{<property>:<value>}`.
    ///
    /// Integer values get the configured unit; anything else is copied
    /// through as written.
    pub fn enumerated_rule(&self, token: &EnumeratedToken<'_>) -> Option<String> {
        let (property, value) = token.declaration()?;
        let unit = if is_integer(value) { self.unit.as_str() } else { "" };
        Some(format!(".{}{{{}:{}{}}}", token.raw(), property, value, unit))
    }

    /// All class rules, in extraction order.
    pub fn class_rules<S: AsRef<str>>(&self, class_names: &[S]) -> String {
        distinct(class_names)
            .filter_map(|name| self.rule_for(name))
            .collect()
    }

    // ========================================================================
    // Whole stylesheet
    // ========================================================================

    /// Root block followed by class rules, with counts.
    pub fn build<S: AsRef<str>>(&self, class_names: &[S]) -> Stylesheet {
        let (mut css, root_declarations) = self.root_block_counted(class_names);
        let mut rules = 0;
        let mut skipped = Vec::new();

        for name in distinct(class_names) {
            match self.rule_for(name) {
                Some(rule) => {
                    css.push_str(&rule);
                    rules += 1;
                }
                None if ClassToken::parse(name).is_some() => {
                    debug!(class = name, "no rule for utility class");
                    skipped.push(name.to_string());
                }
                None => {}
            }
        }

        Stylesheet {
            css,
            root_declarations,
            rules,
            skipped,
        }
    }

    /// Root block followed by class rules.
    pub fn stylesheet<S: AsRef<str>>(&self, class_names: &[S]) -> String {
        self.build(class_names).css
    }
}

fn color_rule_for(def: &PropertyDefinition, token: &StructuredToken<'_>) -> String {
    format!(
        ".{} {{{}:var(--{}{});}}",
        token.raw(),
        def.property,
        STRUCTURED_PREFIX,
        def.name
    )
}

fn distinct<S: AsRef<str>>(class_names: &[S]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    class_names
        .iter()
        .map(|name| name.as_ref())
        .filter(move |name| seen.insert(*name))
}

/// Extracts class names from `text` and synthesizes the full stylesheet.
///
/// # Example
///
/// ```
/// use blacksquare_grammar::{synthesize, PropertyDefinition, PropertyRegistry, SynthOptions};
///
/// let registry = PropertyRegistry::new(vec![
///     PropertyDefinition::range("margin", "margin", 1.0)
///         .with_directions(["", "-top", "-right", "-bottom", "-left"]),
/// ])
/// .unwrap();
///
/// let css = synthesize(
///     r#"<div className="oo-margin ee-margin_10"/>"#,
///     &registry,
///     &SynthOptions::default(),
/// );
/// assert_eq!(
///     css,
///     ":root{--oo-margin: 1rem;}.oo-margin {margin:calc(var(--oo-margin));}.ee-margin_10{margin:10rem}"
/// );
/// ```
pub fn synthesize(text: &str, registry: &PropertyRegistry, options: &SynthOptions) -> String {
    let class_names = extract_class_names(text);
    Synthesizer::new(registry, options).stylesheet(&class_names)
}

/// An optionally signed run of ASCII digits, of any length.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides() -> [&'static str; 5] {
        ["", "-top", "-right", "-bottom", "-left"]
    }

    fn registry() -> PropertyRegistry {
        PropertyRegistry::new(vec![
            PropertyDefinition::range("margin", "margin", 1.0)
                .with_directions(sides())
                .with_bounds(0.0, 3.0, 0.1),
            PropertyDefinition::range("padding", "padding", 1.0).with_directions(sides()),
            PropertyDefinition::range("border-width", "border-width", 0.1).with_directions([""]),
            PropertyDefinition::color("text-color-primary", "color", "black"),
        ])
        .unwrap()
    }

    fn structured(raw: &str) -> StructuredToken<'_> {
        match ClassToken::parse(raw) {
            Some(ClassToken::Structured(t)) => t,
            other => panic!("expected structured token, got {:?}", other),
        }
    }

    fn enumerated(raw: &str) -> EnumeratedToken<'_> {
        match ClassToken::parse(raw) {
            Some(ClassToken::Enumerated(t)) => t,
            other => panic!("expected enumerated token, got {:?}", other),
        }
    }

    #[test]
    fn range_rule_with_direction_and_multiplier() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(
            synth.range_rule(&structured("oo-margin-top_2")).unwrap(),
            ".oo-margin-top_2 {margin-top:calc(var(--oo-margin) * 2);}"
        );
    }

    #[test]
    fn range_rule_without_multiplier() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(
            synth.range_rule(&structured("oo-padding")).unwrap(),
            ".oo-padding {padding:calc(var(--oo-padding));}"
        );
    }

    #[test]
    fn range_rule_undeclared_direction() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(synth.range_rule(&structured("oo-margin-wrong")), None);
        assert_eq!(synth.range_rule(&structured("oo-border-width-top")), None);
    }

    #[test]
    fn range_rule_substring_undeclared_direction() {
        let registry = registry();
        let options = SynthOptions::default().with_policy(MatchPolicy::Substring);
        let synth = Synthesizer::new(&registry, &options);
        assert_eq!(synth.range_rule(&structured("oo-margin-wrong")), None);
    }

    #[test]
    fn range_rule_invalid_multiplier() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(synth.range_rule(&structured("oo-margin_big")), None);
    }

    #[test]
    fn range_rule_rejects_color_definition() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(synth.range_rule(&structured("oo-text-color-primary")), None);
    }

    #[test]
    fn color_rule() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(
            synth.color_rule(&structured("oo-text-color-primary")).unwrap(),
            ".oo-text-color-primary {color:var(--oo-text-color-primary);}"
        );
        assert_eq!(synth.color_rule(&structured("oo-margin")), None);
    }

    #[test]
    fn enumerated_rules() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let rule = |raw| synth.enumerated_rule(&enumerated(raw));

        assert_eq!(rule("ee-padding_2").unwrap(), ".ee-padding_2{padding:2rem}");
        assert_eq!(rule("ee-margin_10").unwrap(), ".ee-margin_10{margin:10rem}");
        assert_eq!(
            rule("ee-border-style_solid").unwrap(),
            ".ee-border-style_solid{border-style:solid}"
        );
        assert_eq!(rule("ee-margin"), None);
    }

    #[test]
    fn enumerated_non_integer_values_pass_through() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let rule = |raw| synth.enumerated_rule(&enumerated(raw));

        assert_eq!(rule("ee-width_50%").unwrap(), ".ee-width_50%{width:50%}");
        assert_eq!(rule("ee-line-height_1.5").unwrap(), ".ee-line-height_1.5{line-height:1.5}");
        assert_eq!(rule("ee-margin_0").unwrap(), ".ee-margin_0{margin:0rem}");
    }

    #[test]
    fn enumerated_integer_check_ignores_magnitude() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let rule = |raw| synth.enumerated_rule(&enumerated(raw));

        assert_eq!(
            rule("ee-z-index_99999999999999999999").unwrap(),
            ".ee-z-index_99999999999999999999{z-index:99999999999999999999rem}"
        );
        assert_eq!(rule("ee-margin_-2").unwrap(), ".ee-margin_-2{margin:-2rem}");
        assert_eq!(rule("ee-margin_+3").unwrap(), ".ee-margin_+3{margin:+3rem}");
        assert_eq!(rule("ee-margin_-").unwrap(), ".ee-margin_-{margin:-}");
        assert_eq!(rule("ee-margin_1e3").unwrap(), ".ee-margin_1e3{margin:1e3}");
    }

    #[test]
    fn enumerated_uses_configured_unit() {
        let registry = registry();
        let options = SynthOptions::default().with_unit("px");
        let synth = Synthesizer::new(&registry, &options);
        assert_eq!(
            synth.enumerated_rule(&enumerated("ee-gap_4")).unwrap(),
            ".ee-gap_4{gap:4px}"
        );
    }

    #[test]
    fn root_block_declares_each_class_once() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let names = ["oo-margin", "oo-text-color-primary", "oo-margin", "ee-padding_2"];
        assert_eq!(
            synth.root_block(&names),
            ":root{--oo-margin: 1rem;--oo-text-color-primary: black;}"
        );
    }

    #[test]
    fn root_block_keys_by_class_name() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let names = ["oo-margin", "oo-margin-top_2", "oo-border-width"];
        assert_eq!(
            synth.root_block(&names),
            ":root{--oo-margin: 1rem;--oo-margin-top_2: 1rem;--oo-border-width: 0.1rem;}"
        );
    }

    #[test]
    fn root_block_skips_unresolved() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(synth.root_block(&["oo-gap", "container"]), ":root{}");
    }

    #[test]
    fn rule_for_unknown_classes_is_none() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        assert_eq!(synth.rule_for("ee-margin-wrong"), None);
        assert_eq!(synth.rule_for("oo-gap"), None);
        assert_eq!(synth.rule_for("container"), None);
    }

    #[test]
    fn class_rules_follow_extraction_order() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let names = ["ee-gap_1", "oo-margin", "ee-gap_1"];
        assert_eq!(
            synth.class_rules(&names),
            ".ee-gap_1{gap:1rem}.oo-margin {margin:calc(var(--oo-margin));}"
        );
    }

    #[test]
    fn build_reports_counts() {
        let registry = registry();
        let synth = Synthesizer::new(&registry, &SynthOptions::default());
        let sheet = synth.build(&["oo-margin", "oo-gap", "ee-margin", "ee-gap_1", "card"]);

        assert_eq!(sheet.root_declarations, 1);
        assert_eq!(sheet.rules, 2);
        assert_eq!(sheet.skipped, vec!["oo-gap".to_string(), "ee-margin".to_string()]);
    }

    #[test]
    fn end_to_end() {
        let registry = registry();
        let css = synthesize(
            r#"<div className="oo-margin ee-margin_10"/>"#,
            &registry,
            &SynthOptions::default(),
        );
        let root = css.find(":root{--oo-margin: 1rem;").unwrap();
        let rule = css.find(".ee-margin_10{margin:10rem}").unwrap();
        assert!(root < rule);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let registry = registry();
        let text = r#"<a className="oo-padding-left_3 oo-text-color-primary ee-display_flex"/>"#;
        let options = SynthOptions::default();
        assert_eq!(
            synthesize(text, &registry, &options),
            synthesize(text, &registry, &options)
        );
    }

    #[test]
    fn empty_input() {
        let registry = registry();
        assert_eq!(synthesize("", &registry, &SynthOptions::default()), ":root{}");
    }
}
