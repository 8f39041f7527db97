//! Class name extraction from raw markup.
//!
//! Markup is treated as flat text. Three attribute forms are recognized:
//!
//! ```text
//! className="a b"        double-quoted
//! className='a b'        single-quoted
//! className={cx("a", b)} brace expression
//! ```
//!
//! The attribute name must start the text or follow whitespace, `<` or
//! `:`, so `data-class="..."` and `obj.class='...'` are not attributes.
//!
//! Inside a brace expression every quoted string (`"`, `'` or backtick) and
//! every bare identifier is taken as a candidate class list. Identifiers
//! such as function names come along too; they simply never match a
//! utility prefix.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[\s<:])(?:className|class)=(?:"([^"]+)"|'([^']+)'|\{([^}]+)\})"#)
        .expect("class attribute pattern is valid")
});

static DYNAMIC_PIECE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[`"']([^`"']+)[`"']|[a-zA-Z0-9_-]+"#).expect("dynamic class pattern is valid")
});

/// Extracts unique class names in first-seen order.
///
/// # Example
///
/// ```
/// use blacksquare_grammar::extract_class_names;
///
/// let names = extract_class_names(r#"<div className="oo-margin ee-margin_10 oo-margin"/>"#);
/// assert_eq!(names, vec!["oo-margin", "ee-margin_10"]);
/// ```
pub fn extract_class_names(text: &str) -> Vec<String> {
    dedup(class_name_occurrences(text))
}

/// Iterates every class name occurrence, duplicates included.
pub fn class_name_occurrences(text: &str) -> impl Iterator<Item = &str> {
    CLASS_ATTRIBUTE.captures_iter(text).flat_map(|caps| {
        let pieces: Vec<&str> = if let Some(quoted) = caps.get(1).or_else(|| caps.get(2)) {
            vec![quoted.as_str()]
        } else if let Some(dynamic) = caps.get(3) {
            DYNAMIC_PIECE
                .find_iter(dynamic.as_str())
                .map(|m| m.as_str().trim_matches(|c: char| matches!(c, '`' | '"' | '\'')))
                .collect()
        } else {
            Vec::new()
        };
        pieces.into_iter().flat_map(str::split_whitespace)
    })
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
