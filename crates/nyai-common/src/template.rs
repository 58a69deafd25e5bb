//! `{name}` placeholder substitution.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::TemplateError;

const DEFAULT_PATTERN: &str = r"\{([a-zA-Z0-9_]+)\}";

fn default_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DEFAULT_PATTERN).expect("default placeholder pattern"))
}

/// Replace `{name}` placeholders in `text` with values from `replacements`.
///
/// Placeholders without a replacement are left as they are, unless `strict`
/// is set, in which case every unresolved name is reported at once.
pub fn safe_format<V: Display>(
    text: &str,
    replacements: &HashMap<String, V>,
    strict: bool,
) -> Result<String, TemplateError> {
    safe_format_with(text, replacements, default_pattern(), strict)
}

/// Like [`safe_format`], with a caller-supplied pattern.
///
/// The pattern's first capture group is the placeholder name.
pub fn safe_format_with<V: Display>(
    text: &str,
    replacements: &HashMap<String, V>,
    pattern: &Regex,
    strict: bool,
) -> Result<String, TemplateError> {
    if pattern.captures_len() < 2 {
        return Err(TemplateError::InvalidPattern(format!(
            "`{pattern}` has no capture group"
        )));
    }

    if strict {
        let missing: BTreeSet<String> = pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !replacements.contains_key(*name))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(TemplateError::MissingPlaceholder(
                missing.into_iter().collect(),
            ));
        }
    }

    let formatted = pattern.replace_all(text, |caps: &Captures| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .and_then(|name| replacements.get(name.as_str()))
            .map_or_else(|| whole.to_string(), |value| value.to_string())
    });
    Ok(formatted.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_known_placeholders() {
        let out = safe_format("Hi {name}, welcome to {city}!", &vars(&[("name", "Ada"), ("city", "Oslo")]), false)
            .unwrap();
        assert_eq!(out, "Hi Ada, welcome to Oslo!");
    }

    #[test]
    fn repeated_placeholder_replaced_everywhere() {
        let out = safe_format("{x} and {x}", &vars(&[("x", "1")]), false).unwrap();
        assert_eq!(out, "1 and 1");
    }

    #[test]
    fn unknown_placeholders_survive_in_lenient_mode() {
        let out = safe_format("Hi {name}, {unknown}", &vars(&[("name", "Ada")]), false).unwrap();
        assert_eq!(out, "Hi Ada, {unknown}");
    }

    #[test]
    fn strict_mode_reports_all_missing_names_sorted() {
        let err = safe_format("{b} {a} {c}", &vars(&[("c", "ok")]), true).unwrap_err();
        match err {
            TemplateError::MissingPlaceholder(names) => assert_eq!(names, vec!["a", "b"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_passes_when_everything_resolves() {
        let out = safe_format("{a}", &vars(&[("a", "done"), ("extra", "unused")]), true).unwrap();
        assert_eq!(out, "done");
    }

    #[test]
    fn non_string_values_are_displayed() {
        let mut values = HashMap::new();
        values.insert("count".to_string(), 3);
        assert_eq!(safe_format("{count} items", &values, true).unwrap(), "3 items");
    }

    #[test]
    fn custom_pattern() {
        let pattern = Regex::new(r"<<(\w+)>>").unwrap();
        let out = safe_format_with("hello <<who>>", &vars(&[("who", "world")]), &pattern, false).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let pattern = Regex::new(r"\{\w+\}").unwrap();
        let err = safe_format_with("{a}", &vars(&[]), &pattern, false).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPattern(_)));
    }
}
