//! HTML option normalization.
//!
//! # Design Decisions
//! - Coercion is chosen by table lookup on the option name
//! - Empty values are omitted so the minifier default applies
//! - Regex fragments that fail to compile are dropped with a warning

use regex::Regex;

use super::{parse_leading_int, OptionBag, OptionSet, OptionValue};

/// How a raw HTML option string is turned into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Comma-separated list of strings.
    List,
    /// Comma-separated list of regular expressions.
    Patterns,
    /// The whole value as one regular expression.
    Pattern,
    /// Leading-integer parse with no fallback.
    Integer,
    /// `true` only for the literal string `"true"`.
    Flag,
}

const COERCIONS: &[(&str, Coercion)] = &[
    ("processScripts", Coercion::List),
    ("ignoreCustomComments", Coercion::Patterns),
    ("customAttrAssign", Coercion::Patterns),
    ("customAttrSurround", Coercion::Patterns),
    ("customAttrCollapse", Coercion::Pattern),
    ("maxLineLength", Coercion::Integer),
];

/// Look up the coercion for an option name. Unknown names are flags.
pub fn coercion_for(key: &str) -> Coercion {
    COERCIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coercion)| *coercion)
        .unwrap_or(Coercion::Flag)
}

impl Coercion {
    /// Apply this coercion to a raw value. Returns `None` when nothing usable
    /// remains (a single pattern that does not compile).
    pub fn apply(self, key: &str, raw: &str) -> Option<OptionValue> {
        match self {
            Coercion::List => Some(OptionValue::List(raw.split(',').map(str::to_string).collect())),
            Coercion::Patterns => Some(OptionValue::Patterns(
                raw.split(',').filter_map(|fragment| compile(key, fragment)).collect(),
            )),
            Coercion::Pattern => compile(key, raw).map(OptionValue::Pattern),
            Coercion::Integer => Some(
                parse_leading_int(raw)
                    .map(OptionValue::Integer)
                    .unwrap_or(OptionValue::NotANumber),
            ),
            Coercion::Flag => Some(OptionValue::Bool(raw == "true")),
        }
    }
}

fn compile(key: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(option = %key, pattern = %pattern, error = %e, "Dropping invalid pattern");
            None
        }
    }
}

/// Normalize raw request options for the HTML minifier.
pub fn normalize_html(raw: &OptionSet) -> OptionBag {
    raw.iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(key, value)| {
            coercion_for(key)
                .apply(key, value)
                .map(|normalized| (key.clone(), normalized))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> OptionSet {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_process_scripts_split() {
        let bag = normalize_html(&set(&[("processScripts", "a,b,c")]));
        assert_eq!(
            bag["processScripts"],
            OptionValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_custom_attr_collapse_is_single_pattern() {
        let bag = normalize_html(&set(&[("customAttrCollapse", "foo")]));
        match &bag["customAttrCollapse"] {
            OptionValue::Pattern(re) => {
                assert!(re.is_match("foo"));
                assert!(re.is_match("xfoox"));
                assert!(!re.is_match("bar"));
            }
            other => panic!("expected pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_lists() {
        let bag = normalize_html(&set(&[
            ("ignoreCustomComments", "^!,^\\s*ko"),
            ("customAttrAssign", "a"),
            ("customAttrSurround", "x,y"),
        ]));

        match &bag["ignoreCustomComments"] {
            OptionValue::Patterns(res) => {
                assert_eq!(res.len(), 2);
                assert!(res[0].is_match("!important"));
                assert!(res[1].is_match("  ko if: x"));
            }
            other => panic!("expected patterns, got {:?}", other),
        }
        assert_eq!(bag["customAttrAssign"], OptionValue::Patterns(vec![Regex::new("a").unwrap()]));
        assert_eq!(
            bag["customAttrSurround"],
            OptionValue::Patterns(vec![Regex::new("x").unwrap(), Regex::new("y").unwrap()])
        );
    }

    #[test]
    fn test_invalid_patterns_dropped() {
        let bag = normalize_html(&set(&[("customAttrCollapse", "("), ("customAttrAssign", "ok,(")]));
        assert!(!bag.contains_key("customAttrCollapse"));
        assert_eq!(bag["customAttrAssign"], OptionValue::Patterns(vec![Regex::new("ok").unwrap()]));
    }

    #[test]
    fn test_max_line_length() {
        let bag = normalize_html(&set(&[("maxLineLength", "80")]));
        assert_eq!(bag["maxLineLength"], OptionValue::Integer(80));

        // No fallback: an unparsable length stays invalid.
        let bag = normalize_html(&set(&[("maxLineLength", "wide")]));
        assert_eq!(bag["maxLineLength"], OptionValue::NotANumber);
    }

    #[test]
    fn test_flags_and_empty_values() {
        let bag = normalize_html(&set(&[
            ("removeComments", "true"),
            ("collapseWhitespace", "false"),
            ("minifyJS", "yes"),
            ("minifyCSS", ""),
            ("processScripts", ""),
        ]));

        assert_eq!(bag["removeComments"], OptionValue::Bool(true));
        assert_eq!(bag["collapseWhitespace"], OptionValue::Bool(false));
        assert_eq!(bag["minifyJS"], OptionValue::Bool(false));
        assert!(!bag.contains_key("minifyCSS"));
        assert!(!bag.contains_key("processScripts"));
    }

    #[test]
    fn test_coercion_lookup() {
        assert_eq!(coercion_for("processScripts"), Coercion::List);
        assert_eq!(coercion_for("customAttrCollapse"), Coercion::Pattern);
        assert_eq!(coercion_for("maxLineLength"), Coercion::Integer);
        assert_eq!(coercion_for("removeComments"), Coercion::Flag);
    }
}
