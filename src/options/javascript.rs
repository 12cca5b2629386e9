//! JavaScript option normalization.
//!
//! The JavaScript minifier exposes two independent option namespaces: mangle
//! (identifier renaming) and compress (everything else). Keys listed in
//! [`MANGLE_KEYS`] are routed to the mangle bag.
//!
//! Only the mangle bag reaches the minifier. `minify_js` has no tunable
//! compressions, so the compress bag is kept for logging and has no effect
//! on the output.

use serde::Serialize;

use super::{coerce_scalar, OptionBag, OptionSet};

/// Option names that belong to the mangle namespace.
pub const MANGLE_KEYS: &[&str] = &["toplevel"];

/// Normalized JavaScript options, split by namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JavascriptOptions {
    pub compress: OptionBag,
    pub mangle: OptionBag,
}

impl JavascriptOptions {
    /// Whether top-level names may be mangled.
    pub fn mangle_toplevel(&self) -> bool {
        self.mangle
            .get("toplevel")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Normalize raw request options for the JavaScript minifier.
pub fn normalize_javascript(raw: &OptionSet) -> JavascriptOptions {
    let mut options = JavascriptOptions::default();

    for (key, value) in raw {
        let bag = if MANGLE_KEYS.contains(&key.as_str()) {
            &mut options.mangle
        } else {
            &mut options.compress
        };
        bag.insert(key.clone(), coerce_scalar(value));
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;

    fn set(pairs: &[(&str, &str)]) -> OptionSet {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_toplevel_goes_to_mangle() {
        let options = normalize_javascript(&set(&[("toplevel", "true"), ("dead_code", "false")]));

        assert_eq!(options.mangle.len(), 1);
        assert_eq!(options.mangle.get("toplevel"), Some(&OptionValue::Bool(true)));
        assert!(!options.compress.contains_key("toplevel"));
        assert_eq!(options.compress.get("dead_code"), Some(&OptionValue::Bool(false)));
        assert!(options.mangle_toplevel());
    }

    #[test]
    fn test_other_keys_go_to_compress() {
        let options = normalize_javascript(&set(&[("sequences", ""), ("passes", "2")]));

        assert!(options.mangle.is_empty());
        assert_eq!(options.compress.get("sequences"), Some(&OptionValue::Null));
        assert_eq!(options.compress.get("passes"), Some(&OptionValue::Str("2".into())));
        assert!(!options.mangle_toplevel());
    }

    #[test]
    fn test_empty_toplevel_is_null() {
        let options = normalize_javascript(&set(&[("toplevel", "")]));
        assert_eq!(options.mangle.get("toplevel"), Some(&OptionValue::Null));
        assert!(!options.mangle_toplevel());
    }
}
