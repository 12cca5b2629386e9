//! Request option normalization.
//!
//! # Data Flow
//! ```text
//! request body (form / JSON)
//!     → OptionSet (name → raw string)
//!     → javascript.rs | css.rs | html.rs (per-minifier coercion rules)
//!     → OptionBag (name → typed OptionValue)
//!     → minify adapters
//! ```
//!
//! # Design Decisions
//! - Normalization never fails; malformed values degrade silently
//! - Bags are ordered maps so output is deterministic
//! - Each minifier gets its own normalizer; shared rules live here

pub mod css;
pub mod html;
pub mod javascript;

use std::collections::BTreeMap;

use regex::Regex;
use serde::ser::{Serialize, SerializeSeq, Serializer};

pub use css::normalize_css;
pub use html::normalize_html;
pub use javascript::{normalize_javascript, JavascriptOptions};

/// Raw option name → string value, as submitted with a request.
pub type OptionSet = BTreeMap<String, String>;

/// Normalized option name → typed value.
pub type OptionBag = BTreeMap<String, OptionValue>;

/// A strongly-typed option value.
#[derive(Debug, Clone)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    /// An integer option whose raw value had no leading digits.
    NotANumber,
    /// Option unset; the minifier default applies.
    Null,
    Str(String),
    List(Vec<String>),
    Pattern(Regex),
    Patterns(Vec<Regex>),
}

impl OptionValue {
    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        use OptionValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (NotANumber, NotANumber) | (Null, Null) => true,
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) => a == b,
            // Compiled regexes compare by source pattern.
            (Pattern(a), Pattern(b)) => a.as_str() == b.as_str(),
            (Patterns(a), Patterns(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.as_str() == y.as_str())
            }
            _ => false,
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Integer(n) => serializer.serialize_i64(*n),
            OptionValue::NotANumber | OptionValue::Null => serializer.serialize_none(),
            OptionValue::Str(s) => serializer.serialize_str(s),
            OptionValue::List(items) => items.serialize(serializer),
            OptionValue::Pattern(re) => serializer.serialize_str(re.as_str()),
            OptionValue::Patterns(res) => {
                let mut seq = serializer.serialize_seq(Some(res.len()))?;
                for re in res {
                    seq.serialize_element(re.as_str())?;
                }
                seq.end()
            }
        }
    }
}

/// Coercion shared by the JavaScript and CSS normalizers.
///
/// `"true"`/`"false"` become booleans, the empty string becomes `Null`,
/// anything else is kept verbatim.
pub fn coerce_scalar(raw: &str) -> OptionValue {
    match raw {
        "true" => OptionValue::Bool(true),
        "false" => OptionValue::Bool(false),
        "" => OptionValue::Null,
        other => OptionValue::Str(other.to_string()),
    }
}

/// Best-effort base-10 integer parse of a leading number.
///
/// Skips leading whitespace, accepts one optional sign, then consumes the
/// longest run of ASCII digits. `"12px"` parses as `12`; `"px"` and `""` do
/// not parse. Values beyond the `i64` range saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}
