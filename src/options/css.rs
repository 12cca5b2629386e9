//! CSS option normalization.

use super::{coerce_scalar, parse_leading_int, OptionBag, OptionSet, OptionValue};

/// Precision used when `roundingPrecision` is missing, unparsable or zero.
pub const DEFAULT_ROUNDING_PRECISION: i64 = 2;

/// Normalize raw request options for the CSS minifier.
///
/// Every key gets the shared scalar coercion, except `roundingPrecision`
/// which is always an integer.
pub fn normalize_css(raw: &OptionSet) -> OptionBag {
    raw.iter()
        .map(|(key, value)| {
            let normalized = if key == "roundingPrecision" {
                let precision = parse_leading_int(value)
                    .filter(|n| *n != 0)
                    .unwrap_or(DEFAULT_ROUNDING_PRECISION);
                OptionValue::Integer(precision)
            } else {
                coerce_scalar(value)
            };
            (key.clone(), normalized)
        })
        .collect()
}
