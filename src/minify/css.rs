//! Minify CSS with [`lightningcss`].

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use super::MinifyError;
use crate::options::{OptionBag, OptionValue};

/// Minify a CSS string.
///
/// `advanced: false` skips structural optimisation (rule merging, shorthand
/// folding) and only prints the stylesheet compactly.
pub fn minify_css(code: &str, options: &OptionBag) -> Result<String, MinifyError> {
    let advanced = options
        .get("advanced")
        .and_then(OptionValue::as_bool)
        .unwrap_or(true);

    tracing::debug!(
        advanced,
        rounding_precision = ?options.get("roundingPrecision").and_then(OptionValue::as_integer),
        "Minifying stylesheet"
    );

    let mut style_sheet = StyleSheet::parse(code, ParserOptions::default())
        .map_err(|source| MinifyError::CssParse(source.to_string()))?;

    if advanced {
        style_sheet
            .minify(MinifyOptions::default())
            .map_err(|source| MinifyError::CssMinify(source.to_string()))?;
    }

    let printer_options = PrinterOptions {
        minify: true,
        ..Default::default()
    };

    let result = style_sheet
        .to_css(printer_options)
        .map_err(|source| MinifyError::CssPrint(source.to_string()))?;

    Ok(result.code)
}
