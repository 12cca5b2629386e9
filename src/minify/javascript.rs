//! Minify JavaScript with [`minify_js`].

use minify_js::{minify, Session, TopLevelMode};

use super::MinifyError;
use crate::options::JavascriptOptions;

/// Minify JavaScript source.
///
/// `toplevel` in the mangle bag switches to module mode, which lets the
/// minifier rename top-level declarations. `minify_js` always applies its
/// full, fixed set of compressions: the compress bag cannot switch any of
/// them on or off, so it is logged and otherwise ignored.
pub fn minify_javascript(code: &str, options: &JavascriptOptions) -> Result<String, MinifyError> {
    let mode = if options.mangle_toplevel() {
        TopLevelMode::Module
    } else {
        TopLevelMode::Global
    };

    if !options.compress.is_empty() {
        tracing::debug!(
            keys = ?options.compress.keys().collect::<Vec<_>>(),
            "Ignoring compress options without a minify_js counterpart"
        );
    }

    let session = Session::new();
    let mut output = Vec::new();
    minify(&session, mode, code.as_bytes(), &mut output)
        .map_err(|e| MinifyError::Javascript(describe_syntax_error(&format!("{:?}", e.typ))))?;

    Ok(String::from_utf8(output)?)
}

/// Turn a syntax error kind such as `ExpectedSyntax("function name")` into
/// `Expected syntax: function name`.
fn describe_syntax_error(kind: &str) -> String {
    let split = kind.find(|c: char| c == '(' || c == ' ').unwrap_or(kind.len());
    let (name, detail) = kind.split_at(split);

    let mut message = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            message.push(ch);
        } else if ch.is_uppercase() {
            message.push(' ');
            message.extend(ch.to_lowercase());
        } else {
            message.push(ch);
        }
    }

    let detail = detail
        .trim()
        .trim_start_matches(['(', '{'])
        .trim_end_matches([')', '}'])
        .trim()
        .trim_matches('"');
    if !detail.is_empty() {
        message.push_str(": ");
        message.push_str(detail);
    }
    message
}
