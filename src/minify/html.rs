//! Minify HTML with [`minify_html`].

use minify_html::{minify, Cfg};

use super::MinifyError;
use crate::options::{OptionBag, OptionValue};

/// Build a [`Cfg`] from normalized HTML options.
///
/// Only flags with a `minify_html` counterpart have an effect; everything
/// else in the bag is accepted and ignored.
pub fn html_config(options: &OptionBag) -> Cfg {
    let flag = |name: &str| {
        options
            .get(name)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    };

    let mut cfg = Cfg::new();
    cfg.keep_comments = !flag("removeComments");
    cfg.minify_css = flag("minifyCSS");
    cfg.minify_js = flag("minifyJS");

    let remove_optional_tags = flag("removeOptionalTags");
    cfg.keep_closing_tags = !remove_optional_tags;
    cfg.keep_html_and_head_opening_tags = !remove_optional_tags;

    cfg
}

/// Minify an HTML document or fragment.
pub fn minify_html(code: &str, options: &OptionBag) -> Result<String, MinifyError> {
    let cfg = html_config(options);
    let output = minify(code.as_bytes(), &cfg);
    Ok(String::from_utf8(output)?)
}
