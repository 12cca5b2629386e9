//! Adapters over the third-party minifiers and the gzip codec.
//!
//! # Responsibilities
//! - Translate normalized option bags into each crate's configuration
//! - Run the crate and return UTF-8 output
//! - Map crate errors into [`MinifyError`]
//!
//! Every function here is synchronous and CPU-bound; callers on the async
//! runtime run them through `spawn_blocking`.

pub mod css;
pub mod gzip;
pub mod html;
pub mod javascript;

use thiserror::Error;

pub use css::minify_css;
pub use gzip::gzip;
pub use html::minify_html;
pub use javascript::minify_javascript;

/// Source languages with a minifier behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Javascript,
    Css,
    Html,
}

impl Language {
    /// Lowercase name, used as the endpoint label in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Css => "css",
            Language::Html => "html",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Css => "CSS",
            Language::Html => "HTML",
        }
    }
}

/// Errors raised by the minifier adapters.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// JavaScript could not be parsed or minified.
    #[error("{0}")]
    Javascript(String),

    /// CSS parser error.
    #[error("{0}")]
    CssParse(String),

    /// CSS minifier error.
    #[error("{0}")]
    CssMinify(String),

    /// CSS printer error.
    #[error("{0}")]
    CssPrint(String),

    /// Minified output was not valid UTF-8.
    #[error("minified output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
