//! Minification API library.
//!
//! Wraps JavaScript, CSS and HTML minifiers plus gzip behind a small REST
//! surface.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod minify;
pub mod observability;
pub mod options;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
