//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/cors.rs (CORS headers, OPTIONS short-circuit)
//!     → request.rs (request ID, body → MinifyRequest)
//!     → handlers.rs (normalize options, run minifier)
//!     → response.rs (JSON bodies, error mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, MinifyRequest, X_REQUEST_ID};
pub use response::AppError;
pub use server::{AppState, HttpServer};
