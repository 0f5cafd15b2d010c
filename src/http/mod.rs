//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, cookie manager)
//!     → cookie route layer (registry lookup, ResponseCookies)
//!     → handlers.rs
//!     → Set-Cookie headers written on the way out
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
