//! Declarative cookie handling for axum routes.
//!
//! # Data Flow
//! ```text
//! startup:
//!     config routes / code → registry.rs (CookieRegistry)
//!     → middleware.rs (CookieLayerState::install on the Router)
//!
//! per request:
//!     extract.rs   (RequestCookies, SignedCookies: read the incoming jar)
//!     context.rs   (ResponseCookies: handler queues dynamic cookies)
//!     merge.rs     (dynamic ++ static, first name wins, resolve options)
//!     sink.rs      (set / clear in the tower-cookies jar)
//! ```
//!
//! # Example
//! ```no_run
//! use axum::{routing::post, Router};
//! use route_cookies::cookies::{CookieLayerState, CookieOptions, CookieRegistry, CookieRoute, ResponseCookies};
//!
//! async fn login(cookies: ResponseCookies) {
//!     cookies.set("session", "abc123");
//! }
//!
//! let registry = CookieRegistry::new().register(
//!     "/login",
//!     CookieRoute::new()
//!         .defaults(CookieOptions::new().http_only(true))
//!         .set("seen", "1"),
//! );
//!
//! let app: Router = CookieLayerState::new(registry)
//!     .install(Router::new().route("/login", post(login)));
//! ```

pub mod context;
pub mod descriptor;
pub mod extract;
pub mod merge;
pub mod middleware;
pub mod registry;
pub mod sink;

pub use context::ResponseCookies;
pub use descriptor::{CookieDescriptor, CookieOptions, SameSite, ValueEncoder};
pub use extract::{RequestCookies, SignedCookies, SignedValue};
pub use middleware::{apply_cookies, CookieLayerState};
pub use registry::{CookieRegistry, CookieRoute, RouteKey};
pub use sink::{CookieSink, JarSink};

/// Errors raised while writing cookies.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie `{name}` is signed but no signing key is configured")]
    MissingKey { name: String },

    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}
