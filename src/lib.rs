//! Declarative cookie handling for axum routes.
//!
//! Routes declare default cookie options and static cookies in a
//! [`CookieRegistry`]; handlers queue dynamic cookies through
//! [`ResponseCookies`]. After the handler returns, both lists are merged by
//! name (dynamic wins) and written to the response as `Set-Cookie` headers.

pub mod config;
pub mod cookies;
pub mod http;
pub mod observability;

pub use config::schema::AppConfig;
pub use cookies::{
    CookieDescriptor, CookieLayerState, CookieOptions, CookieRegistry, CookieRoute,
    RequestCookies, ResponseCookies, SignedCookies,
};
pub use http::HttpServer;
