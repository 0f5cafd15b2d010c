//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::cookies::{CookieDescriptor, CookieOptions};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Cookie layer settings.
    pub cookies: CookieSettings,

    /// Per-route cookie declarations.
    pub routes: Vec<RouteCookiesConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "route_cookies=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Cookie layer settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CookieSettings {
    /// Secret for signed cookies. At least 64 bytes.
    pub secret: Option<String>,

    /// Apply cookies to 4xx/5xx responses too.
    pub apply_on_error: bool,
}

/// Cookie declarations for one route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteCookiesConfig {
    /// Route pattern as registered with the router (e.g. "/users/{id}").
    pub path: String,

    /// HTTP method. Absent = every method.
    #[serde(default)]
    pub method: Option<String>,

    /// Options used by cookies without their own.
    #[serde(default)]
    pub defaults: Option<CookieOptions>,

    /// Cookies set (value present) or cleared (value absent).
    #[serde(default)]
    pub cookies: Vec<CookieDescriptor>,
}
