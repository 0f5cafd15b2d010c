//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Cookie names are RFC 6265 tokens
//! - Route keys (method + path) are unique
//! - Option values are usable (non-negative Max-Age, SameSite=None is Secure)
//! - Signed cookies have a secret to sign with
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: &AppConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;
use crate::cookies::middleware::MIN_SECRET_LEN;
use crate::cookies::{CookieOptions, SameSite};

const METHODS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE", "CONNECT",
];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    SecretTooShort(usize),
    InvalidRoutePath(String),
    UnknownMethod { path: String, method: String },
    DuplicateRoute { path: String, method: Option<String> },
    InvalidCookieName { path: String, name: String },
    NegativeMaxAge { path: String, context: String },
    InsecureSameSiteNone { path: String, context: String },
    SignedWithoutSecret { path: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => write!(f, "invalid bind address '{}'", addr),
            ValidationError::SecretTooShort(len) => write!(
                f,
                "cookie secret must be at least {} bytes (got {})",
                MIN_SECRET_LEN, len
            ),
            ValidationError::InvalidRoutePath(path) => {
                write!(f, "route path '{}' must start with '/'", path)
            }
            ValidationError::UnknownMethod { path, method } => {
                write!(f, "route '{}': unknown method '{}'", path, method)
            }
            ValidationError::DuplicateRoute { path, method } => match method {
                Some(m) => write!(f, "route '{} {}' declared more than once", m, path),
                None => write!(f, "route '{}' declared more than once", path),
            },
            ValidationError::InvalidCookieName { path, name } => {
                write!(f, "route '{}': invalid cookie name '{}'", path, name)
            }
            ValidationError::NegativeMaxAge { path, context } => {
                write!(f, "route '{}': {} has a negative max_age", path, context)
            }
            ValidationError::InsecureSameSiteNone { path, context } => {
                write!(f, "route '{}': {} uses same_site = \"none\" without secure = true", path, context)
            }
            ValidationError::SignedWithoutSecret { path, context } => {
                write!(f, "route '{}': {} is signed but no cookies.secret is configured", path, context)
            }
        }
    }
}

/// Validate the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(secret) = &config.cookies.secret {
        if secret.len() < MIN_SECRET_LEN {
            errors.push(ValidationError::SecretTooShort(secret.len()));
        }
    }

    let has_secret = config.cookies.secret.is_some();
    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::InvalidRoutePath(route.path.clone()));
        }

        let method = route.method.as_ref().map(|m| m.to_ascii_uppercase());
        if let Some(m) = &method {
            if !METHODS.contains(&m.as_str()) {
                errors.push(ValidationError::UnknownMethod {
                    path: route.path.clone(),
                    method: m.clone(),
                });
            }
        }

        if !seen.insert((method.clone(), route.path.clone())) {
            errors.push(ValidationError::DuplicateRoute {
                path: route.path.clone(),
                method,
            });
        }

        if let Some(defaults) = &route.defaults {
            check_options(&route.path, "defaults", defaults, has_secret, &mut errors);
        }

        for cookie in &route.cookies {
            if !is_cookie_name(&cookie.name) {
                errors.push(ValidationError::InvalidCookieName {
                    path: route.path.clone(),
                    name: cookie.name.clone(),
                });
            }
            if let Some(options) = &cookie.options {
                let context = format!("cookie '{}'", cookie.name);
                check_options(&route.path, &context, options, has_secret, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_options(
    path: &str,
    context: &str,
    options: &CookieOptions,
    has_secret: bool,
    errors: &mut Vec<ValidationError>,
) {
    if options.max_age.is_some_and(|secs| secs < 0) {
        errors.push(ValidationError::NegativeMaxAge {
            path: path.to_string(),
            context: context.to_string(),
        });
    }
    if options.same_site == Some(SameSite::None) && options.secure != Some(true) {
        errors.push(ValidationError::InsecureSameSiteNone {
            path: path.to_string(),
            context: context.to_string(),
        });
    }
    if options.is_signed() && !has_secret {
        errors.push(ValidationError::SignedWithoutSecret {
            path: path.to_string(),
            context: context.to_string(),
        });
    }
}

/// RFC 6265 cookie-name: a non-empty HTTP token.
pub fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"'
                        | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}
