//! Route cookie registry.
//!
//! # Responsibilities
//! - Hold the cookie declarations of each route (defaults + static list)
//! - Look up the declaration for a matched route
//!
//! # Design Decisions
//! - Keyed by HTTP method and matched route pattern, not by handler
//! - Method-specific entries win over any-method entries
//! - HEAD falls back to GET entries, as axum serves HEAD with the GET handler
//! - Immutable after startup; shared via Arc
//! - Unregistered routes have no defaults and no static cookies

use std::collections::HashMap;

use axum::http::Method;

use crate::config::RouteCookiesConfig;
use crate::cookies::descriptor::{CookieDescriptor, CookieOptions};

/// Cookie declarations for one route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieRoute {
    /// Options used by cookies that carry none of their own.
    pub defaults: Option<CookieOptions>,

    /// Cookies set or cleared on every successful response of the route.
    pub cookies: Vec<CookieDescriptor>,
}

impl CookieRoute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(mut self, options: CookieOptions) -> Self {
        self.defaults = Some(options);
        self
    }

    pub fn set(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookie(CookieDescriptor::set(name, value))
    }

    pub fn set_with(
        self,
        name: impl Into<String>,
        value: impl Into<String>,
        options: CookieOptions,
    ) -> Self {
        self.cookie(CookieDescriptor::set(name, value).with_options(options))
    }

    /// Clear each of `names` on every response of the route.
    pub fn clear<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.cookies
            .extend(names.into_iter().map(CookieDescriptor::clear));
        self
    }

    pub fn cookie(mut self, descriptor: CookieDescriptor) -> Self {
        self.cookies.push(descriptor);
        self
    }
}

/// Registry key: optional method plus route pattern (e.g. `/users/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Option<Method>,
    pub path: String,
}

/// Side-table from routes to their cookie declarations.
#[derive(Debug, Clone, Default)]
pub struct CookieRegistry {
    routes: HashMap<RouteKey, CookieRoute>,
}

impl CookieRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured routes.
    ///
    /// Routes whose method does not parse are skipped; validation rejects
    /// them before this point.
    pub fn from_config(routes: &[RouteCookiesConfig]) -> Self {
        let mut registry = Self::new();
        for route in routes {
            let method = match route.method.as_deref() {
                None => None,
                Some(m) => match Method::from_bytes(m.to_ascii_uppercase().as_bytes()) {
                    Ok(method) => Some(method),
                    Err(_) => {
                        tracing::warn!(path = %route.path, method = %m, "Skipping route with invalid method");
                        continue;
                    }
                },
            };

            let entry = CookieRoute {
                defaults: route.defaults.clone(),
                cookies: route.cookies.clone(),
            };
            registry.insert(RouteKey { method, path: route.path.clone() }, entry);
        }
        registry
    }

    /// Register `route` for `path` under every method.
    pub fn register(mut self, path: impl Into<String>, route: CookieRoute) -> Self {
        self.insert(RouteKey { method: None, path: path.into() }, route);
        self
    }

    /// Register `route` for `method` + `path`.
    pub fn register_method(mut self, method: Method, path: impl Into<String>, route: CookieRoute) -> Self {
        self.insert(RouteKey { method: Some(method), path: path.into() }, route);
        self
    }

    fn insert(&mut self, key: RouteKey, route: CookieRoute) {
        if self.routes.insert(key.clone(), route).is_some() {
            tracing::debug!(path = %key.path, method = ?key.method, "Replaced cookie route");
        }
    }

    /// Add every entry of `other`, replacing entries with the same key.
    pub fn extend(&mut self, other: CookieRegistry) {
        for (key, route) in other.routes {
            self.insert(key, route);
        }
    }

    /// Find the declaration for a matched route.
    ///
    /// Tries `method`, then GET when `method` is HEAD, then the any-method entry.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&CookieRoute> {
        let get_fallback = (*method == Method::HEAD).then_some(Method::GET);
        std::iter::once(Some(method.clone()))
            .chain(get_fallback.map(Some))
            .chain(std::iter::once(None))
            .find_map(|method| {
                self.routes.get(&RouteKey { method, path: path.to_string() })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
