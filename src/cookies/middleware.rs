//! Route layer that applies merged cookies after the handler runs.
//!
//! # Flow
//! ```text
//! request
//!     → insert empty ResponseCookies (+ signing key) into extensions
//!     → handler (may push dynamic cookies)
//!     → skip on 4xx/5xx unless apply_on_error
//!     → merge(dynamic, static) → set / clear in the jar
//! response (CookieManagerLayer writes Set-Cookie headers)
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_cookies::{CookieManagerLayer, Cookies, Key};

use crate::config::CookieSettings;
use crate::cookies::context::ResponseCookies;
use crate::cookies::extract::SigningKey;
use crate::cookies::merge;
use crate::cookies::registry::CookieRegistry;
use crate::cookies::sink::JarSink;
use crate::cookies::CookieError;

/// Minimum secret length accepted as a signing key.
pub const MIN_SECRET_LEN: usize = 64;

/// State shared by every request passing through the cookie layer.
#[derive(Clone)]
pub struct CookieLayerState {
    pub registry: Arc<CookieRegistry>,
    pub key: Option<Key>,
    pub apply_on_error: bool,
}

impl CookieLayerState {
    pub fn new(registry: CookieRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            key: None,
            apply_on_error: false,
        }
    }

    /// Build from configured settings and a populated registry.
    pub fn from_settings(settings: &CookieSettings, registry: CookieRegistry) -> Result<Self, CookieError> {
        let mut state = Self::new(registry).apply_on_error(settings.apply_on_error);
        if let Some(secret) = &settings.secret {
            state = state.with_key(key_from_secret(secret)?);
        }
        Ok(state)
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    pub fn apply_on_error(mut self, apply: bool) -> Self {
        self.apply_on_error = apply;
        self
    }

    /// Install the cookie layer on every route currently in `router`.
    ///
    /// Must be called after the routes are added: routes added later are not
    /// covered, and axum panics if the router has no routes yet.
    pub fn install<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .route_layer(middleware::from_fn_with_state(self, apply_cookies))
            .layer(CookieManagerLayer::new())
    }
}

/// Derive a signing key from a configured secret.
pub fn key_from_secret(secret: &str) -> Result<Key, CookieError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(CookieError::InvalidKey(format!(
            "secret must be at least {} bytes, got {}",
            MIN_SECRET_LEN,
            secret.len()
        )));
    }
    Ok(Key::from(secret.as_bytes()))
}

/// Middleware function applying route and request cookies.
pub async fn apply_cookies(
    State(state): State<CookieLayerState>,
    cookies: Cookies,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let route_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string());

    let scratch = ResponseCookies::new();
    req.extensions_mut().insert(scratch.clone());
    if let Some(key) = &state.key {
        req.extensions_mut().insert(SigningKey(key.clone()));
    }

    let response = next.run(req).await;
    let dynamic = scratch.take();

    let status = response.status();
    if !state.apply_on_error && (status.is_client_error() || status.is_server_error()) {
        tracing::debug!(
            method = %method,
            path = ?route_path,
            status = %status,
            dropped = dynamic.len(),
            "Error response, cookies not applied"
        );
        return response;
    }

    let route = route_path
        .as_deref()
        .and_then(|path| state.registry.lookup(&method, path));

    let mut sink = JarSink::new(&cookies, state.key.as_ref());
    match merge::apply(route, dynamic, &mut sink) {
        Ok(applied) => {
            if applied > 0 {
                tracing::debug!(
                    method = %method,
                    path = ?route_path,
                    applied,
                    "Cookies applied"
                );
            }
            response
        }
        Err(e) => {
            tracing::error!(
                method = %method,
                path = ?route_path,
                error = %e,
                "Failed to apply cookies"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to apply cookies").into_response()
        }
    }
}
