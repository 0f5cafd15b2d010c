//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Build the cookie registry (built-in routes + configured routes)
//! - Wire up middleware (tracing, cookie layer)
//! - Serve until the shutdown future resolves

use std::future::Future;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::cookies::{CookieError, CookieLayerState, CookieRegistry};
use crate::http::handlers;

/// HTTP server for the cookie demo.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Configured routes replace built-in declarations with the same key.
    pub fn new(config: AppConfig) -> Result<Self, CookieError> {
        let mut registry = handlers::demo_registry(config.cookies.secret.is_some());
        registry.extend(CookieRegistry::from_config(&config.routes));

        tracing::info!(
            routes = registry.len(),
            signed = config.cookies.secret.is_some(),
            apply_on_error = config.cookies.apply_on_error,
            "Cookie registry built"
        );

        let cookie_state = CookieLayerState::from_settings(&config.cookies, registry)?;
        let router = Self::build_router(cookie_state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(cookie_state: CookieLayerState) -> Router {
        let routes = Router::new()
            .route("/login", post(handlers::login))
            .route("/logout", post(handlers::logout))
            .route("/whoami", get(handlers::whoami))
            .route("/preferences/{theme}", put(handlers::set_theme));

        cookie_state
            .install(routes)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
