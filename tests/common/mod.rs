//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::header::{HeaderMap, SET_COOKIE};
use route_cookies::{AppConfig, HttpServer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_cookies::Cookie;

/// A running demo server. Dropping the handle shuts it down.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the demo server on an ephemeral port.
pub async fn start_server(config: AppConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer { addr, _shutdown: tx }
}

/// Client without connection pooling or proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Parse every `Set-Cookie` header.
pub fn set_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| {
            Cookie::parse(v.to_str().expect("set-cookie is valid utf-8").to_string())
                .expect("set-cookie parses")
        })
        .collect()
}

/// Find the `Set-Cookie` entry for `name`.
pub fn find<'a>(cookies: &'a [Cookie<'static>], name: &str) -> Option<&'a Cookie<'static>> {
    cookies.iter().find(|c| c.name() == name)
}
