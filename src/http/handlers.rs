//! Demo handlers exercising static, dynamic and signed cookies.

use axum::{
    extract::{Path, Query},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::cookies::{
    CookieOptions, CookieRegistry, CookieRoute, RequestCookies, ResponseCookies, SameSite,
    SignedCookies, SignedValue,
};

pub const SESSION_COOKIE: &str = "session";
pub const VISITED_COOKIE: &str = "visited";
pub const THEME_COOKIE: &str = "theme";

/// Cookie declarations of the demo routes.
///
/// With `signed` set, the login route signs cookies that carry no options of
/// their own, which covers the session cookie.
pub fn demo_registry(signed: bool) -> CookieRegistry {
    let session_defaults = CookieOptions::new()
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .signed(signed);

    CookieRegistry::new()
        .register_method(
            Method::POST,
            "/login",
            CookieRoute::new()
                .defaults(session_defaults)
                .set_with(VISITED_COOKIE, "1", CookieOptions::new().path("/")),
        )
        .register_method(
            Method::POST,
            "/logout",
            CookieRoute::new().clear([SESSION_COOKIE]),
        )
        .register(
            "/preferences/{theme}",
            CookieRoute::new()
                .defaults(CookieOptions::new().path("/").max_age(60 * 60 * 24 * 365))
                .set(THEME_COOKIE, "light"),
        )
}

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    pub user: String,
}

/// `POST /login?user=<name>`: starts a session.
pub async fn login(Query(params): Query<LoginParams>, cookies: ResponseCookies) -> impl IntoResponse {
    if params.user.is_empty() {
        // Queued cookies are discarded on error responses.
        cookies.set(SESSION_COOKIE, "anonymous");
        return (StatusCode::BAD_REQUEST, "missing user".to_string());
    }

    cookies.set(SESSION_COOKIE, params.user.clone());
    tracing::info!(user = %params.user, "Session started");
    (StatusCode::OK, format!("welcome {}", params.user))
}

/// `POST /logout`: the session cookie is cleared by the route declaration.
pub async fn logout() -> &'static str {
    "bye"
}

/// `GET /whoami`: reports the verified session user and every cookie received.
///
/// A session that fails verification reports no user.
pub async fn whoami(request: RequestCookies, signed: SignedCookies) -> impl IntoResponse {
    let (user, signature) = match signed.get(SESSION_COOKIE) {
        _ if !signed.has_key() => (request.get(SESSION_COOKIE).map(String::from), "unsigned"),
        SignedValue::Valid(user) => (Some(user), "valid"),
        SignedValue::Invalid => (None, "invalid"),
        SignedValue::Missing => (None, "missing"),
    };

    Json(json!({
        "user": user,
        "signature": signature,
        "cookies": request.all(),
    }))
}

/// `PUT /preferences/{theme}`: overrides the route's default theme.
///
/// The `default` theme keeps the declared value.
pub async fn set_theme(Path(theme): Path<String>, cookies: ResponseCookies) {
    match theme.as_str() {
        "default" => {}
        "reset" => cookies.clear(THEME_COOKIE),
        _ => cookies.set(THEME_COOKIE, theme),
    }
}
