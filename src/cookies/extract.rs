//! Read-only access to request cookies.
//!
//! Both extractors project over the jar parsed by `CookieManagerLayer`; they
//! never modify it.

use std::collections::BTreeMap;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_cookies::{Cookies, Key};

/// Signing key made available to extractors by the cookie layer.
#[derive(Clone)]
pub(crate) struct SigningKey(pub(crate) Key);

fn jar(parts: &Parts) -> Result<Cookies, (StatusCode, &'static str)> {
    parts.extensions.get::<Cookies>().cloned().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "Cookie manager layer is not installed",
    ))
}

/// Cookies sent by the client, by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestCookies {
    values: BTreeMap<String, String>,
}

impl RequestCookies {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl<S> FromRequestParts<S> for RequestCookies
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values = jar(parts)?
            .list()
            .into_iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        Ok(Self { values })
    }
}

/// Result of reading a signed cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedValue {
    /// Signature verified; the original value.
    Valid(String),
    /// Cookie present but its signature does not verify.
    Invalid,
    /// No cookie with that name.
    Missing,
}

impl SignedValue {
    pub fn valid(self) -> Option<String> {
        match self {
            SignedValue::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SignedValue::Valid(_))
    }
}

/// Signed cookies sent by the client, verified with the configured key.
#[derive(Clone)]
pub struct SignedCookies {
    cookies: Cookies,
    key: Option<Key>,
}

impl SignedCookies {
    /// Whether a signing key is configured.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn get(&self, name: &str) -> SignedValue {
        if self.cookies.get(name).is_none() {
            return SignedValue::Missing;
        }
        let Some(key) = &self.key else {
            return SignedValue::Invalid;
        };
        match self.cookies.signed(key).get(name) {
            Some(cookie) => SignedValue::Valid(cookie.value().to_string()),
            None => SignedValue::Invalid,
        }
    }

    /// Every cookie whose signature verifies.
    pub fn all(&self) -> BTreeMap<String, String> {
        let Some(key) = &self.key else {
            return BTreeMap::new();
        };
        let signed = self.cookies.signed(key);
        self.cookies
            .list()
            .into_iter()
            .filter_map(|c| {
                signed
                    .get(c.name())
                    .map(|verified| (verified.name().to_string(), verified.value().to_string()))
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for SignedCookies
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies = jar(parts)?;
        let key = parts.extensions.get::<SigningKey>().map(|k| k.0.clone());
        Ok(Self { cookies, key })
    }
}
