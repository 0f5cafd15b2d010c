//! Request-scoped cookies supplied by the handler.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::cookies::descriptor::{CookieDescriptor, CookieOptions};

/// Cookies the handler wants applied to this request's response.
///
/// Inserted empty into the request extensions by the cookie layer before the
/// handler runs and drained once after it returns. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    inner: Arc<Mutex<Vec<CookieDescriptor>>>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.push(CookieDescriptor::set(name, value));
    }

    pub fn set_with(&self, name: impl Into<String>, value: impl Into<String>, options: CookieOptions) {
        self.push(CookieDescriptor::set(name, value).with_options(options));
    }

    pub fn clear(&self, name: impl Into<String>) {
        self.push(CookieDescriptor::clear(name));
    }

    pub fn push(&self, descriptor: CookieDescriptor) {
        self.lock().push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return every queued descriptor, in insertion order.
    pub(crate) fn take(&self) -> Vec<CookieDescriptor> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CookieDescriptor>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> FromRequestParts<S> for ResponseCookies
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ResponseCookies>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Cookie layer is not installed on this route",
        ))
    }
}
