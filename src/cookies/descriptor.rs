//! Cookie descriptors and per-cookie options.
//!
//! A [`CookieDescriptor`] names one cookie to set (value present) or clear
//! (value absent). [`CookieOptions`] carries the attributes handed to the
//! cookie library; every field is optional and nothing here supplies defaults.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A cookie to set or clear on the outgoing response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CookieDescriptor {
    /// Cookie name. Unique key when static and dynamic lists are merged.
    pub name: String,

    /// Value to set. `None` clears the cookie; an empty string is still a value.
    #[serde(default)]
    pub value: Option<String>,

    /// Options for this cookie. Replaces the route defaults entirely when present.
    #[serde(default)]
    pub options: Option<CookieOptions>,
}

impl CookieDescriptor {
    /// Descriptor that sets `name` to `value`.
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            options: None,
        }
    }

    /// Descriptor that clears `name`.
    pub fn clear(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            options: None,
        }
    }

    pub fn with_options(mut self, options: CookieOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Returns true if applying this descriptor clears the cookie.
    pub fn is_clear(&self) -> bool {
        self.value.is_none()
    }
}

/// `SameSite` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl From<SameSite> for tower_cookies::cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => tower_cookies::cookie::SameSite::Strict,
            SameSite::Lax => tower_cookies::cookie::SameSite::Lax,
            SameSite::None => tower_cookies::cookie::SameSite::None,
        }
    }
}

/// Transform applied to a cookie value before it reaches the cookie library.
#[derive(Clone)]
pub struct ValueEncoder(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl ValueEncoder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn encode(&self, value: &str) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueEncoder(..)")
    }
}

// Encoders have no structural equality; two options are equal only if they
// share the same encoder instance.
impl PartialEq for ValueEncoder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Cookie attributes.
///
/// Unset fields are left to the cookie library's defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieOptions {
    /// `Domain` attribute.
    pub domain: Option<String>,

    /// `Path` attribute.
    pub path: Option<String>,

    /// `HttpOnly` attribute.
    pub http_only: Option<bool>,

    /// `Secure` attribute.
    pub secure: Option<bool>,

    /// `SameSite` attribute.
    pub same_site: Option<SameSite>,

    /// `Max-Age` in seconds.
    pub max_age: Option<i64>,

    /// `Expires` attribute (RFC 3339 in config files).
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,

    /// Sign the value with the configured key.
    pub signed: Option<bool>,

    /// Value transform. Code only.
    #[serde(skip)]
    pub encode: Option<ValueEncoder>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn max_age(mut self, secs: i64) -> Self {
        self.max_age = Some(secs);
        self
    }

    pub fn expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    pub fn encode(mut self, encoder: ValueEncoder) -> Self {
        self.encode = Some(encoder);
        self
    }

    pub fn is_signed(&self) -> bool {
        self.signed.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_not_a_clear() {
        let d = CookieDescriptor::set("a", "");
        assert!(!d.is_clear());
        assert!(CookieDescriptor::clear("a").is_clear());
    }

    #[test]
    fn test_options_from_toml() {
        let opts: CookieOptions = toml::from_str(
            r#"
            http_only = true
            same_site = "lax"
            max_age = 3600
            expires = "2030-01-01T00:00:00Z"
            "#,
        )
        .unwrap();

        assert_eq!(opts.http_only, Some(true));
        assert_eq!(opts.same_site, Some(SameSite::Lax));
        assert_eq!(opts.max_age, Some(3600));
        assert_eq!(opts.expires.map(|e| e.year()), Some(2030));
        assert!(opts.path.is_none());
        assert!(!opts.is_signed());
    }

    #[test]
    fn test_encoder_equality_is_by_instance() {
        let upper = ValueEncoder::new(|v| v.to_uppercase());
        let a = CookieOptions::new().encode(upper.clone());
        let b = CookieOptions::new().encode(upper);
        let c = CookieOptions::new().encode(ValueEncoder::new(|v| v.to_uppercase()));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.encode.as_ref().map(|e| e.encode("abc")), Some("ABC".to_string()));
    }
}
