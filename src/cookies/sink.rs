//! Writing cookies to the response.

use tower_cookies::{Cookie, Cookies, Key};

use crate::cookies::descriptor::CookieOptions;
use crate::cookies::CookieError;

/// Destination for effective cookies.
pub trait CookieSink {
    /// Report whether `set` would accept `options`, without writing anything.
    fn check(&self, _name: &str, _options: &CookieOptions) -> Result<(), CookieError> {
        Ok(())
    }

    /// Set `name` to `value` with `options`.
    fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError>;

    /// Clear `name`. Options are not consulted.
    fn clear(&mut self, name: &str);
}

/// Writes into the per-request tower-cookies jar.
///
/// The cookie manager layer turns every jar change into one `Set-Cookie` header.
pub struct JarSink<'a> {
    cookies: &'a Cookies,
    key: Option<&'a Key>,
}

impl<'a> JarSink<'a> {
    pub fn new(cookies: &'a Cookies, key: Option<&'a Key>) -> Self {
        Self { cookies, key }
    }
}

impl JarSink<'_> {
    fn signing_key(&self, name: &str, options: &CookieOptions) -> Result<Option<&Key>, CookieError> {
        if !options.is_signed() {
            return Ok(None);
        }
        self.key
            .map(Some)
            .ok_or_else(|| CookieError::MissingKey { name: name.to_string() })
    }
}

impl CookieSink for JarSink<'_> {
    fn check(&self, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
        self.signing_key(name, options).map(|_| ())
    }

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError> {
        let cookie = build_cookie(name, value, options);
        match self.signing_key(name, options)? {
            Some(key) => self.cookies.signed(key).add(cookie),
            None => self.cookies.add(cookie),
        }
        Ok(())
    }

    fn clear(&mut self, name: &str) {
        self.cookies.add(removal_cookie(name));
    }
}

/// Build a cookie from a name, raw value and options.
pub fn build_cookie(name: &str, value: &str, options: &CookieOptions) -> Cookie<'static> {
    let value = match &options.encode {
        Some(encoder) => encoder.encode(value),
        None => value.to_string(),
    };

    let mut cookie = Cookie::new(name.to_string(), value);
    if let Some(domain) = &options.domain {
        cookie.set_domain(domain.clone());
    }
    if let Some(path) = &options.path {
        cookie.set_path(path.clone());
    }
    if let Some(http_only) = options.http_only {
        cookie.set_http_only(http_only);
    }
    if let Some(secure) = options.secure {
        cookie.set_secure(secure);
    }
    if let Some(same_site) = options.same_site {
        cookie.set_same_site(tower_cookies::cookie::SameSite::from(same_site));
    }
    if let Some(secs) = options.max_age {
        cookie.set_max_age(time::Duration::seconds(secs));
    }
    if let Some(expires) = options.expires {
        cookie.set_expires(expires);
    }
    cookie
}

/// Cookie that makes the client drop `name`: empty value, `Path=/`, `Max-Age=0`,
/// expiry in the past.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}
