//! HTTP cookie construction and parsing for the auth flow.
//!
//! Both tokens travel as `HttpOnly` cookies so scripts can never read
//! them. `SameSite=Strict` keeps them off cross-site requests, and the
//! short-lived `original_url` cookie carries the page a visitor was
//! headed to across the refresh redirect.

use axum::http::header::{HeaderMap, COOKIE, SET_COOKIE};
use axum::http::HeaderName;
use axum::response::AppendHeaders;

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN: &str = "access_token";
/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";
/// Cookie holding the originally requested path across a refresh redirect.
pub const ORIGINAL_URL: &str = "original_url";

/// Access cookie lifetime: 15 minutes.
pub const ACCESS_MAX_AGE_SECS: i64 = 15 * 60;
/// Refresh cookie lifetime: 7 days.
pub const REFRESH_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;
/// Original-url cookie lifetime: long enough to survive one redirect hop.
pub const ORIGINAL_URL_MAX_AGE_SECS: i64 = 60;

/// Build a hardened `Set-Cookie` value.
pub fn build(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={max_age_secs}")
}

/// Build a `Set-Cookie` value that deletes the named cookie.
pub fn clear(name: &str) -> String {
    build(name, "", 0)
}

/// Read a cookie value out of a request's `Cookie` header.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        if let Some(value) = pair.trim().strip_prefix(&format!("{name}=")) {
            return Some(value.to_string());
        }
    }
    None
}

/// `Set-Cookie` headers installing a fresh access/refresh token pair.
pub fn set_auth_cookies(
    access_token: &str,
    refresh_token: &str,
) -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (SET_COOKIE, build(ACCESS_TOKEN, access_token, ACCESS_MAX_AGE_SECS)),
        (
            SET_COOKIE,
            build(REFRESH_TOKEN, refresh_token, REFRESH_MAX_AGE_SECS),
        ),
    ])
}

/// `Set-Cookie` headers deleting both auth cookies.
pub fn clear_auth_cookies() -> AppendHeaders<[(HeaderName, String); 2]> {
    AppendHeaders([
        (SET_COOKIE, clear(ACCESS_TOKEN)),
        (SET_COOKIE, clear(REFRESH_TOKEN)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_build_sets_hardening_attributes() {
        let cookie = build(ACCESS_TOKEN, "abc123", ACCESS_MAX_AGE_SECS);
        assert!(cookie.starts_with("access_token=abc123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
    }

    #[test]
    fn test_clear_zeroes_value_and_age() {
        let cookie = clear(REFRESH_TOKEN);
        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_finds_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=tok-a; refresh_token=tok-r"),
        );

        assert_eq!(read(&headers, ACCESS_TOKEN).as_deref(), Some("tok-a"));
        assert_eq!(read(&headers, REFRESH_TOKEN).as_deref(), Some("tok-r"));
        assert_eq!(read(&headers, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_read_missing_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(read(&headers, ACCESS_TOKEN).is_none());

        let empty = HeaderMap::new();
        assert!(read(&empty, ACCESS_TOKEN).is_none());
    }

    #[test]
    fn test_read_does_not_match_prefix_names() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("access_token_v2=nope; access_token=yes"),
        );
        assert_eq!(read(&headers, ACCESS_TOKEN).as_deref(), Some("yes"));
    }
}
