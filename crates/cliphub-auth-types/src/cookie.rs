//! Cookie builders for the session token pair.
//!
//! Both cookies are httpOnly + secure; the refresh cookie is path-scoped to
//! the refresh route so it never rides along on ordinary requests.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Path the refresh cookie is scoped to.
pub const REFRESH_COOKIE_PATH: &str = "/users/refresh-token";

/// Set the access-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use cliphub_auth_types::cookie::{set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "token_value".to_string(), "example.com".to_string(), 900);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(900)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the refresh-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use cliphub_auth_types::cookie::{set_refresh_token_cookie, REFRESH_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "refresh_value".to_string(), "example.com".to_string(), 864000);
/// let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/users/refresh-token"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(864000)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_refresh_token_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, value))
        .path(REFRESH_COOKIE_PATH)
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear both session cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use cliphub_auth_types::cookie::{
///     clear_session_cookies, set_access_token_cookie, set_refresh_token_cookie,
///     ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_access_token_cookie(jar, "a".to_string(), "example.com".to_string(), 900);
/// let jar = set_refresh_token_cookie(jar, "r".to_string(), "example.com".to_string(), 864000);
/// let jar = clear_session_cookies(jar, "example.com".to_string());
/// let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(access.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(refresh.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookies(jar: CookieJar, domain: String) -> CookieJar {
    let access = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .domain(domain.clone())
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    let refresh = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(REFRESH_COOKIE_PATH)
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(access).add(refresh)
}
