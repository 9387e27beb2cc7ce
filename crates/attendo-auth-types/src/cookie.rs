//! Access-token cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session access token.
pub const ATTENDO_ACCESS_TOKEN: &str = "attendo_access_token";

/// Expire the access-token cookie.
///
/// The identity service sets this cookie; services only ever clear it on
/// sign-out.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use attendo_auth_types::cookie::{clear_access_token_cookie, ATTENDO_ACCESS_TOKEN};
///
/// let jar = clear_access_token_cookie(CookieJar::new(), "example.com".to_string());
/// let cookie = jar.get(ATTENDO_ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn clear_access_token_cookie(jar: CookieJar, domain: String) -> CookieJar {
    jar.add(
        Cookie::build((ATTENDO_ACCESS_TOKEN, String::new()))
            .path("/")
            .domain(domain)
            .max_age(Duration::ZERO)
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict)
            .build(),
    )
}
