//! HttpOnly token cookies.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie holding the access token.
pub const ACCESS_COOKIE: &str = "access_token";

/// Cookie holding the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build an HttpOnly, SameSite=Lax cookie scoped to the whole site.
pub fn token_cookie(name: &'static str, token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .build()
}
