//! Session middleware with transparent access-token rotation.
//!
//! Per request:
//! 1. Take the access token from `Authorization: Bearer`, falling back to
//!    the `access_token` cookie. Without one the request passes through.
//! 2. A valid token yields the caller's identity.
//! 3. An expired token is replaced using the `refresh_token` cookie: a
//!    missing or invalid refresh token fails the request with 401,
//!    otherwise one new access token is minted.
//! 4. Any other verification failure is a 401; it never triggers a refresh.
//! 5. A minted token is returned as an HttpOnly cookie and in the
//!    `X-New-Access-Token` header. The refresh cookie is left untouched.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info, warn};

use shanyrak_auth::jwt::TokenError;
use shanyrak_core::error::AppError;
use shanyrak_core::types::UserId;

use super::cookies::{ACCESS_COOKIE, REFRESH_COOKIE, token_cookie};
use crate::error::ApiError;
use crate::state::AppState;

/// Response header carrying a freshly minted access token.
pub static NEW_ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-new-access-token");

/// Identity resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentity {
    /// The authenticated user.
    pub user_id: UserId,
}

/// Resolve the caller and rotate an expired access token.
pub async fn session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let token = bearer_token(request.headers())
        .or_else(|| jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()));

    let Some(token) = token else {
        return next.run(request).await;
    };

    let (user_id, new_token) = match state.jwt_decoder.verify_access(&token) {
        Ok(user_id) => (user_id, None),
        Err(TokenError::Expired) => match rotate(&state, &jar) {
            Ok(pair) => pair,
            Err(err) => return ApiError(err).into_response(),
        },
        Err(err) => {
            debug!(error = %err, "Rejected access token");
            return ApiError(AppError::unauthorized("Invalid access token")).into_response();
        }
    };

    request.extensions_mut().insert(AuthIdentity { user_id });

    let mut response = next.run(request).await;

    if let Some(token) = new_token {
        attach_access_token(&mut response, token, state.config.auth.cookie_secure);
    }
    response
}

/// Mint a new access token from the refresh cookie.
fn rotate(state: &AppState, jar: &CookieJar) -> Result<(UserId, Option<String>), AppError> {
    let refresh = jar
        .get(REFRESH_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Access token expired. Refresh token required."))?;

    let user_id = state
        .jwt_decoder
        .verify_refresh(refresh.value())
        .map_err(|err| {
            warn!(error = %err, "Refresh during rotation failed");
            AppError::unauthorized("Invalid refresh token")
        })?;

    let token = state.jwt_encoder.issue_access(user_id)?;
    info!(user_id = %user_id, "Access token rotated");
    Ok((user_id, Some(token)))
}

fn attach_access_token(response: &mut Response, token: String, secure: bool) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&token) {
        headers.insert(NEW_ACCESS_TOKEN_HEADER.clone(), value);
    }
    let cookie = token_cookie(ACCESS_COOKIE, token, secure);
    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
