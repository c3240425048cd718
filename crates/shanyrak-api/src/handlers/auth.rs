//! Auth handlers: signup, login, refresh.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use shanyrak_core::error::AppError;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{TokenResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{ValidatedForm, ValidatedJson};
use crate::middleware::cookies::{ACCESS_COOKIE, REFRESH_COOKIE, token_cookie};
use crate::state::AppState;

/// POST /auth/users
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.account_service.signup(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/users/login
///
/// Takes an url-encoded form with `username` and `password`. Both tokens
/// are set as HttpOnly cookies; the access token is also returned in the
/// body for bearer clients.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(req): ValidatedForm<LoginRequest>,
) -> ApiResult<(CookieJar, Json<TokenResponse>)> {
    let pair = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    let secure = state.config.auth.cookie_secure;
    let jar = jar
        .add(token_cookie(ACCESS_COOKIE, pair.access_token.clone(), secure))
        .add(token_cookie(REFRESH_COOKIE, pair.refresh_token, secure));

    Ok((jar, Json(TokenResponse::bearer(pair.access_token))))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<TokenResponse>)> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let access_token = state.account_service.refresh(&refresh_token)?;

    let jar = jar.add(token_cookie(
        ACCESS_COOKIE,
        access_token.clone(),
        state.config.auth.cookie_secure,
    ));
    Ok((jar, Json(TokenResponse::bearer(access_token))))
}
