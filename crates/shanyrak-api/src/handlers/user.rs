//! Profile handlers for the authenticated user.

use axum::Json;
use axum::extract::State;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /auth/users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = state.account_service.profile(auth.context()).await?;
    Ok(Json(user.into()))
}

/// PATCH /auth/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .account_service
        .update_profile(auth.context(), req.into())
        .await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}
