//! Favorites handlers.

use axum::Json;
use axum::extract::State;

use shanyrak_core::types::PostId;

use crate::dto::response::{FavoritesResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiPath, AuthUser};
use crate::state::AppState;

/// POST /auth/users/favorites/shanyraks/{id}
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<Json<MessageResponse>> {
    state.account_service.add_favorite(auth.context(), id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Shanyrak {id} added to favorites"
    ))))
}

/// GET /auth/users/favorites/shanyraks
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FavoritesResponse>> {
    let entries = state.account_service.favorites(auth.context()).await?;
    Ok(Json(entries.into()))
}

/// DELETE /auth/users/favorites/shanyraks/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .account_service
        .remove_favorite(auth.context(), id)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Shanyrak {id} removed from favorites"
    ))))
}
