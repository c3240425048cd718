//! Listing handlers.

use axum::Json;
use axum::extract::State;

use shanyrak_core::types::PostId;

use crate::dto::request::{CreateShanyrakRequest, SearchParams, UpdateShanyrakRequest};
use crate::dto::response::{IdResponse, MessageResponse, SearchResponse, ShanyrakResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// POST /shanyraks
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateShanyrakRequest>,
) -> ApiResult<Json<IdResponse<PostId>>> {
    let post = state
        .shanyrak_service
        .create(auth.context(), req.into())
        .await?;
    Ok(Json(IdResponse { id: post.id }))
}

/// GET /shanyraks
pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let (filter, page) = params.into_parts()?;
    let results = state.shanyrak_service.search(&filter, &page).await?;
    Ok(Json(results.into()))
}

/// GET /shanyraks/{id}
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<Json<ShanyrakResponse>> {
    let details = state.shanyrak_service.get(id).await?;
    Ok(Json(details.into()))
}

/// PATCH /shanyraks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PostId>,
    ValidatedJson(req): ValidatedJson<UpdateShanyrakRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .shanyrak_service
        .update(auth.context(), id, req.into())
        .await?;
    Ok(Json(MessageResponse::new("Shanyrak updated successfully")))
}

/// DELETE /shanyraks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<PostId>,
) -> ApiResult<Json<MessageResponse>> {
    state.shanyrak_service.delete(auth.context(), id).await?;
    Ok(Json(MessageResponse::new("Shanyrak deleted successfully")))
}
