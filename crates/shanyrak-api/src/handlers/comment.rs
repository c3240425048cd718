//! Comment handlers, nested under a listing.

use axum::Json;
use axum::extract::State;

use shanyrak_core::types::{CommentId, PostId};

use crate::dto::request::CommentRequest;
use crate::dto::response::{CommentListResponse, IdResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /shanyraks/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(post_id): ApiPath<PostId>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<IdResponse<CommentId>>> {
    let comment = state
        .comment_service
        .create(auth.context(), post_id, &req.content)
        .await?;
    Ok(Json(IdResponse { id: comment.id }))
}

/// GET /shanyraks/{id}/comments
pub async fn list(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<PostId>,
) -> ApiResult<Json<CommentListResponse>> {
    let comments = state.comment_service.list(post_id).await?;
    Ok(Json(CommentListResponse {
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

/// PATCH /shanyraks/{id}/comments/{comment_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((post_id, comment_id)): ApiPath<(PostId, CommentId)>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .comment_service
        .update(auth.context(), post_id, comment_id, &req.content)
        .await?;
    Ok(Json(MessageResponse::new("Comment updated successfully")))
}

/// DELETE /shanyraks/{id}/comments/{comment_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((post_id, comment_id)): ApiPath<(PostId, CommentId)>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .comment_service
        .delete(auth.context(), post_id, comment_id)
        .await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
