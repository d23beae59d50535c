use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CommentResponseData;
use super::CommentsResponseData;
use super::EmptyResponseData;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentBody;
use crate::domain::comment::models::CommentId;
use crate::domain::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;

/// `POST /api/articles/:slug/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> Result<ApiSuccess<CommentResponseData>, ApiError> {
    let author = identity.require_user()?.id;
    let body = CommentBody::new(request.comment.body).map_err(CommentError::from)?;

    state
        .comment_service
        .add_comment(&slug, author, body)
        .await
        .map_err(ApiError::from)
        .map(|view| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CommentResponseData {
                    comment: view.into(),
                },
            )
        })
}

/// `GET /api/articles/:slug/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<CommentsResponseData>, ApiError> {
    let views = state
        .comment_service
        .list_comments(&slug, identity.user_id())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CommentsResponseData {
            comments: views.into_iter().map(Into::into).collect(),
        },
    ))
}

/// `DELETE /api/articles/:slug/comments/:id`
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path((slug, id)): Path<(String, i64)>,
) -> Result<ApiSuccess<EmptyResponseData>, ApiError> {
    let requester = identity.require_user()?.id;

    state
        .comment_service
        .delete_comment(&slug, CommentId(id), requester)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, EmptyResponseData {}))
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub comment: AddCommentData,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentData {
    #[serde(default)]
    pub body: String,
}
