use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TagsResponseData;
use crate::inbound::http::router::AppState;

/// `GET /api/tags`
pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<ApiSuccess<TagsResponseData>, ApiError> {
    let tags = state.article_service.list_tags().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TagsResponseData {
            tags: tags.into_iter().map(|tag| tag.name).collect(),
        },
    ))
}
