use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ArticleResponseData;
use super::EmptyResponseData;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::errors::FieldErrors;
use crate::domain::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;

const MIN_TITLE_LENGTH: usize = 4;
const MAX_TITLE_LENGTH: usize = 255;

/// `POST /api/articles`
pub async fn create_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let author = identity.require_user()?.id;
    let command = body.article.try_into_command()?;

    state
        .article_service
        .create_article(author, command)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::CREATED, view.into()))
}

/// `GET /api/articles/:slug`
pub async fn get_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    state
        .article_service
        .get_article(&slug, identity.user_id())
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// `PUT /api/articles/:slug`
pub async fn update_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
    Json(body): Json<UpdateArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let requester = identity.require_user()?.id;
    let command = body.article.try_into_command()?;

    state
        .article_service
        .update_article(&slug, requester, command)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// `DELETE /api/articles/:slug`
pub async fn delete_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<EmptyResponseData>, ApiError> {
    let requester = identity.require_user()?.id;

    state
        .article_service
        .delete_article(&slug, requester)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, EmptyResponseData {}))
}

/// `POST /api/articles/:slug/favorite`
pub async fn favorite_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let user = identity.require_user()?.id;

    state
        .article_service
        .favorite_article(&slug, user)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// `DELETE /api/articles/:slug/favorite`
pub async fn unfavorite_article(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let user = identity.require_user()?.id;

    state
        .article_service
        .unfavorite_article(&slug, user)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub article: CreateArticleData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleData {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

impl CreateArticleData {
    fn try_into_command(self) -> Result<CreateArticleCommand, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&self.title, &mut errors);
        if self.description.is_empty() {
            errors.add("description", "can't be blank");
        }
        if self.body.is_empty() {
            errors.add("body", "can't be blank");
        }
        errors.into_result()?;

        Ok(CreateArticleCommand {
            title: self.title,
            description: self.description,
            body: self.body,
            tag_list: self.tag_list,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub article: UpdateArticleData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
}

impl UpdateArticleData {
    fn try_into_command(self) -> Result<UpdateArticleCommand, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        errors.into_result()?;

        Ok(UpdateArticleCommand {
            title: self.title,
            description: self.description,
            body: self.body,
            tag_list: self.tag_list,
        })
    }
}

fn check_title(title: &str, errors: &mut FieldErrors) {
    if title.trim().chars().count() < MIN_TITLE_LENGTH {
        errors.add(
            "title",
            format!("is too short (minimum is {} characters)", MIN_TITLE_LENGTH),
        );
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        errors.add(
            "title",
            format!("is too long (maximum is {} characters)", MAX_TITLE_LENGTH),
        );
    }
}
