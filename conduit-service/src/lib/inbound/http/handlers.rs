use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleView;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentView;
use crate::domain::errors::FieldErrors;
use crate::domain::identity::errors::IdentityError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UserSession;

pub mod articles;
pub mod comments;
pub mod profiles;
pub mod tags;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(FieldErrors),
    NotFound(FieldErrors),
    Forbidden(FieldErrors),
    Unauthorized(FieldErrors),
    PayloadTooLarge(FieldErrors),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FieldErrors::single("body", "internal server error"),
                )
            }
            ApiError::UnprocessableEntity(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors),
            ApiError::NotFound(errors) => (StatusCode::NOT_FOUND, errors),
            ApiError::Forbidden(errors) => (StatusCode::FORBIDDEN, errors),
            ApiError::Unauthorized(errors) => (StatusCode::UNAUTHORIZED, errors),
            ApiError::PayloadTooLarge(errors) => (StatusCode::PAYLOAD_TOO_LARGE, errors),
        };

        (status, Json(ErrorBody { errors })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(e) => invalid("username", e),
            UserError::InvalidEmail(e) => invalid("email", e),
            UserError::InvalidPassword(e) => invalid("password", e),
            UserError::NotFound(_) => ApiError::NotFound(FieldErrors::single("user", "not found")),
            UserError::ProfileNotFound(_) => {
                ApiError::NotFound(FieldErrors::single("profile", "not found"))
            }
            UserError::UsernameAlreadyExists(_) => invalid("username", "has already been taken"),
            UserError::EmailAlreadyExists(_) => invalid("email", "has already been taken"),
            UserError::InvalidCredentials => invalid("email or password", "is invalid"),
            UserError::CannotFollowSelf => invalid("profile", "cannot follow yourself"),
            UserError::Credential(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::Validation(errors) => ApiError::UnprocessableEntity(errors),
            ArticleError::NotFound(_) => {
                ApiError::NotFound(FieldErrors::single("article", "not found"))
            }
            ArticleError::Forbidden => {
                ApiError::Forbidden(FieldErrors::single("article", "forbidden"))
            }
            ArticleError::SlugTaken => invalid("slug", "has already been taken"),
            ArticleError::DuplicateFavorite => invalid("article", "is already favorited"),
            ArticleError::User(e) => e.into(),
            ArticleError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::InvalidBody(e) => invalid("body", e),
            CommentError::ArticleNotFound(_) => {
                ApiError::NotFound(FieldErrors::single("article", "not found"))
            }
            CommentError::NotFound(_) => {
                ApiError::NotFound(FieldErrors::single("comment", "not found"))
            }
            CommentError::Forbidden => {
                ApiError::Forbidden(FieldErrors::single("comment", "forbidden"))
            }
            CommentError::User(e) => e.into(),
            CommentError::Article(e) => e.into(),
            CommentError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Anonymous => {
                ApiError::Unauthorized(FieldErrors::single("token", "is missing or invalid"))
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::UnprocessableEntity(errors)
    }
}

fn invalid(field: &str, message: impl ToString) -> ApiError {
    ApiError::UnprocessableEntity(FieldErrors::single(field, message.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub errors: FieldErrors,
}

/// Body for `DELETE` endpoints: `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyResponseData {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl From<UserSession> for UserResponseData {
    fn from(session: UserSession) -> Self {
        let user = session.user;
        Self {
            user: UserData {
                email: user.email.as_str().to_string(),
                token: session.token,
                username: user.username.as_str().to_string(),
                bio: user.bio,
                image: user.image,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub profile: ProfileData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

impl From<Profile> for ProfileData {
    fn from(profile: Profile) -> Self {
        Self {
            username: profile.username.as_str().to_string(),
            bio: profile.bio,
            image: profile.image,
            following: profile.following,
        }
    }
}

impl From<Profile> for ProfileResponseData {
    fn from(profile: Profile) -> Self {
        Self {
            profile: profile.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResponseData {
    pub article: ArticleData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleData {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub favorited: bool,
    pub favorites_count: u64,
    pub author: ProfileData,
}

impl From<ArticleView> for ArticleResponseData {
    fn from(view: ArticleView) -> Self {
        let article = view.article;
        Self {
            article: ArticleData {
                slug: article.slug.as_str().to_string(),
                title: article.title,
                description: article.description,
                body: article.body,
                tag_list: article.tag_list,
                created_at: article.created_at,
                updated_at: article.updated_at,
                favorited: view.favorited,
                favorites_count: view.favorites_count,
                author: view.author.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponseData {
    pub comment: CommentData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentsResponseData {
    pub comments: Vec<CommentData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub author: ProfileData,
}

impl From<CommentView> for CommentData {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.comment.id.0,
            created_at: view.comment.created_at,
            updated_at: view.comment.updated_at,
            body: view.comment.body,
            author: view.author.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsResponseData {
    pub tags: Vec<String>,
}
