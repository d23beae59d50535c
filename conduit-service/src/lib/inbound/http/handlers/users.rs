use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::domain::errors::FieldErrors;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

/// `POST /api/users`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let command = body.user.try_into_command()?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// `POST /api/users/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let LoginUserData { email, password } = body.user;

    state
        .user_service
        .login(LoginCommand { email, password })
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// `GET /api/user`
pub async fn current_user(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user = identity.into_user().ok_or(IdentityError::Anonymous)?;

    state
        .user_service
        .session_for(user)
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// `PUT /api/user`
pub async fn update_user(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = identity.require_user()?.id;
    let command = body.user.try_into_command()?;

    state
        .user_service
        .update_user(user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub user: RegisterUserData,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserData {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterUserData {
    /// Validate every field, reporting all failures at once.
    fn try_into_command(self) -> Result<RegisterUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = Username::new(self.username)
            .map_err(|e| errors.add("username", e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.add("email", e.to_string()))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.add("password", e.to_string()))
            .ok();

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) if errors.is_empty() => {
                Ok(RegisterUserCommand::new(username, email, password))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user: LoginUserData,
}

#[derive(Debug, Deserialize)]
pub struct LoginUserData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UpdateUserData,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserData {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl UpdateUserData {
    fn try_into_command(self) -> Result<UpdateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = self
            .username
            .map(Username::new)
            .transpose()
            .unwrap_or_else(|e| {
                errors.add("username", e.to_string());
                None
            });
        let email = self
            .email
            .map(EmailAddress::new)
            .transpose()
            .unwrap_or_else(|e| {
                errors.add("email", e.to_string());
                None
            });
        let password = self
            .password
            .map(Password::new)
            .transpose()
            .unwrap_or_else(|e| {
                errors.add("password", e.to_string());
                None
            });

        errors.into_result()?;

        Ok(UpdateUserCommand {
            username,
            email,
            password,
            bio: self.bio,
            image: self.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_collects_every_field_error() {
        let data = RegisterUserData {
            username: "ab".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
        };

        let errors = data.try_into_command().unwrap_err();
        assert!(errors.get("username").is_some());
        assert_eq!(errors.get("email"), Some(&["is invalid".to_string()][..]));
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_register_valid() {
        let data = RegisterUserData {
            username: "jacob".to_string(),
            email: "jake@jake.jake".to_string(),
            password: "jakejake".to_string(),
        };

        assert!(data.try_into_command().is_ok());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        let data = UpdateUserData {
            bio: Some("I like to skateboard".to_string()),
            ..Default::default()
        };
        let command = data.try_into_command().unwrap();
        assert!(command.username.is_none());
        assert_eq!(command.bio.as_deref(), Some("I like to skateboard"));

        let data = UpdateUserData {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(data.try_into_command().unwrap_err().get("email").is_some());
    }
}
