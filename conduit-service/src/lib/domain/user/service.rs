use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;
use crate::domain::user::ports::FollowRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::profiles::ProfileLookup;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    users: Arc<UR>,
    follows: Arc<FL>,
    profiles: ProfileLookup<UR, FL>,
    authenticator: Arc<Authenticator>,
}

impl<UR, FL> UserService<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `follows` - Follow relationship persistence
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(users: Arc<UR>, follows: Arc<FL>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            profiles: ProfileLookup::new(Arc::clone(&users), Arc::clone(&follows)),
            users,
            follows,
            authenticator,
        }
    }

    fn issue_session(&self, user: User) -> Result<UserSession, UserError> {
        let token = self
            .authenticator
            .issue_token(user.id.0)
            .map_err(|e| UserError::Credential(e.to_string()))?;

        Ok(UserSession { user, token })
    }

    async fn profile_owner(&self, username: &str) -> Result<User, UserError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::ProfileNotFound(username.to_string()))
    }
}

/// Empty `bio`/`image` clears the stored value.
fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl<UR, FL> UserServicePort for UserService<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserSession, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| UserError::Credential(format!("Password hashing failed: {}", e)))?;

        let user = self
            .users
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        self.issue_session(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                other => UserError::Credential(other.to_string()),
            })?;

        Ok(UserSession {
            user,
            token: result.access_token,
        })
    }

    fn session_for(&self, user: User) -> Result<UserSession, UserError> {
        self.issue_session(user)
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<UserSession, UserError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(username) = command.username {
            user.username = username;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self
                .authenticator
                .hash_password(password.as_str())
                .map_err(|e| UserError::Credential(format!("Password hashing failed: {}", e)))?;
        }

        if let Some(bio) = command.bio {
            user.bio = optional_text(bio);
        }

        if let Some(image) = command.image {
            user.image = optional_text(image);
        }

        let updated = self.users.update(user).await?;
        self.issue_session(updated)
    }

    async fn get_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> Result<Profile, UserError> {
        let user = self.profile_owner(username).await?;
        self.profiles.view(&user, viewer).await
    }

    async fn follow(&self, username: &str, follower: UserId) -> Result<Profile, UserError> {
        let followee = self.profile_owner(username).await?;
        if followee.id == follower {
            return Err(UserError::CannotFollowSelf);
        }

        self.follows.follow(follower, followee.id).await?;
        tracing::debug!(%follower, followee = %followee.id, "follow recorded");

        Ok(Profile::of(&followee, true))
    }

    async fn unfollow(&self, username: &str, follower: UserId) -> Result<Profile, UserError> {
        let followee = self.profile_owner(username).await?;
        if followee.id != follower {
            self.follows.unfollow(follower, followee.id).await?;
        }

        Ok(Profile::of(&followee, false))
    }
}
