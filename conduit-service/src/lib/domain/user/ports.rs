use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first token.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserSession, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError>;

    /// Re-issue a session for an already authenticated user.
    ///
    /// # Errors
    /// * `Credential` - Token could not be minted
    fn session_for(&self, user: User) -> Result<UserSession, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<UserSession, UserError>;

    /// Profile of `username` as seen by `viewer`.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> Result<Profile, UserError>;

    /// Make `follower` follow `username`. Following twice is a no-op.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No user with this username
    /// * `CannotFollowSelf` - Follower and followee are the same user
    /// * `DatabaseError` - Database operation failed
    async fn follow(&self, username: &str, follower: UserId) -> Result<Profile, UserError>;

    /// Remove a follow relationship. Absent relationships are a no-op.
    ///
    /// # Errors
    /// * `ProfileNotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn unfollow(&self, username: &str, follower: UserId) -> Result<Profile, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its assigned identifier
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}

/// Persistence operations for the follower/followee join.
#[async_trait]
pub trait FollowRepository: Send + Sync + 'static {
    /// Insert the pair; an existing pair is left untouched.
    async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), UserError>;

    /// Delete the pair if present.
    async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), UserError>;

    async fn is_following(&self, follower: UserId, followee: UserId) -> Result<bool, UserError>;
}
