use std::sync::Arc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::FollowRepository;
use crate::domain::user::ports::UserRepository;

/// Builds viewer-relative profiles for users referenced by other aggregates.
pub struct ProfileLookup<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    users: Arc<UR>,
    follows: Arc<FL>,
}

impl<UR, FL> Clone for ProfileLookup<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            follows: Arc::clone(&self.follows),
        }
    }
}

impl<UR, FL> ProfileLookup<UR, FL>
where
    UR: UserRepository,
    FL: FollowRepository,
{
    pub fn new(users: Arc<UR>, follows: Arc<FL>) -> Self {
        Self { users, follows }
    }

    /// Profile of the user with `id` as seen by `viewer`.
    ///
    /// # Errors
    /// * `NotFound` - No user with this identifier
    /// * `DatabaseError` - Database operation failed
    pub async fn profile_of(
        &self,
        id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Profile, UserError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        self.view(&user, viewer).await
    }

    /// Profile of an already loaded user as seen by `viewer`.
    pub async fn view(&self, user: &User, viewer: Option<UserId>) -> Result<Profile, UserError> {
        let following = self.is_following(viewer, user.id).await?;
        Ok(Profile::of(user, following))
    }

    /// Anonymous viewers and users looking at themselves never follow.
    pub async fn is_following(
        &self,
        viewer: Option<UserId>,
        followee: UserId,
    ) -> Result<bool, UserError> {
        match viewer {
            Some(viewer) if viewer.is_assigned() && viewer != followee => {
                self.follows.is_following(viewer, followee).await
            }
            _ => Ok(false),
        }
    }
}
