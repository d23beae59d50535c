use std::sync::Arc;

use crate::domain::identity::models::IdentityContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Turns a verified token subject into a request identity.
pub struct IdentityResolver<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
}

impl<UR> IdentityResolver<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    /// Resolve `subject` to an identity.
    ///
    /// `None` and the unassigned id `0` resolve to `Anonymous` without a
    /// lookup. A subject whose user no longer exists is also `Anonymous`.
    ///
    /// # Errors
    /// * `DatabaseError` - The user lookup failed
    pub async fn resolve(&self, subject: Option<UserId>) -> Result<IdentityContext, UserError> {
        let Some(id) = subject.filter(UserId::is_assigned) else {
            return Ok(IdentityContext::Anonymous);
        };

        match self.users.find_by_id(id).await? {
            Some(user) => Ok(IdentityContext::Authenticated(user)),
            None => {
                tracing::debug!(user_id = %id, "token subject no longer exists");
                Ok(IdentityContext::Anonymous)
            }
        }
    }
}
