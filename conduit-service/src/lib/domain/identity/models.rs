use crate::domain::identity::errors::IdentityError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Who is making the current request.
///
/// Stored in request extensions by the auth gate. Every request starts
/// out `Anonymous`; the gate upgrades it only after a token verified and
/// its subject still exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum IdentityContext {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl IdentityContext {
    pub fn user(&self) -> Option<&User> {
        match self {
            IdentityContext::Anonymous => None,
            IdentityContext::Authenticated(user) => Some(user),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|user| user.id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, IdentityContext::Authenticated(_))
    }

    /// The authenticated user, or `IdentityError::Anonymous`.
    pub fn require_user(&self) -> Result<&User, IdentityError> {
        self.user().ok_or(IdentityError::Anonymous)
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            IdentityContext::Anonymous => None,
            IdentityContext::Authenticated(user) => Some(user),
        }
    }
}
