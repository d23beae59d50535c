use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The operation needs an authenticated user.
    #[error("authentication required")]
    Anonymous,
}
