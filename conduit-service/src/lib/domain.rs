pub mod article;
pub mod comment;
pub mod errors;
pub mod favorite;
pub mod identity;
pub mod tag;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;
