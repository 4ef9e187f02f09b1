//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and stamps its audit columns in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a duplicate email,
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Looks up a user by email, including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Returns true if the email is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
}
