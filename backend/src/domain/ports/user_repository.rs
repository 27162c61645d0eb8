//! Port abstraction for user stores and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserRepositoryError {
        /// The store's shared state could not be accessed.
        Unavailable { message: String } => "user store unavailable: {message}",
    }
}

/// User persistence port.
///
/// Ids are assigned by the store from a counter starting at 1 and are never
/// reused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a validated user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, UserRepositoryError>;

    /// Replace every field except the id and CPF. Returns `None` when the id
    /// is unknown.
    async fn update(
        &self,
        id: u64,
        profile: UserProfile,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user. Returns `false` when the id is unknown.
    async fn delete(&self, id: u64) -> Result<bool, UserRepositoryError>;
}
