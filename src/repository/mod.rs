//! Store access for users. Handlers only see the trait; the concrete store is
//! chosen at startup and injected through `AppState`.

#[cfg(any(test, feature = "test-util"))]
mod memory;
mod postgres;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

use crate::error::AppError;
use crate::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Message used when a write collides with another user's email.
pub const DUPLICATE_EMAIL: &str = "email already exists";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in storage order.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Insert a new record. Fails with `AppError::Validation` on duplicate email.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// Persist a mutated record. `None` when the id no longer exists.
    async fn save(&self, user: &User) -> Result<Option<User>, AppError>;

    /// Remove by id. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
