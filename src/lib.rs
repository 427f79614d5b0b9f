//! User API: CRUD endpoints for a single `User` resource over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError};
pub use model::{CreateUserRequest, NewUser, User, UserPatch};
pub use repository::{PgUserRepository, UserRepository};
#[cfg(any(test, feature = "test-util"))]
pub use repository::InMemoryUserRepository;
pub use routes::{app, user_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema};
