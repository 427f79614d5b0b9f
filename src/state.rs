//! Shared application state for all routes.

use crate::config::Environment;
use crate::repository::UserRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, environment: Environment) -> Self {
        Self { users, environment }
    }
}
