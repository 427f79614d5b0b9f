//! In-process user store with the same uniqueness contract as PostgreSQL.
//! Only built for tests and the `test-util` feature.

use super::{UserRepository, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::model::User;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    // Vec keeps insertion order for find_all.
    users: Arc<RwLock<Vec<User>>>,
    unavailable: Arc<RwLock<bool>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    async fn check_available(&self) -> Result<(), AppError> {
        if *self.unavailable.read().await {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.check_available().await?;
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.check_available().await?;
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        self.check_available().await?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Validation(DUPLICATE_EMAIL.into()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<Option<User>, AppError> {
        self.check_available().await?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(AppError::Validation(DUPLICATE_EMAIL.into()));
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.check_available().await?;
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewUser;
    use chrono::Utc;

    fn user(email: &str) -> User {
        NewUser {
            name: "Ann".into(),
            email: email.into(),
            password: "secret1".into(),
        }
        .into_user(Utc::now())
    }

    #[tokio::test]
    async fn rejects_duplicate_email_on_insert_and_save() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@b.com")).await.unwrap();
        let mut second = repo.insert(user("c@d.com")).await.unwrap();

        assert!(matches!(repo.insert(user("a@b.com")).await, Err(AppError::Validation(_))));

        second.email = "a@b.com".into();
        assert!(matches!(repo.save(&second).await, Err(AppError::Validation(_))));
        let stored = repo.find_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "c@d.com");
    }

    #[tokio::test]
    async fn keeps_insertion_order_and_deletes() {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(user("1@x.com")).await.unwrap();
        let second = repo.insert(user("2@x.com")).await.unwrap();
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![first.id, second.id]);

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
        assert!(repo.save(&first).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let repo = InMemoryUserRepository::new();
        repo.set_unavailable(true).await;
        assert!(matches!(repo.find_all().await, Err(AppError::Db(_))));
    }
}
