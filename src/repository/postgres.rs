//! PostgreSQL-backed user store.

use super::{UserRepository, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::model::User;
use crate::store::USERS_TABLE;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

const COLUMNS: &str = "id, name, email, password, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY created_at, id", COLUMNS, USERS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, USERS_TABLE);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USERS_TABLE, COLUMNS, COLUMNS
        );
        tracing::debug!(sql = %sql, id = %user.id, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn save(&self, user: &User) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, email = $3, password = $4, updated_at = $5 WHERE id = $1 RETURNING {}",
            USERS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = %user.id, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", USERS_TABLE);
        tracing::debug!(sql = %sql, %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Constraint violations are caller errors; anything else stays a store failure.
fn map_write_error(e: sqlx::Error) -> AppError {
    let code = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.into_owned());
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => AppError::Validation(DUPLICATE_EMAIL.into()),
        Some(CHECK_VIOLATION) => AppError::Validation(
            e.as_database_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| "constraint violation".into()),
        ),
        _ => AppError::Db(e),
    }
}
