//! Database bootstrap: create the target database if missing, then the `users` table.

use crate::error::AppError;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub const USERS_TABLE: &str = "users";

const MAINTENANCE_DATABASE: &str = "postgres";

/// Create the `users` table and its unique email index if they do not exist.
/// The CHECK constraints mirror the request validation rules.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(btrim(name)) > 0),
            email TEXT NOT NULL CHECK (email = lower(email)),
            password TEXT NOT NULL CHECK (char_length(password) >= 6),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        USERS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    let index = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {}_email_key ON {} (email)",
        USERS_TABLE, USERS_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    tracing::info!(table = USERS_TABLE, "schema ready");
    Ok(())
}

/// Create the database named in `database_url` when it does not exist yet,
/// going through the `postgres` maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((maintenance, db_name)) = maintenance_target(database_url)? else {
        return Ok(());
    };
    let mut conn = maintenance.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options pointing at `postgres` plus the database to create. `None` when the
/// URL names no database or names the maintenance database itself.
fn maintenance_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let target = PgConnectOptions::from_str(database_url)?;
    match target.get_database().map(str::to_owned) {
        Some(name) if !name.is_empty() && name != MAINTENANCE_DATABASE => {
            Ok(Some((target.database(MAINTENANCE_DATABASE), name)))
        }
        _ => Ok(None),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_maintenance_database_on_same_server() {
        let (maintenance, name) = maintenance_target("postgres://u:p@db.internal:6543/user_api?sslmode=disable")
            .unwrap()
            .unwrap();
        assert_eq!(name, "user_api");
        assert_eq!(maintenance.get_database(), Some("postgres"));
        assert_eq!(maintenance.get_host(), "db.internal");
        assert_eq!(maintenance.get_port(), 6543);
    }

    #[test]
    fn skips_maintenance_database_itself() {
        assert!(maintenance_target("postgres://localhost/postgres").unwrap().is_none());
    }

    #[test]
    fn rejects_unparsable_url() {
        assert!(matches!(maintenance_target("not a url"), Err(AppError::Db(_))));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
