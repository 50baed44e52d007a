//! Connection pool type alias and startup schema setup.

use sqlx::{Pool, Postgres};

/// A type alias for the database connection pool (`Pool<Postgres>`).
/// This is used throughout the application to provide a consistent, clear name
/// for the shared database connection state.
pub type DbPool = Pool<Postgres>;

/// Create the tables the bot needs if they do not exist yet. Idempotent, run
/// once at startup.
pub async fn run_migrations(pool: &DbPool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS intro_profiles (
            user_id          BIGINT PRIMARY KEY,
            message_id       BIGINT,
            name             TEXT NOT NULL,
            role             TEXT NOT NULL,
            institution      TEXT NOT NULL,
            interests        TEXT NOT NULL,
            details          TEXT NOT NULL,
            summary          TEXT NOT NULL,
            experience_level TEXT NOT NULL,
            skills           TEXT NOT NULL,
            updated_at       TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bot_config (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
