//! Key/value bot configuration (`bot_config` table), with the profile channel
//! accessor layered on top.

use serenity::model::id::ChannelId;
use sqlx::PgPool;
use std::env;

pub const PROFILE_CHANNEL_KEY: &str = "profile_channel_id";

pub async fn get_config_value(pool: &PgPool, key: &str) -> sqlx::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM bot_config WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(value,)| value))
}

pub async fn set_config_value(pool: &PgPool, key: &str, value: &str) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO bot_config (key, value) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// The publication target. Database value first, `PROFILE_CHANNEL_ID` env
/// fallback second; `None` when neither yields a usable id.
pub async fn profile_channel(pool: &PgPool) -> sqlx::Result<Option<ChannelId>> {
    let stored = get_config_value(pool, PROFILE_CHANNEL_KEY).await?;
    let raw = stored.or_else(|| env::var("PROFILE_CHANNEL_ID").ok());
    Ok(raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
        .map(ChannelId::new))
}
