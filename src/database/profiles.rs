//! This module contains all functions for interacting with the
//! `intro_profiles` table. It is the single source of truth for a member's
//! stored introduction, including the id of the currently published message.
//! Writes always replace the whole row; there is no partial-field update.

use crate::model::{ExperienceLevel, IntroData, ProfileRecord};
use crate::services::lifecycle::{IntroError, ProfileStore};
use serenity::async_trait;
use serenity::model::id::{MessageId, UserId};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: i64,
    message_id: Option<i64>,
    name: String,
    role: String,
    institution: String,
    interests: String,
    details: String,
    summary: String,
    experience_level: String,
    skills: String,
}

impl From<ProfileRow> for ProfileRecord {
    fn from(row: ProfileRow) -> Self {
        ProfileRecord {
            user_id: UserId::new(row.user_id as u64),
            message_id: row
                .message_id
                .and_then(|id| u64::try_from(id).ok())
                .filter(|id| *id != 0)
                .map(MessageId::new),
            intro: IntroData {
                name: row.name,
                role: row.role,
                institution: row.institution,
                interests: row.interests,
                details: row.details,
            },
            summary: row.summary,
            // A label this build no longer knows collapses to the neutral default.
            experience_level: ExperienceLevel::parse(&row.experience_level).unwrap_or_default(),
            skills: row.skills,
        }
    }
}

pub async fn get_profile(pool: &PgPool, user_id: UserId) -> sqlx::Result<Option<ProfileRecord>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT user_id, message_id, name, role, institution, interests, details,
               summary, experience_level, skills
        FROM intro_profiles WHERE user_id = $1
        "#,
    )
    .bind(user_id.get() as i64)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(ProfileRecord::from))
}

/// Insert or fully replace the stored record for `record.user_id`.
pub async fn save_profile(pool: &PgPool, record: &ProfileRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO intro_profiles
            (user_id, message_id, name, role, institution, interests, details,
             summary, experience_level, skills, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
        ON CONFLICT (user_id) DO UPDATE SET
            message_id = EXCLUDED.message_id,
            name = EXCLUDED.name,
            role = EXCLUDED.role,
            institution = EXCLUDED.institution,
            interests = EXCLUDED.interests,
            details = EXCLUDED.details,
            summary = EXCLUDED.summary,
            experience_level = EXCLUDED.experience_level,
            skills = EXCLUDED.skills,
            updated_at = now()
        "#,
    )
    .bind(record.user_id.get() as i64)
    .bind(record.message_id.map(|id| id.get() as i64))
    .bind(&record.intro.name)
    .bind(&record.intro.role)
    .bind(&record.intro.institution)
    .bind(&record.intro.interests)
    .bind(&record.intro.details)
    .bind(&record.summary)
    .bind(record.experience_level.label())
    .bind(&record.skills)
    .execute(pool)
    .await?;
    Ok(())
}

/// Idempotent: deleting a user without a row is a successful no-op.
pub async fn delete_profile(pool: &PgPool, user_id: UserId) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM intro_profiles WHERE user_id = $1")
        .bind(user_id.get() as i64)
        .execute(pool)
        .await?;
    Ok(())
}

#[async_trait]
impl ProfileStore for PgPool {
    async fn get(&self, user_id: UserId) -> Result<Option<ProfileRecord>, IntroError> {
        Ok(get_profile(self, user_id).await?)
    }

    async fn put(&self, record: &ProfileRecord) -> Result<(), IntroError> {
        Ok(save_profile(self, record).await?)
    }

    async fn delete(&self, user_id: UserId) -> Result<(), IntroError> {
        Ok(delete_profile(self, user_id).await?)
    }
}
