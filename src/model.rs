//! This module defines the shared data structures used throughout the application.
//! `AppState` is stored as a `TypeMapKey` in Serenity's global context; the
//! profile types are the single in-memory representation of a member's
//! introduction.

use crate::services::summarizer::SummarizerClient;
use serenity::model::id::{MessageId, UserId};
use serenity::prelude::TypeMapKey;
use sqlx::PgPool;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sentinel stored for optional fields the member left blank.
pub const NOT_PROVIDED: &str = "Not provided";
/// Sentinel for a blank institution field (kept distinct so the embed can omit it).
pub const NOT_SPECIFIED: &str = "Not specified";

/// Raw text-input values as they arrive from the modal, before any validation.
/// All fields are optional at the transport level.
#[derive(Debug, Default, Clone)]
pub struct RawIntroFields {
    pub name: Option<String>,
    pub role: Option<String>,
    pub institution: Option<String>,
    pub interests: Option<String>,
    pub details: Option<String>,
}

/// A validated, normalized introduction. Only constructed through
/// [`IntroData::from_raw`], so every instance satisfies the field invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroData {
    pub name: String,
    pub role: String,
    pub institution: String,
    pub interests: String,
    pub details: String,
}

impl IntroData {
    /// Validate and normalize raw modal input. Trims every field, applies the
    /// sentinel defaults for the optional ones, and rejects a missing/short
    /// `name` or `interests` with a user-facing message. An update always goes
    /// through here, so the whole struct is replaced atomically; there is no
    /// partial-field merge.
    pub fn from_raw(raw: RawIntroFields) -> Result<Self, String> {
        let name = trimmed(raw.name);
        let interests = trimmed(raw.interests);

        let Some(name) = name.filter(|n| n.chars().count() >= 2) else {
            return Err("Please provide your name in the form (at least 2 characters).".to_string());
        };
        let Some(interests) = interests.filter(|i| i.chars().count() >= 3) else {
            return Err(
                "Please provide your interests in AI fields or tools (at least 3 characters)."
                    .to_string(),
            );
        };

        Ok(Self {
            name,
            role: trimmed(raw.role).unwrap_or_else(|| NOT_PROVIDED.to_string()),
            institution: trimmed(raw.institution).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            interests,
            details: trimmed(raw.details).unwrap_or_else(|| NOT_PROVIDED.to_string()),
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The fixed set of experience classifications a profile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Expert,
    ];

    /// Case-insensitive parse. Unknown labels yield `None`; callers fall back
    /// to the neutral default so a record always holds a member of the set.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the summarization step, whether from the AI service or the
/// deterministic local fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroSummary {
    pub summary: String,
    pub experience_level: ExperienceLevel,
    pub skills: String,
}

/// The persistent record behind one published introduction. At most one per
/// user; the store is the single source of truth for `message_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_id: UserId,
    /// Id of the currently published channel message, if any. Only written
    /// after a send succeeds.
    pub message_id: Option<MessageId>,
    pub intro: IntroData,
    pub summary: String,
    pub experience_level: ExperienceLevel,
    pub skills: String,
}

/// The central, shared state of the application.
/// An `Arc<AppState>` is stored in the global context for easy and safe access
/// from any command or event handler.
pub struct AppState {
    /// The connection pool for the PostgreSQL database.
    pub db: PgPool,
    /// Client for the summarization service (carries its own reqwest pool).
    pub summarizer: SummarizerClient,
    /// User ids with a submit/delete currently in flight. Guards against a
    /// double-submit racing itself into two published messages.
    inflight: Mutex<HashSet<u64>>,
}

impl AppState {
    pub fn new(db: PgPool, summarizer: SummarizerClient) -> Self {
        Self {
            db,
            summarizer,
            inflight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// Claim the single-flight slot for a user. Returns `false` if a previous
    /// submission for the same user is still running.
    pub async fn try_claim(&self, user_id: UserId) -> bool {
        self.inflight.lock().await.insert(user_id.get())
    }

    pub async fn release(&self, user_id: UserId) {
        self.inflight.lock().await.remove(&user_id.get());
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
