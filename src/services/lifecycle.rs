//! Orchestration core for the introduction lifecycle: submit (create or
//! update) and confirmed delete. The workflow is written against the three
//! trait seams below so integration tests can drive it with in-memory fakes
//! while the real handlers plug in Postgres, Discord, and the AI service.

use crate::model::{IntroData, IntroSummary, ProfileRecord};
use crate::services::summarizer::fallback_summary;
use serenity::async_trait;
use serenity::model::id::{MessageId, UserId};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Upper bound on the summarization call. Everything else inherits the
/// timeout of the external collaborator.
pub const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(20);

/// Failure taxonomy for the lifecycle. Validation, config, access and publish
/// failures reach the user; cleanup and summarization failures are absorbed
/// at their call sites.
#[derive(Debug, Error)]
pub enum IntroError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Access(String),
    #[error("You can only manage your own introduction.")]
    Unauthorized,
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Durable per-user profile storage. Full-record replace only; there is no
/// partial update operation.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<ProfileRecord>, IntroError>;
    async fn put(&self, record: &ProfileRecord) -> Result<(), IntroError>;
    /// Idempotent: deleting an absent record succeeds.
    async fn delete(&self, user_id: UserId) -> Result<(), IntroError>;
}

/// Turns a validated introduction into a summary/classification/skills triple.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, intro: &IntroData) -> Result<IntroSummary, IntroError>;
}

/// Message operations against the already-resolved target channel.
#[async_trait]
pub trait ProfilePublisher: Send + Sync {
    /// Render and send the profile message; returns the new message id.
    async fn publish(&self, record: &ProfileRecord) -> Result<MessageId, IntroError>;
    /// Delete a published message. Absence counts as success.
    async fn unpublish(&self, message_id: MessageId) -> Result<(), IntroError>;
    /// Whether the message still exists in the channel.
    async fn fetch(&self, message_id: MessageId) -> Result<bool, IntroError>;
}

/// Outcome of a successful submit, for the user-facing success notice.
#[derive(Debug)]
pub struct SubmitSuccess {
    pub record: ProfileRecord,
    pub message_id: MessageId,
    /// True when the local fallback stood in for the AI service.
    pub used_fallback: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing to delete. Reported as such, not as an error.
    NotFound,
}

/// Every update/delete entry point checks the acting user against the owner
/// encoded in the component id. Mismatch rejects with no side effects.
pub fn authorize(actor: UserId, owner: UserId) -> Result<(), IntroError> {
    if actor == owner {
        Ok(())
    } else {
        Err(IntroError::Unauthorized)
    }
}

/// Core submit flow, after validation and channel resolution have succeeded
/// and the interaction has been acknowledged:
///
/// 1. summarize with a bounded attempt, substituting the deterministic
///    fallback on timeout, error, or malformed output;
/// 2. publish the new message — terminal on failure, leaving the previous
///    record and message untouched;
/// 3. best-effort removal of the previously published message (a message the
///    channel no longer has counts as already gone);
/// 4. persist the full record, replacing any prior one.
///
/// The new message is sent before the old one is removed, so an interruption
/// between the two leaves at most a duplicate visible message, never zero.
pub async fn run_submit<S, A, P>(
    store: &S,
    summarizer: &A,
    publisher: &P,
    user_id: UserId,
    intro: IntroData,
) -> Result<SubmitSuccess, IntroError>
where
    S: ProfileStore,
    A: Summarize,
    P: ProfilePublisher,
{
    let previous = store.get(user_id).await?;

    let (summary, used_fallback) =
        match tokio::time::timeout(SUMMARIZE_TIMEOUT, summarizer.summarize(&intro)).await {
            Ok(Ok(summary)) => (summary, false),
            Ok(Err(e)) => {
                warn!(target: "intro.summarize", user_id = user_id.get(), error = %e, "summarization failed, using fallback");
                (fallback_summary(&intro), true)
            }
            Err(_) => {
                warn!(target: "intro.summarize", user_id = user_id.get(), "summarization timed out, using fallback");
                (fallback_summary(&intro), true)
            }
        };

    let mut record = ProfileRecord {
        user_id,
        message_id: None,
        intro,
        summary: summary.summary,
        experience_level: summary.experience_level,
        skills: summary.skills,
    };

    let message_id = publisher.publish(&record).await?;
    record.message_id = Some(message_id);

    if let Some(old_id) = previous.as_ref().and_then(|p| p.message_id) {
        cleanup_old_message(publisher, user_id, old_id).await;
    }

    store.put(&record).await?;

    Ok(SubmitSuccess {
        record,
        message_id,
        used_fallback,
    })
}

/// Remove the superseded message. Any failure here is logged and swallowed;
/// an externally deleted message is simply already absent.
async fn cleanup_old_message<P: ProfilePublisher>(publisher: &P, user_id: UserId, old_id: MessageId) {
    match publisher.fetch(old_id).await {
        Ok(false) => {
            warn!(target: "intro.cleanup", user_id = user_id.get(), message_id = old_id.get(), "old profile message already gone");
        }
        Ok(true) => {
            if let Err(e) = publisher.unpublish(old_id).await {
                warn!(target: "intro.cleanup", user_id = user_id.get(), message_id = old_id.get(), error = %e, "could not delete old profile message");
            }
        }
        Err(e) => {
            warn!(target: "intro.cleanup", user_id = user_id.get(), message_id = old_id.get(), error = %e, "could not look up old profile message");
        }
    }
}

/// Confirmed deletion: best-effort removal of the published message, then an
/// unconditional store delete. Running it again with no record present is a
/// no-op reported as [`DeleteOutcome::NotFound`].
pub async fn run_confirm_delete<S, P>(
    store: &S,
    publisher: &P,
    actor: UserId,
    owner: UserId,
) -> Result<DeleteOutcome, IntroError>
where
    S: ProfileStore,
    P: ProfilePublisher,
{
    authorize(actor, owner)?;

    let Some(record) = store.get(owner).await? else {
        return Ok(DeleteOutcome::NotFound);
    };

    if let Some(message_id) = record.message_id {
        if let Err(e) = publisher.unpublish(message_id).await {
            warn!(target: "intro.delete", user_id = owner.get(), message_id = message_id.get(), error = %e, "could not delete profile message");
        }
    }

    store.delete(owner).await?;
    Ok(DeleteOutcome::Deleted)
}
