//! Drives the lifecycle core with in-memory fakes for the store, the
//! publisher, and the summarizer.

use introbot::model::{
    ExperienceLevel, IntroData, IntroSummary, ProfileRecord, RawIntroFields, NOT_PROVIDED,
};
use introbot::services::lifecycle::{
    run_confirm_delete, run_submit, DeleteOutcome, IntroError, ProfilePublisher, ProfileStore,
    Summarize,
};
use serenity::async_trait;
use serenity::model::id::{MessageId, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct MemStore {
    records: Mutex<HashMap<u64, ProfileRecord>>,
}

#[async_trait]
impl ProfileStore for MemStore {
    async fn get(&self, user_id: UserId) -> Result<Option<ProfileRecord>, IntroError> {
        Ok(self.records.lock().unwrap().get(&user_id.get()).cloned())
    }
    async fn put(&self, record: &ProfileRecord) -> Result<(), IntroError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.user_id.get(), record.clone());
        Ok(())
    }
    async fn delete(&self, user_id: UserId) -> Result<(), IntroError> {
        self.records.lock().unwrap().remove(&user_id.get());
        Ok(())
    }
}

struct FakePublisher {
    next_id: AtomicU64,
    existing: Mutex<HashSet<u64>>,
    fail_publish: bool,
}

impl FakePublisher {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            existing: Mutex::new(HashSet::new()),
            fail_publish: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_publish: true,
            ..Self::new()
        }
    }

    fn message_exists(&self, id: MessageId) -> bool {
        self.existing.lock().unwrap().contains(&id.get())
    }
}

#[async_trait]
impl ProfilePublisher for FakePublisher {
    async fn publish(&self, _record: &ProfileRecord) -> Result<MessageId, IntroError> {
        if self.fail_publish {
            return Err(IntroError::Discord(serenity::Error::Other("send failed")));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.existing.lock().unwrap().insert(id);
        Ok(MessageId::new(id))
    }
    async fn unpublish(&self, message_id: MessageId) -> Result<(), IntroError> {
        self.existing.lock().unwrap().remove(&message_id.get());
        Ok(())
    }
    async fn fetch(&self, message_id: MessageId) -> Result<bool, IntroError> {
        Ok(self.message_exists(message_id))
    }
}

struct FakeSummarizer {
    fail: bool,
}

#[async_trait]
impl Summarize for FakeSummarizer {
    async fn summarize(&self, intro: &IntroData) -> Result<IntroSummary, IntroError> {
        if self.fail {
            return Err(IntroError::Validation("forced failure".to_string()));
        }
        Ok(IntroSummary {
            summary: format!("{} works on {}.", intro.name, intro.interests),
            experience_level: ExperienceLevel::Advanced,
            skills: intro.interests.clone(),
        })
    }
}

fn intro(name: &str, interests: &str) -> IntroData {
    IntroData::from_raw(RawIntroFields {
        name: Some(name.to_string()),
        interests: Some(interests.to_string()),
        ..Default::default()
    })
    .expect("valid intro")
}

fn full_intro() -> IntroData {
    IntroData::from_raw(RawIntroFields {
        name: Some("Ana".to_string()),
        role: Some("Researcher".to_string()),
        institution: Some("MIT".to_string()),
        interests: Some("NLP, RL".to_string()),
        details: Some("Working on agents".to_string()),
    })
    .expect("valid intro")
}

const ANA: UserId = UserId::new(1001);

#[tokio::test]
async fn submit_persists_record_with_fetchable_message() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };

    let success = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana", "NLP, RL"))
        .await
        .expect("submit succeeds");

    let stored = store.get(ANA).await.unwrap().expect("record stored");
    assert_eq!(stored.intro.name, "Ana");
    assert_eq!(stored.intro.interests, "NLP, RL");
    assert_eq!(stored.intro.role, NOT_PROVIDED);
    assert_eq!(stored.message_id, Some(success.message_id));
    assert!(publisher.fetch(success.message_id).await.unwrap());
    assert!(!success.used_fallback);
}

#[tokio::test]
async fn update_replaces_instead_of_merging() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };

    let first = run_submit(&store, &summarizer, &publisher, ANA, full_intro())
        .await
        .unwrap();
    // Second submission sets only the mandatory fields.
    let second = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana B", "Vision"))
        .await
        .unwrap();

    let stored = store.get(ANA).await.unwrap().unwrap();
    assert_eq!(stored.intro.name, "Ana B");
    // Previously-set optional fields revert to defaults: full replace, no merge.
    assert_eq!(stored.intro.role, NOT_PROVIDED);
    assert_eq!(stored.message_id, Some(second.message_id));
    assert_ne!(first.message_id, second.message_id);
    // The superseded message was cleaned up, the new one is live.
    assert!(!publisher.message_exists(first.message_id));
    assert!(publisher.message_exists(second.message_id));
}

#[tokio::test]
async fn confirm_delete_is_idempotent() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };
    let success = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana", "NLP, RL"))
        .await
        .unwrap();

    let first = run_confirm_delete(&store, &publisher, ANA, ANA).await.unwrap();
    assert_eq!(first, DeleteOutcome::Deleted);
    assert!(store.get(ANA).await.unwrap().is_none());
    assert!(!publisher.message_exists(success.message_id));

    // Second confirmation finds nothing and still succeeds.
    let second = run_confirm_delete(&store, &publisher, ANA, ANA).await.unwrap();
    assert_eq!(second, DeleteOutcome::NotFound);
    assert!(store.get(ANA).await.unwrap().is_none());
}

#[test]
fn authorize_rejects_mismatched_actor_with_user_facing_message() {
    use introbot::services::lifecycle::authorize;

    assert!(authorize(ANA, ANA).is_ok());
    let err = authorize(UserId::new(2002), ANA).unwrap_err();
    assert!(matches!(err, IntroError::Unauthorized));
    // The Display text is what the rejection replies show verbatim.
    assert_eq!(err.to_string(), "You can only manage your own introduction.");
}

#[tokio::test]
async fn delete_by_non_owner_leaves_everything_untouched() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };
    let success = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana", "NLP, RL"))
        .await
        .unwrap();

    let intruder = UserId::new(2002);
    let result = run_confirm_delete(&store, &publisher, intruder, ANA).await;
    assert!(matches!(result, Err(IntroError::Unauthorized)));
    assert!(store.get(ANA).await.unwrap().is_some());
    assert!(publisher.message_exists(success.message_id));
}

#[tokio::test]
async fn summarizer_failure_falls_back_and_completes() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: true };

    let success = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana", "NLP, RL"))
        .await
        .expect("fallback keeps the flow alive");

    assert!(success.used_fallback);
    let stored = store.get(ANA).await.unwrap().unwrap();
    assert!(!stored.summary.is_empty());
    assert!(!stored.skills.is_empty());
    assert!(ExperienceLevel::ALL.contains(&stored.experience_level));
}

#[tokio::test]
async fn externally_deleted_old_message_does_not_block_update() {
    let store = MemStore::default();
    let publisher = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };

    // Stored record points at a message the channel no longer has.
    let mut record = ProfileRecord {
        user_id: ANA,
        message_id: Some(MessageId::new(999)),
        intro: full_intro(),
        summary: "old".to_string(),
        experience_level: ExperienceLevel::Beginner,
        skills: "old".to_string(),
    };
    store.put(&record).await.unwrap();

    let success = run_submit(&store, &summarizer, &publisher, ANA, intro("Ana", "NLP, RL"))
        .await
        .expect("cleanup no-ops on a missing message");
    assert!(publisher.message_exists(success.message_id));

    record = store.get(ANA).await.unwrap().unwrap();
    assert_eq!(record.message_id, Some(success.message_id));
}

#[tokio::test]
async fn publish_failure_preserves_prior_record_and_message() {
    let store = MemStore::default();
    let good = FakePublisher::new();
    let summarizer = FakeSummarizer { fail: false };
    let original = run_submit(&store, &summarizer, &good, ANA, full_intro())
        .await
        .unwrap();

    // Same channel state, but sends now fail.
    let failing = FakePublisher::failing();
    failing
        .existing
        .lock()
        .unwrap()
        .insert(original.message_id.get());

    let result = run_submit(&store, &summarizer, &failing, ANA, intro("Ana B", "Vision")).await;
    assert!(matches!(result, Err(IntroError::Discord(_))));

    // The prior record still points at the prior message, which still exists.
    let stored = store.get(ANA).await.unwrap().unwrap();
    assert_eq!(stored.message_id, Some(original.message_id));
    assert_eq!(stored.intro.name, "Ana");
    assert!(failing.message_exists(original.message_id));
}
