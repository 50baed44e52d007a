//! Summarization adapter: asks a chat-completion endpoint to turn the raw
//! introduction into a short biography, an experience classification, and a
//! skill list. Every failure mode (unconfigured key, HTTP error, malformed
//! reply, unknown label) surfaces as an error to the lifecycle core, which
//! substitutes [`fallback_summary`] and carries on.

use crate::model::{ExperienceLevel, IntroData, IntroSummary, NOT_PROVIDED, NOT_SPECIFIED};
use crate::services::lifecycle::{IntroError, Summarize};
use serde::{Deserialize, Serialize};
use serenity::async_trait;
use std::env;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the summarization service. Cheap to clone; the inner reqwest
/// client pools its connections.
#[derive(Clone)]
pub struct SummarizerClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl SummarizerClient {
    /// Reads `OPENAI_API_KEY` and `INTRO_SUMMARY_MODEL`. A missing key is not
    /// fatal: the bot runs with the local fallback only.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("INTRO_SUMMARY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: String,
}

/// The JSON object the model is instructed to reply with.
#[derive(Deserialize)]
struct SummaryPayload {
    summary: String,
    experience_level: String,
    skills: String,
}

fn prompt_for(intro: &IntroData) -> String {
    format!(
        "Summarize this community member introduction. Reply with only a JSON \
         object of the shape {{\"summary\": string, \"experience_level\": one of \
         [\"Beginner\", \"Intermediate\", \"Advanced\", \"Expert\"], \"skills\": string}}. \
         The summary is 2-3 friendly third-person sentences.\n\
         Name: {}\nRole: {}\nInstitution: {}\nInterests: {}\nDetails: {}",
        intro.name, intro.role, intro.institution, intro.interests, intro.details
    )
}

fn parse_reply(content: &str) -> Result<IntroSummary, IntroError> {
    // Models occasionally wrap the object in a code fence; strip it.
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    let payload: SummaryPayload = serde_json::from_str(trimmed)
        .map_err(|e| IntroError::Validation(format!("malformed summarizer reply: {e}")))?;

    let level = ExperienceLevel::parse(&payload.experience_level).ok_or_else(|| {
        IntroError::Validation(format!(
            "unknown experience level `{}`",
            payload.experience_level
        ))
    })?;
    if payload.summary.trim().is_empty() || payload.skills.trim().is_empty() {
        return Err(IntroError::Validation(
            "summarizer reply missing summary or skills".to_string(),
        ));
    }

    Ok(IntroSummary {
        summary: payload.summary.trim().to_string(),
        experience_level: level,
        skills: payload.skills.trim().to_string(),
    })
}

#[async_trait]
impl Summarize for SummarizerClient {
    async fn summarize(&self, intro: &IntroData) -> Result<IntroSummary, IntroError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(IntroError::Config(
                "summarizer not configured (OPENAI_API_KEY unset)".to_string(),
            ));
        };

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt_for(intro),
            }],
            temperature: 0.4,
        };

        let response: ChatResponse = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IntroError::Access(format!("summarizer request failed: {e}")))?
            .error_for_status()
            .map_err(|e| IntroError::Access(format!("summarizer returned error: {e}")))?
            .json()
            .await
            .map_err(|e| IntroError::Access(format!("summarizer reply unreadable: {e}")))?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| IntroError::Validation("summarizer reply had no choices".to_string()))?;

        parse_reply(content)
    }
}

/// Deterministic local stand-in for the AI service. Same struct shape, always
/// succeeds, and classifies from role/details keywords so repeated runs on
/// the same input agree.
pub fn fallback_summary(intro: &IntroData) -> IntroSummary {
    let mut summary = format!("{} has joined the community", intro.name);
    if intro.role != NOT_PROVIDED {
        summary.push_str(&format!(" as {}", intro.role));
    }
    if intro.institution != NOT_SPECIFIED {
        summary.push_str(&format!(" at {}", intro.institution));
    }
    summary.push_str(&format!(
        ". They are interested in {}.",
        intro.interests
    ));

    IntroSummary {
        summary,
        experience_level: classify(intro),
        skills: intro.interests.clone(),
    }
}

fn classify(intro: &IntroData) -> ExperienceLevel {
    let haystack = format!("{} {}", intro.role, intro.details).to_ascii_lowercase();
    let hit = |words: &[&str]| words.iter().any(|w| haystack.contains(w));

    if hit(&["professor", "principal", "staff", "founder", "phd", "lead"]) {
        ExperienceLevel::Expert
    } else if hit(&["senior", "researcher", "scientist", "postdoc", "years"]) {
        ExperienceLevel::Advanced
    } else if hit(&["engineer", "developer", "graduate", "master", "analyst"]) {
        ExperienceLevel::Intermediate
    } else {
        ExperienceLevel::Beginner
    }
}
