//! Service layer: the lifecycle orchestration core and its two external
//! collaborators (summarization and channel publishing). The Discord-facing
//! interaction handlers stay thin and delegate the workflow to this layer.

pub mod lifecycle;
pub mod publisher;
pub mod summarizer;
