//! Slash command registration and run logic.

pub mod config;
pub mod intro;
