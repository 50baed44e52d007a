//! This module acts as a central router for all component interactions.
//!
//! The main `handler.rs` file delegates here based on the component's
//! custom-id family, keeping the event handler clean.

pub mod ids;
pub mod intro_handler;
pub mod util;
