//! UI construction helpers: shared style constants, button builders, and the
//! introduction modal.

pub mod buttons;
pub mod form;
pub mod style;
