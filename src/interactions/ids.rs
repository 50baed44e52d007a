//! Typed component identifiers for the introduction flow. Buttons carry the
//! owning user id inside the custom id; parsing them through one enum keeps
//! the ownership checks in one place instead of ad-hoc string splitting.

use serenity::model::id::UserId;

/// Custom-id family prefix routed to `intro_handler` by the event handler.
pub const INTRO_FAMILY: &str = "intro";

/// Custom id of the introduction modal itself.
pub const INTRO_MODAL_ID: &str = "intro_modal";

const OPEN: &str = "intro_open";
const UPDATE_PREFIX: &str = "intro_update_";
const DELETE_PREFIX: &str = "intro_delete_";
const CONFIRM_PREFIX: &str = "intro_delete_confirm_";
const CANCEL_PREFIX: &str = "intro_delete_cancel_";

/// Every button action in the introduction flow, with the profile owner
/// encoded where the action is owner-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    /// Open a blank introduction form.
    Open,
    /// Open the form pre-filled with the owner's stored introduction.
    Update(UserId),
    /// Ask for delete confirmation.
    Delete(UserId),
    ConfirmDelete(UserId),
    CancelDelete(UserId),
}

impl IntroAction {
    pub fn custom_id(self) -> String {
        match self {
            Self::Open => OPEN.to_string(),
            Self::Update(owner) => format!("{UPDATE_PREFIX}{}", owner.get()),
            Self::Delete(owner) => format!("{DELETE_PREFIX}{}", owner.get()),
            Self::ConfirmDelete(owner) => format!("{CONFIRM_PREFIX}{}", owner.get()),
            Self::CancelDelete(owner) => format!("{CANCEL_PREFIX}{}", owner.get()),
        }
    }

    /// Parse a custom id back into an action. Returns `None` for ids outside
    /// the family or with a malformed owner id.
    pub fn parse(custom_id: &str) -> Option<Self> {
        if custom_id == OPEN {
            return Some(Self::Open);
        }
        // Longest prefixes first: `intro_delete_` is a prefix of the
        // confirm/cancel ids.
        if let Some(rest) = custom_id.strip_prefix(CONFIRM_PREFIX) {
            return owner(rest).map(Self::ConfirmDelete);
        }
        if let Some(rest) = custom_id.strip_prefix(CANCEL_PREFIX) {
            return owner(rest).map(Self::CancelDelete);
        }
        if let Some(rest) = custom_id.strip_prefix(UPDATE_PREFIX) {
            return owner(rest).map(Self::Update);
        }
        if let Some(rest) = custom_id.strip_prefix(DELETE_PREFIX) {
            return owner(rest).map(Self::Delete);
        }
        None
    }
}

fn owner(raw: &str) -> Option<UserId> {
    raw.parse::<u64>().ok().filter(|id| *id != 0).map(UserId::new)
}
