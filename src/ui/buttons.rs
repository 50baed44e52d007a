//! Central button construction helpers ensuring consistent style, plus the
//! component rows used by the introduction flow.

use crate::interactions::ids::IntroAction;
use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;
use serenity::model::id::UserId;

pub struct Btn;
impl Btn {
    pub fn primary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id).label(label).style(ButtonStyle::Primary)
    }
    pub fn secondary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(label)
            .style(ButtonStyle::Secondary)
    }
    pub fn danger(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id).label(label).style(ButtonStyle::Danger)
    }
}

/// Update/Delete pair attached to the success notice, scoped to the owner.
pub fn profile_action_row(owner: UserId) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        Btn::primary(&IntroAction::Update(owner).custom_id(), "Update Intro").emoji('🔁'),
        Btn::danger(&IntroAction::Delete(owner).custom_id(), "Delete Intro").emoji('🗑'),
    ])
}

/// Confirm/cancel pair for the two-step delete.
pub fn confirm_delete_row(owner: UserId) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        Btn::danger(&IntroAction::ConfirmDelete(owner).custom_id(), "Yes, Delete"),
        Btn::secondary(&IntroAction::CancelDelete(owner).custom_id(), "Cancel"),
    ])
}

/// Single "Introduce Yourself" button for the standing prompt message.
pub fn intro_prompt_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        Btn::primary(&IntroAction::Open.custom_id(), "Introduce Yourself").emoji('👋'),
    ])
}
