//! Implements the `/intro` and `/update_intro` commands. Both open the
//! introduction modal; the update variant pre-fills it from the stored
//! profile and quietly falls back to the blank form when there is none.

use crate::database::profiles;
use crate::model::AppState;
use crate::ui::form::create_intro_modal;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::prelude::*;
use tracing::{error, warn};

pub fn register() -> CreateCommand {
    CreateCommand::new("intro").description("Introduce yourself — opens the introduction form.")
}

pub fn register_update() -> CreateCommand {
    CreateCommand::new("update_intro")
        .description("Update your introduction - opens a form pre-filled with your current info")
}

/// `prefill` distinguishes `/update_intro` from `/intro`; everything else is
/// identical. A modal has to be the first response, so no defer here.
pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, prefill: bool) {
    let existing = if prefill {
        match AppState::from_ctx(ctx).await {
            Some(state) => profiles::get_profile(&state.db, interaction.user.id)
                .await
                .unwrap_or_else(|e| {
                    warn!(target: "intro.form", user_id = interaction.user.id.get(), error = %e, "could not load profile for pre-fill");
                    None
                }),
            None => None,
        }
    } else {
        None
    };

    let modal = create_intro_modal(existing.as_ref().map(|r| &r.intro));
    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await
    {
        error!(target: "intro.form", user_id = interaction.user.id.get(), error = ?e, "could not show intro modal");
        interaction
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content("❌ Failed to open the introduction form. Please try again.")
                        .ephemeral(true),
                ),
            )
            .await
            .ok();
    }
}
