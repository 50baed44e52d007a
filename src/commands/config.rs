//! `/config` — admin-only bot configuration: set or show the profile channel
//! and post the standing "Introduce Yourself" prompt.

use crate::database::settings::{self, PROFILE_CHANNEL_KEY};
use crate::model::AppState;
use crate::ui::buttons::intro_prompt_row;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandDataOptionValue, CommandInteraction, CommandOptionType};
use serenity::model::permissions::Permissions;
use serenity::prelude::*;
use tracing::{info, warn};

pub fn register() -> CreateCommand {
    CreateCommand::new("config")
        .description("View or update bot configuration (admin only).")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "channel",
                "Set the channel where introductions are published",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "target",
                    "The profile channel",
                )
                .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "show",
            "Show current config",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "prompt",
            "Post the Introduce Yourself prompt in this channel",
        ))
}

fn is_admin(interaction: &CommandInteraction) -> bool {
    interaction
        .member
        .as_ref()
        .and_then(|m| m.permissions)
        .is_some_and(|p| p.contains(Permissions::MANAGE_GUILD))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await
        .ok();

    let edit = |content: String| EditInteractionResponse::new().content(content);
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        warn!(command = "config", "missing_app_state");
        interaction
            .edit_response(&ctx.http, edit("Internal error: missing app state".to_string()))
            .await
            .ok();
        return;
    };

    if !is_admin(interaction) {
        interaction
            .edit_response(&ctx.http, edit("You are not permitted to configure the bot.".to_string()))
            .await
            .ok();
        return;
    }

    let Some(sub) = interaction.data.options.first() else {
        return;
    };
    let message = match sub.name.as_str() {
        "channel" => {
            let target = match &sub.value {
                CommandDataOptionValue::SubCommand(nested) => nested.first().and_then(|o| {
                    if let CommandDataOptionValue::Channel(id) = &o.value {
                        Some(*id)
                    } else {
                        None
                    }
                }),
                _ => None,
            };
            match target {
                Some(channel_id) => {
                    match settings::set_config_value(
                        &app_state.db,
                        PROFILE_CHANNEL_KEY,
                        &channel_id.get().to_string(),
                    )
                    .await
                    {
                        Ok(()) => {
                            info!(target: "config", channel_id = channel_id.get(), "profile channel updated");
                            format!("Profile channel set to <#{channel_id}>.")
                        }
                        Err(e) => format!("Failed to persist profile channel: {e}"),
                    }
                }
                None => "Invalid channel.".to_string(),
            }
        }
        "show" => match settings::profile_channel(&app_state.db).await {
            Ok(Some(channel_id)) => format!("Current profile channel: <#{channel_id}>"),
            Ok(None) => "No profile channel configured.".to_string(),
            Err(e) => format!("Failed to read config: {e}"),
        },
        "prompt" => {
            let message = CreateMessage::new()
                .content("👋 New here? Tell us about yourself!")
                .components(vec![intro_prompt_row()]);
            match interaction.channel_id.send_message(&ctx.http, message).await {
                Ok(_) => "Prompt posted.".to_string(),
                Err(e) => format!("Failed to post prompt: {e}"),
            }
        }
        _ => return,
    };

    interaction.edit_response(&ctx.http, edit(message)).await.ok();
}
