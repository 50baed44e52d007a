//! The gateway event handler: registers the slash commands on ready and
//! routes every inbound interaction — command, component press, or modal
//! submission — to its handler.

use crate::{commands, interactions, AppState};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::EventHandler;
use tracing::{error, info};

pub struct Handler {
    pub allowed_guild_id: GuildId,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            error!("AppState missing from TypeMap; dropping interaction");
            return;
        };

        match &interaction {
            Interaction::Command(command) => match command.data.name.as_str() {
                "intro" => commands::intro::run_slash(&ctx, command, false).await,
                "update_intro" => commands::intro::run_slash(&ctx, command, true).await,
                "config" => commands::config::run_slash(&ctx, command).await,
                _ => {}
            },
            Interaction::Component(component) => {
                let family = component.data.custom_id.split('_').next().unwrap_or("");
                if family == interactions::ids::INTRO_FAMILY {
                    interactions::intro_handler::handle_component(&ctx, component, app_state)
                        .await;
                }
            }
            Interaction::Modal(modal) => {
                if modal.data.custom_id == interactions::ids::INTRO_MODAL_ID {
                    interactions::intro_handler::handle_modal(&ctx, modal, app_state).await;
                }
            }
            _ => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected and ready!", ready.user.name);
        let commands_to_register = vec![
            commands::intro::register(),
            commands::intro::register_update(),
            commands::config::register(),
        ];
        if let Err(e) = self
            .allowed_guild_id
            .set_commands(&ctx.http, commands_to_register)
            .await
        {
            error!(error = ?e, "failed to register guild commands");
        }
    }
}
