//! Shared interaction helpers: acknowledge and edit wrappers that never let a
//! secondary Discord failure escape — the pending interaction is always
//! resolved as well as we can manage, and anything beyond that is only logged.

use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::model::application::{ComponentInteraction, ModalInteraction};
use serenity::prelude::Context;

/// Defer a modal submission ephemerally. Returns `false` when even the
/// acknowledgment failed, in which case the caller should bail out.
pub async fn defer_modal(ctx: &Context, modal: &ModalInteraction) -> bool {
    let response = CreateInteractionResponse::Defer(
        CreateInteractionResponseMessage::new().ephemeral(true),
    );
    match modal.create_response(&ctx.http, response).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(target: "ui.defer", cid = %modal.data.custom_id, error = ?e, "modal defer failed");
            false
        }
    }
}

/// Edit the deferred modal response; logs failure with a tag for observability.
pub async fn edit_modal(
    ctx: &Context,
    modal: &ModalInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) {
    if let Err(e) = modal.edit_response(&ctx.http, builder).await {
        tracing::error!(target: "ui.edit", cid = %modal.data.custom_id, tag = %tag, error = ?e, "edit_response failed");
    }
}

/// Reply to a component with a fresh ephemeral message.
pub async fn reply_component(
    ctx: &Context,
    component: &ComponentInteraction,
    tag: &str,
    builder: CreateInteractionResponseMessage,
) {
    let response = CreateInteractionResponse::Message(builder.ephemeral(true));
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!(target: "ui.reply", cid = %component.data.custom_id, tag = %tag, error = ?e, "create_response failed");
    }
}

/// Replace the message the component lives on (used by the confirm/cancel
/// prompt to resolve itself).
pub async fn update_component(
    ctx: &Context,
    component: &ComponentInteraction,
    tag: &str,
    builder: CreateInteractionResponseMessage,
) {
    let response = CreateInteractionResponse::UpdateMessage(builder);
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!(target: "ui.update", cid = %component.data.custom_id, tag = %tag, error = ?e, "update_message failed");
    }
}
