//! Discord-side glue for the introduction lifecycle. Buttons and modal
//! submissions land here; validation, summarization, publishing and
//! persistence are delegated to `services::lifecycle`.

use crate::interactions::ids::IntroAction;
use crate::interactions::util::{defer_modal, edit_modal, reply_component, update_component};
use crate::model::{AppState, IntroData};
use crate::services::lifecycle::{self, DeleteOutcome, IntroError};
use crate::services::publisher::ChannelPublisher;
use crate::ui::buttons::{confirm_delete_row, profile_action_row};
use crate::ui::form::{create_intro_modal, extract_fields};
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::model::application::{ComponentInteraction, ModalInteraction};
use serenity::model::id::UserId;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How long the ephemeral success notice stays before the best-effort dismiss.
const AUTO_DISMISS: Duration = Duration::from_secs(15);

/// Route a component press in the `intro` custom-id family.
pub async fn handle_component(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: Arc<AppState>,
) {
    let Some(action) = IntroAction::parse(&component.data.custom_id) else {
        debug!(target: "intro.router", cid = %component.data.custom_id, "unrecognized intro component id");
        return;
    };

    match action {
        IntroAction::Open => show_form(ctx, component, &app_state, None).await,
        IntroAction::Update(owner) => {
            if lifecycle::authorize(component.user.id, owner).is_err() {
                reply_component(
                    ctx,
                    component,
                    "update.denied",
                    CreateInteractionResponseMessage::new()
                        .content("❌ You can only update your own introduction."),
                )
                .await;
                return;
            }
            show_form(ctx, component, &app_state, Some(owner)).await;
        }
        IntroAction::Delete(owner) => {
            if lifecycle::authorize(component.user.id, owner).is_err() {
                reply_component(
                    ctx,
                    component,
                    "delete.denied",
                    CreateInteractionResponseMessage::new()
                        .content("❌ You can only delete your own introduction."),
                )
                .await;
                return;
            }
            reply_component(
                ctx,
                component,
                "delete.confirm",
                CreateInteractionResponseMessage::new()
                    .content(
                        "⚠️ Are you sure you want to delete your introduction? This cannot be undone.",
                    )
                    .components(vec![confirm_delete_row(owner)]),
            )
            .await;
        }
        IntroAction::ConfirmDelete(owner) => {
            confirm_delete(ctx, component, app_state, owner).await;
        }
        IntroAction::CancelDelete(owner) => {
            if lifecycle::authorize(component.user.id, owner).is_err() {
                reply_component(
                    ctx,
                    component,
                    "cancel.denied",
                    CreateInteractionResponseMessage::new()
                        .content("❌ You can only manage your own introduction."),
                )
                .await;
                return;
            }
            update_component(
                ctx,
                component,
                "delete.cancel",
                CreateInteractionResponseMessage::new()
                    .content("✅ Deletion cancelled.")
                    .components(vec![]),
            )
            .await;
        }
    }
}

/// Show the introduction modal, pre-filled from the stored record when a
/// profile owner is given. A missing record degrades to the blank form.
async fn show_form(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    owner: Option<UserId>,
) {
    let existing = match owner {
        Some(owner) => crate::database::profiles::get_profile(&app_state.db, owner)
            .await
            .unwrap_or_else(|e| {
                warn!(target: "intro.form", user_id = owner.get(), error = %e, "could not load profile for pre-fill");
                None
            }),
        None => None,
    };

    let modal = create_intro_modal(existing.as_ref().map(|r| &r.intro));
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await
    {
        error!(target: "intro.form", cid = %component.data.custom_id, error = ?e, "could not show intro modal");
        reply_component(
            ctx,
            component,
            "form.err",
            CreateInteractionResponseMessage::new()
                .content("❌ Failed to open the introduction form. Please try again."),
        )
        .await;
    }
}

async fn confirm_delete(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: Arc<AppState>,
    owner: UserId,
) {
    let actor = component.user.id;
    let respond = |content: &str| {
        CreateInteractionResponseMessage::new()
            .content(content.to_string())
            .components(vec![])
    };

    if !app_state.try_claim(actor).await {
        update_component(
            ctx,
            component,
            "delete.busy",
            respond("⏳ A previous request is still processing. Please wait."),
        )
        .await;
        return;
    }

    let result = match ChannelPublisher::resolve(ctx, &app_state.db).await {
        Ok(publisher) => {
            lifecycle::run_confirm_delete(&app_state.db, &publisher, actor, owner).await
        }
        Err(e) => Err(e),
    };
    app_state.release(actor).await;

    let message = match result {
        Ok(DeleteOutcome::Deleted) => {
            info!(target: "intro.delete", user_id = owner.get(), "introduction deleted");
            "✅ Your introduction has been deleted.".to_string()
        }
        Ok(DeleteOutcome::NotFound) => "❌ Could not find your introduction.".to_string(),
        Err(IntroError::Unauthorized) => {
            "❌ You can only delete your own introduction.".to_string()
        }
        Err(e) => {
            error!(target: "intro.delete", user_id = owner.get(), error = %e, "delete failed");
            format!("❌ {e}")
        }
    };
    update_component(ctx, component, "delete.done", respond(&message)).await;
}

/// Handle the submitted introduction modal: the full
/// validate → resolve → summarize → publish → persist flow.
pub async fn handle_modal(ctx: &Context, modal: &ModalInteraction, app_state: Arc<AppState>) {
    if !defer_modal(ctx, modal).await {
        return;
    }
    let user_id = modal.user.id;

    let intro = match IntroData::from_raw(extract_fields(modal)) {
        Ok(intro) => intro,
        Err(message) => {
            edit_modal(
                ctx,
                modal,
                "submit.invalid",
                EditInteractionResponse::new().content(format!("❌ {message}")),
            )
            .await;
            return;
        }
    };

    let publisher = match ChannelPublisher::resolve(ctx, &app_state.db).await {
        Ok(publisher) => publisher.with_owner_avatar(modal.user.face()),
        Err(e) => {
            warn!(target: "intro.submit", user_id = user_id.get(), error = %e, "channel resolution failed");
            edit_modal(
                ctx,
                modal,
                "submit.channel",
                EditInteractionResponse::new().content(format!("❌ {e}")),
            )
            .await;
            return;
        }
    };

    if !app_state.try_claim(user_id).await {
        edit_modal(
            ctx,
            modal,
            "submit.busy",
            EditInteractionResponse::new()
                .content("⏳ Your previous submission is still processing. Please wait."),
        )
        .await;
        return;
    }

    // Let the member know before the potentially slow summarization starts.
    edit_modal(
        ctx,
        modal,
        "submit.progress",
        EditInteractionResponse::new()
            .content("⏳ Processing your introduction with AI... This may take a moment."),
    )
    .await;

    let channel_id = publisher.channel_id;
    let result =
        lifecycle::run_submit(&app_state.db, &app_state.summarizer, &publisher, user_id, intro)
            .await;
    app_state.release(user_id).await;

    match result {
        Ok(success) => {
            info!(
                target: "intro.submit",
                user_id = user_id.get(),
                message_id = success.message_id.get(),
                level = %success.record.experience_level,
                fallback = success.used_fallback,
                "introduction published"
            );
            edit_modal(
                ctx,
                modal,
                "submit.done",
                EditInteractionResponse::new()
                    .content(format!(
                        "✅ Your introduction has been posted!\n📋 Check it out in <#{channel_id}>"
                    ))
                    .components(vec![profile_action_row(user_id)]),
            )
            .await;
            dismiss_later(ctx, modal);
        }
        Err(e) => {
            error!(target: "intro.submit", user_id = user_id.get(), error = %e, "submission failed");
            edit_modal(
                ctx,
                modal,
                "submit.err",
                EditInteractionResponse::new()
                    .content("❌ Failed to post your profile. Please try again."),
            )
            .await;
        }
    }
}

/// Detached best-effort removal of the transient success notice. Never
/// awaited by the submit flow; failure is only logged.
fn dismiss_later(ctx: &Context, modal: &ModalInteraction) {
    let http = ctx.http.clone();
    let modal = modal.clone();
    tokio::spawn(async move {
        tokio::time::sleep(AUTO_DISMISS).await;
        if let Err(e) = modal.delete_response(&http).await {
            debug!(target: "intro.dismiss", error = ?e, "could not dismiss success notice");
        }
    });
}
