//! Channel publisher: renders a profile record into its embed and performs
//! create/replace/delete against the configured profile channel. Resolution
//! checks configuration and the bot's own permission bitmask up front so the
//! submit flow can fail fast with an actionable message.

use crate::database::settings;
use crate::model::{ProfileRecord, NOT_SPECIFIED};
use crate::services::lifecycle::{IntroError, ProfilePublisher};
use crate::ui::style;
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::{Http, HttpError};
use serenity::model::channel::Channel;
use serenity::model::id::{ChannelId, MessageId};
use serenity::model::permissions::Permissions;
use serenity::model::timestamp::Timestamp;
use serenity::prelude::Context;
use sqlx::PgPool;
use std::sync::Arc;

/// Publisher bound to the resolved profile channel.
pub struct ChannelPublisher {
    http: Arc<Http>,
    pub channel_id: ChannelId,
    /// Avatar of the profile owner, shown as the embed thumbnail.
    owner_avatar: Option<String>,
    /// Avatar of the bot, shown in the footer.
    footer_icon: Option<String>,
}

impl ChannelPublisher {
    /// Resolve the target channel from configuration and verify the bot can
    /// post embeds there. Both failures are terminal for the attempt: a
    /// missing setting is a configuration error, anything else an access
    /// error.
    pub async fn resolve(ctx: &Context, db: &PgPool) -> Result<Self, IntroError> {
        let Some(channel_id) = settings::profile_channel(db).await? else {
            return Err(IntroError::Config(
                "Profile channel is not configured. Please ask an admin to run `/config channel`."
                    .to_string(),
            ));
        };

        let channel = channel_id.to_channel(&ctx.http).await.map_err(|e| {
            IntroError::Access(format!(
                "Could not access the profile channel: {e}. Please contact an admin."
            ))
        })?;
        let Channel::Guild(guild_channel) = channel else {
            return Err(IntroError::Access(
                "The configured profile channel is not a server text channel.".to_string(),
            ));
        };

        let bot_user = ctx.cache.current_user().clone();
        let footer_icon = Some(bot_user.face());
        let permissions = guild_channel
            .permissions_for_user(&ctx.cache, bot_user.id)
            .map_err(|e| IntroError::Access(format!("Could not check channel permissions: {e}")))?;
        if !permissions.contains(Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS) {
            return Err(IntroError::Access(
                "I am missing Send Messages / Embed Links in the profile channel. Please contact an admin."
                    .to_string(),
            ));
        }

        Ok(Self {
            http: ctx.http.clone(),
            channel_id,
            owner_avatar: None,
            footer_icon,
        })
    }

    pub fn with_owner_avatar(mut self, url: String) -> Self {
        self.owner_avatar = Some(url);
        self
    }

    /// Deterministic mapping from a record to its display embed.
    pub fn render(&self, record: &ProfileRecord) -> CreateEmbed {
        let level = record.experience_level;
        let emoji = style::emoji_for(level);

        let mut embed = CreateEmbed::new()
            .color(style::color_for(level))
            .title(format!("{emoji} Member Introduction"))
            .description(profile_description(record))
            .field("🎓 Name", &record.intro.name, true)
            .field("💼 Role / Study", &record.intro.role, true)
            .field("📊 Experience", format!("{emoji} {level}"), true);

        if record.intro.institution != NOT_SPECIFIED {
            embed = embed.field("🏫 Institution", &record.intro.institution, true);
        }

        let mut embed = embed
            .field("🤖 Interests", &record.intro.interests, false)
            .field("🧠 Skills", &record.skills, false)
            .timestamp(Timestamp::now());

        if let Some(url) = &self.owner_avatar {
            embed = embed.thumbnail(url);
        }
        let footer = CreateEmbedFooter::new("🛡️ Verified Intro");
        embed.footer(match &self.footer_icon {
            Some(icon) => footer.icon_url(icon),
            None => footer,
        })
    }
}

/// Owner mention plus the generated biography.
pub fn profile_description(record: &ProfileRecord) -> String {
    format!("<@{}>\n\n{}", record.user_id.get(), record.summary)
}

#[async_trait]
impl ProfilePublisher for ChannelPublisher {
    async fn publish(&self, record: &ProfileRecord) -> Result<MessageId, IntroError> {
        let message = self
            .channel_id
            .send_message(&self.http, CreateMessage::new().embed(self.render(record)))
            .await?;
        Ok(message.id)
    }

    async fn unpublish(&self, message_id: MessageId) -> Result<(), IntroError> {
        match self.channel_id.delete_message(&self.http, message_id).await {
            Ok(()) => Ok(()),
            // A message someone already removed is as deleted as we need.
            Err(serenity::Error::Http(e)) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch(&self, message_id: MessageId) -> Result<bool, IntroError> {
        match self.channel_id.message(&self.http, message_id).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(e)) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_not_found(err: &HttpError) -> bool {
    matches!(err, HttpError::UnsuccessfulRequest(resp) if resp.status_code == 404)
}
