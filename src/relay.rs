use crate::{
    config::ChatConfig,
    dedup::dedup_first_seen,
    error::Result,
    extract::{PostId, extract_post_ids},
    reply::format_reply,
    resolver::MediaResolver,
};
use teloxide::types::ChatId;
use tracing::{debug, error, info, instrument, warn};

/// Post a reply into a chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReplySender: Send + Sync {
    async fn send(&self, chat_id: ChatId, text: String) -> Result<()>;
}

/// A chat message as seen by the relay.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub chat_name: Option<String>,
    pub text: String,
}

/// What happened to one unique post id within a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    Sent(PostId),
    NoMedia(PostId),
    TooFewMedia(PostId),
    MalformedUrl(PostId),
    ResolveFailed(PostId),
    SendFailed(PostId),
}

/// Decides whether a chat is one the relay serves.
#[derive(Debug, Clone, Default)]
pub struct ChatFilter {
    config: ChatConfig,
}

impl ChatFilter {
    #[must_use]
    pub const fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    /// Mismatches are always logged, but only block when enforcement is on.
    #[must_use]
    pub fn allows(&self, chat_name: Option<&str>) -> bool {
        if chat_name == Some(self.config.expected_name.as_str()) {
            return true;
        }
        warn!(
            chat_name = chat_name.unwrap_or("<unnamed>"),
            expected = %self.config.expected_name,
            enforced = self.config.enforce_name,
            "chat name mismatch"
        );
        !self.config.enforce_name
    }
}

pub struct Relay<R, S> {
    resolver: R,
    sender: S,
    filter: ChatFilter,
}

impl<R, S> Relay<R, S>
where
    R: MediaResolver,
    S: ReplySender,
{
    #[must_use]
    pub const fn new(resolver: R, sender: S, filter: ChatFilter) -> Self {
        Self {
            resolver,
            sender,
            filter,
        }
    }

    /// Relay the media of every distinct status link in `msg`, one post at a time.
    ///
    /// Failures are logged and skipped; they never stop the remaining posts.
    #[instrument(skip_all, fields(chat_id = msg.chat_id.0))]
    pub async fn handle(&self, msg: &IncomingMessage) -> Vec<PostOutcome> {
        if !self.filter.allows(msg.chat_name.as_deref()) {
            return Vec::new();
        }

        let ids = dedup_first_seen(extract_post_ids(&msg.text));
        if ids.is_empty() {
            return Vec::new();
        }
        debug!(count = ids.len(), "found status links");

        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            outcomes.push(self.relay_post(msg.chat_id, id).await);
        }

        let sent = outcomes
            .iter()
            .filter(|o| matches!(o, PostOutcome::Sent(_)))
            .count();
        info!(posts = outcomes.len(), sent, "message handled");
        outcomes
    }

    async fn relay_post(&self, chat_id: ChatId, id: PostId) -> PostOutcome {
        let urls = match self.resolver.resolve(id).await {
            Ok(urls) => urls,
            Err(err) => {
                error!(%id, %err, "couldn't get tweet media");
                return PostOutcome::ResolveFailed(id);
            }
        };

        if urls.is_empty() {
            return PostOutcome::NoMedia(id);
        }

        let reply = match format_reply(&urls) {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                debug!(%id, media = urls.len(), "not enough media to relay");
                return PostOutcome::TooFewMedia(id);
            }
            Err(err) => {
                warn!(%id, %err, "skipping post");
                return PostOutcome::MalformedUrl(id);
            }
        };

        match self.sender.send(chat_id, reply).await {
            Ok(()) => {
                info!(%id, "relayed tweet media");
                PostOutcome::Sent(id)
            }
            Err(err) => {
                error!(%id, %err, "error sending reply");
                PostOutcome::SendFailed(id)
            }
        }
    }
}
