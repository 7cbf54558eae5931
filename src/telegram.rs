use crate::{
    error::{Error, Result},
    relay::{IncomingMessage, ReplySender},
};
use teloxide::{
    Bot,
    prelude::Requester,
    types::{ChatId, Message},
};

/// Sends replies through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    #[inline]
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait::async_trait]
impl ReplySender for TelegramSender {
    async fn send(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .await
            .map_err(Error::from)?;
        Ok(())
    }
}

/// Convert a Telegram message into relay input.
///
/// Media captions count as text. Returns `None` for messages with neither and for
/// messages sent by bots.
#[must_use]
pub fn incoming(msg: &Message) -> Option<IncomingMessage> {
    if msg.from.as_ref().is_some_and(|user| user.is_bot) {
        return None;
    }
    let text = msg.text().or_else(|| msg.caption())?;
    let chat_name = msg.chat.title().or_else(|| msg.chat.username());

    Some(IncomingMessage {
        chat_id: msg.chat.id,
        chat_name: chat_name.map(ToOwned::to_owned),
        text: text.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn message(chat: Value, from_bot: bool, text: &str) -> Message {
        serde_json::from_value(json!({
            "message_id": 7,
            "date": 1_700_000_000,
            "chat": chat,
            "from": {"id": 1, "is_bot": from_bot, "first_name": "Alice"},
            "text": text,
        }))
        .unwrap()
    }

    fn group() -> Value {
        json!({"id": -42, "type": "group", "title": "bots"})
    }

    #[test]
    fn group_message() {
        let msg = incoming(&message(group(), false, "https://twitter.com/a/status/1")).unwrap();
        assert_eq!(msg.chat_id, ChatId(-42));
        assert_eq!(msg.chat_name.as_deref(), Some("bots"));
        assert_eq!(msg.text, "https://twitter.com/a/status/1");
    }

    #[test]
    fn private_chat_uses_username() {
        let chat = json!({"id": 5, "type": "private", "username": "alice", "first_name": "Alice"});
        let msg = incoming(&message(chat, false, "hi")).unwrap();
        assert_eq!(msg.chat_name.as_deref(), Some("alice"));
    }

    #[test]
    fn photo_caption_is_text() {
        let msg = serde_json::from_value::<Message>(json!({
            "message_id": 8,
            "date": 1_700_000_000,
            "chat": group(),
            "from": {"id": 1, "is_bot": false, "first_name": "Alice"},
            "photo": [{"file_id": "f", "file_unique_id": "u", "width": 90, "height": 90}],
            "caption": "see https://twitter.com/a/status/2",
        }))
        .unwrap();
        let msg = incoming(&msg).unwrap();
        assert_eq!(msg.text, "see https://twitter.com/a/status/2");
    }

    #[test]
    fn skips_bots() {
        assert!(incoming(&message(group(), true, "hi")).is_none());
    }
}
