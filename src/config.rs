use crate::error::{Error, Result};
use std::{env, fmt::Debug};

const DEFAULT_CHAT_NAME: &str = "bots";
const DEFAULT_TWITTER_API_BASE: &str = "https://api.twitter.com";

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub chat: ChatConfig,
    pub twitter: TwitterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Name of the chat the bot is meant to serve.
    pub expected_name: String,
    /// Drop messages from other chats instead of only logging the mismatch.
    pub enforce_name: bool,
}

#[derive(Clone)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub api_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnv` if a required credential is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnv` if a required credential is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|val| !val.trim().is_empty())
                .ok_or(Error::MissingEnv(key))
        };

        Ok(Self {
            telegram_token: required("TELOXIDE_TOKEN")?,
            chat: ChatConfig {
                expected_name: lookup("RELAY_CHAT_NAME")
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CHAT_NAME.to_string()),
                enforce_name: lookup("RELAY_ENFORCE_CHAT_NAME").is_some_and(|val| is_truthy(&val)),
            },
            twitter: TwitterConfig {
                consumer_key: required("TWITTER_CONSUMER_KEY")?,
                consumer_secret: required("TWITTER_CONSUMER_SECRET")?,
                api_base: lookup("TWITTER_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .filter(|base| !base.is_empty())
                    .unwrap_or_else(|| DEFAULT_TWITTER_API_BASE.to_string()),
            },
        })
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            expected_name: DEFAULT_CHAT_NAME.into(),
            enforce_name: false,
        }
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &"<redacted>")
            .field("chat", &self.chat)
            .field("twitter", &self.twitter)
            .finish()
    }
}

impl Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    const CREDENTIALS: &[(&str, &str)] = &[
        ("TELOXIDE_TOKEN", "123:abc"),
        ("TWITTER_CONSUMER_KEY", "key"),
        ("TWITTER_CONSUMER_SECRET", "secret"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(CREDENTIALS)).unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.chat, ChatConfig::default());
        assert_eq!(config.twitter.api_base, DEFAULT_TWITTER_API_BASE);
    }

    #[test]
    fn missing_credential() {
        let err = Config::from_lookup(lookup_from(&[("TELOXIDE_TOKEN", "123:abc")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("TWITTER_CONSUMER_KEY")));
    }

    #[test]
    fn blank_credential_is_missing() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs[0] = ("TELOXIDE_TOKEN", "  ");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("TELOXIDE_TOKEN")));
    }

    #[test]
    fn optional_overrides() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("RELAY_CHAT_NAME", "memes"),
            ("RELAY_ENFORCE_CHAT_NAME", "TRUE"),
            ("TWITTER_API_BASE", "http://localhost:8080/"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.chat.expected_name, "memes");
        assert!(config.chat.enforce_name);
        assert_eq!(config.twitter.api_base, "http://localhost:8080");
    }

    #[test]
    fn debug_hides_secrets() {
        let config = Config::from_lookup(lookup_from(CREDENTIALS)).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("123:abc"));
        assert!(!printed.contains("secret\""));
        assert!(printed.contains("<redacted>"));
    }
}
