use reqwest::StatusCode;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("status link matched without an id capture: {0}")]
    MalformedMatch(String),

    #[error("couldn't parse post id {raw:?}: {source}")]
    UnparseableId {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("twitter api returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("first media url seems too short: {0:?}")]
    MalformedUrl(String),

    #[error("teloxide error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("expected {0} to be set")]
    MissingEnv(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("other: {0}")]
    Other(String),
}

impl Error {
    #[inline]
    pub fn other(text: impl Into<String>) -> Self {
        Self::Other(text.into())
    }

    #[inline]
    pub fn api(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
