use crate::error::{Error, Result};
use regex::Regex;
use std::{fmt::Display, str::FromStr, sync::OnceLock};
use tracing::warn;

static STATUS_RE: OnceLock<Regex> = OnceLock::new();

fn status_regex() -> &'static Regex {
    STATUS_RE.get_or_init(|| {
        Regex::new(r"https?://(?:mobile\.|www\.)?twitter\.com/[A-Za-z0-9_]+/status/([0-9]+)")
            .expect("failed to compile status regex")
    })
}

/// Identifier of a single post on the content platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl FromStr for PostId {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        raw.parse::<i64>()
            .map(Self)
            .map_err(|source| Error::UnparseableId {
                raw: raw.to_owned(),
                source,
            })
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every status link in `text`, in order, as the raw captured id.
///
/// A match without an id capture yields `Error::MalformedMatch`.
pub fn capture_status_ids(text: &str) -> impl Iterator<Item = Result<&str>> {
    status_regex().captures_iter(text).map(|caps| {
        caps.get(1)
            .map(|m| m.as_str())
            .ok_or_else(|| Error::MalformedMatch(caps[0].to_owned()))
    })
}

/// Parse every status link in `text` into a `PostId`, skipping the ones that don't parse.
#[must_use]
pub fn extract_post_ids(text: &str) -> Vec<PostId> {
    capture_status_ids(text)
        .filter_map(|captured| match captured.and_then(str::parse::<PostId>) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%err, "skipping status link");
                None
            }
        })
        .collect()
}
