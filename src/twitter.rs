//! Twitter v1.1 client using app-only (client credentials) OAuth2.

use crate::{
    config::TwitterConfig,
    error::{Error, Result},
    extract::PostId,
    resolver::MediaResolver,
};
use reqwest::{Client, Response};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::form_urlencoded::byte_serialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: i64,
    pub extended_entities: Option<ExtendedEntities>,
}

#[derive(Debug, Deserialize)]
pub struct ExtendedEntities {
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    pub media_url_https: String,
}

impl Tweet {
    /// Media URLs in platform order, or `None` when the tweet has no extended entities.
    #[must_use]
    pub fn media_urls(self) -> Option<Vec<String>> {
        self.extended_entities.map(|entities| {
            entities
                .media
                .into_iter()
                .map(|media| media.media_url_https)
                .collect()
        })
    }
}

pub struct TwitterClient {
    http: Client,
    config: TwitterConfig,
    bearer: OnceCell<String>,
}

impl TwitterClient {
    #[must_use]
    pub fn new(config: TwitterConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            bearer: OnceCell::new(),
        }
    }

    /// Bearer token, requested on first use and kept for the process lifetime.
    async fn bearer(&self) -> Result<&str> {
        self.bearer
            .get_or_try_init(|| self.request_token())
            .await
            .map(String::as_str)
    }

    async fn request_token(&self) -> Result<String> {
        debug!("requesting twitter bearer token");
        let key = byte_serialize(self.config.consumer_key.as_bytes()).collect::<String>();
        let secret = byte_serialize(self.config.consumer_secret.as_bytes()).collect::<String>();

        let response = self
            .http
            .post(format!("{}/oauth2/token", self.config.api_base))
            .basic_auth(key, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token = ensure_success(response)
            .await?
            .json::<TokenResponse>()
            .await?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::other(format!(
                "unexpected token type: {}",
                token.token_type
            )));
        }
        Ok(token.access_token)
    }

    /// Fetch a single tweet.
    ///
    /// # Errors
    ///
    /// - `Error::Http` on transport or decoding failure.
    /// - `Error::Api` on a non-success status (not found, auth, rate limit).
    pub async fn show(&self, id: PostId) -> Result<Tweet> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/1.1/statuses/show.json", self.config.api_base))
            .bearer_auth(bearer)
            .query(&[("id", id.0)])
            .send()
            .await?;

        Ok(ensure_success(response).await?.json::<Tweet>().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::api(status, body))
}

#[async_trait::async_trait]
impl MediaResolver for TwitterClient {
    async fn resolve(&self, id: PostId) -> Result<Vec<String>> {
        let tweet = self.show(id).await?;
        if let Some(urls) = tweet.media_urls() {
            return Ok(urls);
        }
        info!(%id, "tweet has no extended entities");
        Ok(Vec::new())
    }
}
