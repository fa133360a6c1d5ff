pub mod character;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

pub use character::{Character, Clan};

pub const DEFAULT_ENDPOINT: &str = "https://dattebayo-api.onrender.com/characters";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {url} has no `characters` list")]
    MissingCharacters { url: String },
}

/// Fetches the full character list from the API.
///
/// Every call issues one independent GET; nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct CharacterRepository {
    client: reqwest::Client,
    endpoint: String,
}

impl CharacterRepository {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn load(&self) -> Result<Vec<Character>, FetchError> {
        let url = self.endpoint.clone();
        tracing::debug!(%url, "fetching characters");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.clone(),
            source: e,
        })?;
        let characters = decode_characters(&url, &body)?;
        tracing::info!(count = characters.len(), "characters loaded");
        Ok(characters)
    }

    /// Loads the list, logging any failure and degrading to an empty list.
    pub async fn load_or_empty(&self) -> Vec<Character> {
        match self.load().await {
            Ok(characters) => characters,
            Err(e) => {
                tracing::error!(error = %e, "failed to load characters");
                Vec::new()
            }
        }
    }
}

pub fn build_client(
    proxy: Option<&str>,
    timeout_seconds: u64,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout_seconds));
    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }
    builder.build()
}

pub fn decode_characters(url: &str, body: &str) -> Result<Vec<Character>, FetchError> {
    let root: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })?;
    let list = root
        .get("characters")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::MissingCharacters {
            url: url.to_string(),
        })?;
    Ok(list.iter().map(Character::from_value).collect())
}
