//! HTTP client for the content API

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::query::Query;
use super::response::CollectionPage;

/// Errors produced while talking to the content API
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// Client could not be constructed from the given settings
    #[error("invalid CMS configuration: {0}")]
    Config(String),

    /// The request never produced a response
    #[error("request to content API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("content API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape
    #[error("could not decode content API response: {0}")]
    Decode(String),
}

/// Client for a Strapi-style REST content API
///
/// Collections live under `/api/{collection}`; every request carries the
/// bearer credential supplied at construction. The client performs no
/// retries; callers decide how a failure surfaces.
#[derive(Debug, Clone)]
pub struct CmsClient {
    base_url: String,
    client: reqwest::Client,
}

impl CmsClient {
    /// Create a client for the given API base URL and bearer credential
    pub fn new(base_url: &str, token: &str) -> Result<Self, CmsError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CmsError::Config("credential contains invalid characters".to_string()))?;
        headers.insert("Authorization", auth);

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .map_err(CmsError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch one page of a collection
    pub async fn find<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<CollectionPage<T>, CmsError> {
        let mut url = format!("{}/api/{}", self.base_url, collection);
        let query_string = query.to_query_string();
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        debug!(url = %url, "content API request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| CmsError::Decode(e.to_string()))
    }

    /// Fetch the first record matching the query, if any
    ///
    /// An empty result is `Ok(None)`; only transport/status/decode
    /// problems are errors.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<T>, CmsError> {
        let query = query.clone().paginate(1, 1);
        let mut page = self.find::<T>(collection, &query).await?;
        if page.data.is_empty() {
            Ok(None)
        } else {
            Ok(Some(page.data.remove(0)))
        }
    }
}
