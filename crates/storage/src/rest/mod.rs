//! REST adapter for the hosted backend (PostgREST-style interface).

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::repository::StorageError;
use crate::retry::RetryPolicy;

mod branding_repo;
mod mapping;
mod plan_repo;
mod rows;
mod session_repo;

pub use mapping::MappingError;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub base_url: Url,
    pub api_key: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RestInitError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("api key is not a valid header value")]
    InvalidApiKey,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl RestConfig {
    /// Build a config from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError::InvalidUrl` for an unparsable base url.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, RestInitError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Read `COACH_API_URL` and `COACH_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError::MissingEnv` when either variable is unset.
    pub fn from_env() -> Result<Self, RestInitError> {
        let base_url = std::env::var("COACH_API_URL")
            .map_err(|_| RestInitError::MissingEnv("COACH_API_URL"))?;
        let api_key = std::env::var("COACH_API_KEY")
            .map_err(|_| RestInitError::MissingEnv("COACH_API_KEY"))?;
        Self::new(&base_url, api_key)
    }
}

/// HTTP client for the backend's table endpoints.
///
/// Reads go through the shared retry policy; writes are single-shot so that
/// best-effort semantics stay visible to callers.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base: Url,
    retry: RetryPolicy,
}

impl RestClient {
    /// Build a client from the given config.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError` when the api key cannot be used as a header
    /// or the underlying HTTP client cannot be constructed.
    pub fn connect(config: &RestConfig) -> Result<Self, RestInitError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RestInitError::InvalidApiKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| RestInitError::InvalidApiKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base: config.base_url.clone(),
            retry: RetryPolicy::for_reads(),
        })
    }

    /// Override the read retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self, table: &str) -> Result<Url, StorageError> {
        self.base
            .join(table)
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StorageError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Fetch all rows matching the query, with read retries.
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StorageError> {
        let url = self.endpoint(table)?;
        self.retry
            .run(table, || self.fetch_once(url.clone(), query))
            .await
    }

    /// Upsert rows with merge-duplicates semantics; single attempt.
    ///
    /// Returns whether the backend accepted the write.
    pub(crate) async fn upsert<B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<bool, StorageError> {
        let url = self.endpoint(table)?;
        let response = self
            .http
            .post(url)
            .header("Prefer", "resolution=merge-duplicates")
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(response.status().is_success())
    }

    /// Patch rows matching the query; returns the number of affected rows.
    pub(crate) async fn patch<B: Serialize>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<usize, StorageError> {
        let url = self.endpoint(table)?;
        let response = self
            .http
            .patch(url)
            .query(query)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(rows.len())
    }
}
