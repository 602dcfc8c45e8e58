//! ProfileApiClient - REST client for the profile registration service.
//!
//! Talks to the hosted CRUD endpoints directly and keeps the profile list
//! in a tagged cache. Every successful mutation invalidates the list tag;
//! a failed mutation leaves the cache untouched, so reads stay consistent
//! with the last confirmed server state.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use enroll_core::config::ApiConfig;
use enroll_core::error::{EnrollError, Result};
use enroll_core::payload::{PartBody, SubmissionPayload};
use enroll_core::profile::StoredProfile;
use enroll_core::transport::ProfileTransport;

use crate::cache::TagCache;

/// Cache tag covering the profile list read.
const PROFILE_LIST_TAG: &str = "profiles";

/// HTTP implementation of [`ProfileTransport`].
pub struct ProfileApiClient {
    client: Client,
    base_url: String,
    list_cache: TagCache<Vec<StoredProfile>>,
}

impl ProfileApiClient {
    /// Creates a client for the endpoint named in the config.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
            list_cache: TagCache::new(),
        }
    }

    /// Creates a client from the environment (see [`ApiConfig::from_env`]).
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Overrides the underlying HTTP client after construction.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ProfileTransport for ProfileApiClient {
    async fn fetch_profiles(&self) -> Result<Vec<StoredProfile>> {
        if let Some(cached) = self.list_cache.get(PROFILE_LIST_TAG).await {
            tracing::debug!(count = cached.len(), "profile list served from cache");
            return Ok(cached);
        }

        tracing::debug!("profile list cache miss, fetching");
        let response = self
            .client
            .get(self.endpoint("/getdata"))
            .send()
            .await
            .map_err(map_request_error)?;
        let envelope: ListEnvelope = read_success(response).await?;

        self.list_cache
            .store(PROFILE_LIST_TAG, envelope.result.clone())
            .await;
        Ok(envelope.result)
    }

    async fn register_profile(&self, payload: SubmissionPayload) -> Result<StoredProfile> {
        let form = to_multipart(payload)?;
        let response = self
            .client
            .post(self.endpoint("/add"))
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;
        let created: StoredProfile = read_success(response).await?;

        self.list_cache.invalidate(PROFILE_LIST_TAG).await;
        tracing::info!(id = %created.id, "profile created");
        Ok(created)
    }

    async fn update_profile(&self, id: &str, payload: SubmissionPayload) -> Result<StoredProfile> {
        if id.trim().is_empty() {
            return Err(EnrollError::missing_reference("update"));
        }

        let form = to_multipart(payload)?;
        let response = self
            .client
            .put(self.endpoint(&format!("/updateUser/{id}")))
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;
        let updated: StoredProfile = read_success(response).await?;

        self.list_cache.invalidate(PROFILE_LIST_TAG).await;
        tracing::info!(id = %updated.id, "profile updated");
        Ok(updated)
    }

    async fn delete_profile(&self, id: &str) -> Result<String> {
        if id.trim().is_empty() {
            return Err(EnrollError::missing_reference("delete"));
        }

        let response = self
            .client
            .delete(self.endpoint(&format!("/deleteUser/{id}")))
            .send()
            .await
            .map_err(map_request_error)?;
        let envelope: MessageEnvelope = read_success(response).await?;

        self.list_cache.invalidate(PROFILE_LIST_TAG).await;
        tracing::info!(%id, "profile deleted");
        Ok(envelope.message)
    }
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[allow(dead_code)]
    message: String,
    result: Vec<StoredProfile>,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

/// Converts a submission payload into a reqwest multipart form.
fn to_multipart(payload: SubmissionPayload) -> Result<Form> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part.body {
            PartBody::Text(value) => form.text(part.name, value),
            PartBody::File(file) => {
                let file_part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime_type)
                    .map_err(|err| {
                        EnrollError::internal(format!("Invalid MIME type for upload: {err}"))
                    })?;
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

async fn read_success<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(map_http_error(status, body));
    }

    response.json::<T>().await.map_err(|err| {
        EnrollError::serialization("JSON", format!("Failed to parse response: {err}"))
    })
}

/// Maps a failed HTTP response, preferring the server's `{ message }`
/// body when present over the raw text.
fn map_http_error(status: StatusCode, body: String) -> EnrollError {
    let message = serde_json::from_str::<MessageEnvelope>(&body)
        .map(|envelope| envelope.message)
        .unwrap_or(body);
    EnrollError::transport(Some(status.as_u16()), message)
}

/// Maps a request that never produced a response (connect/timeout).
fn map_request_error(err: reqwest::Error) -> EnrollError {
    let status = err.status().map(|status| status.as_u16());
    EnrollError::transport(status, format!("Request failed: {err}"))
}
