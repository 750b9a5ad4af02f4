//! # Opsboard Client
//!
//! HTTP client speaking the `EntityStore` contract against a running
//! Opsboard server. [`ApiClient`] implements `EntityStore<Person>`,
//! `EntityStore<Project>`, and `EntityStore<Task>`, so callers written
//! against the contract work unchanged over the wire.
//!
//! Failure translation:
//! - 404 -> `StoreError::NotFound` (except `get`, where absence is `Ok(None)`)
//! - other non-2xx -> `StoreError::Internal` carrying status and the server's
//!   `{message}` body
//! - transport failures -> `StoreError::Connection`
//! - body decode failures -> `StoreError::Serialization`
//! - 204 -> void success

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use opsboard_core::store::{EntityStore, StoreError};
use opsboard_core::types::{Entity, Person, Project, Task};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maps an entity kind to its collection segment under `/api`.
pub trait Resource: Entity {
    const COLLECTION: &'static str;
}

impl Resource for Person {
    const COLLECTION: &'static str = "people";
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
}

impl Resource for Task {
    const COLLECTION: &'static str = "tasks";
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    ok: bool,
}

/// HTTP implementation of the store contract.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against a server base URL such as
    /// `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/{}", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, collection, id)
    }

    pub async fn health(&self) -> Result<bool, StoreError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(transport)?;
        let body: HealthBody = check_status(response).await?.json().await.map_err(decode)?;
        Ok(body.ok)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Connection(err.to_string())
}

fn decode(err: reqwest::Error) -> StoreError {
    StoreError::Serialization(err.to_string())
}

/// Pass 2xx responses through; translate everything else into a failure
/// carrying the status and the server's `{message}` body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    if status == StatusCode::NOT_FOUND {
        Err(StoreError::NotFound(message))
    } else {
        Err(StoreError::Internal(format!(
            "{}: {}",
            status.as_u16(),
            message
        )))
    }
}

#[async_trait]
impl<E> EntityStore<E> for ApiClient
where
    E: Resource + DeserializeOwned,
    E::Create: Serialize,
    E::Update: Serialize,
    E::Patch: Serialize,
{
    async fn create(&self, input: E::Create) -> Result<E, StoreError> {
        let response = self
            .http
            .post(self.collection_url(E::COLLECTION))
            .json(&input)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?.json().await.map_err(decode)
    }

    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let response = self
            .http
            .get(self.collection_url(E::COLLECTION))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?.json().await.map_err(decode)
    }

    async fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        let response = self
            .http
            .get(self.record_url(E::COLLECTION, id))
            .send()
            .await
            .map_err(transport)?;
        // Absence is a normal outcome for get, not a failure.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let entity = check_status(response).await?.json().await.map_err(decode)?;
        Ok(Some(entity))
    }

    async fn update(&self, id: &str, input: E::Update) -> Result<E, StoreError> {
        let response = self
            .http
            .put(self.record_url(E::COLLECTION, id))
            .json(&input)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?.json().await.map_err(decode)
    }

    async fn patch(&self, id: &str, patch: E::Patch) -> Result<E, StoreError> {
        let response = self
            .http
            .patch(self.record_url(E::COLLECTION, id))
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?.json().await.map_err(decode)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.record_url(E::COLLECTION, id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}
