//! Store contract
//!
//! One generic capability trait covers all three entity kinds with uniform
//! CRUD semantics. Implementations live elsewhere:
//! - opsboard-stores: in-memory keyed-map backend
//! - opsboard-client: the same contract spoken over HTTP

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Entity;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id does not refer to a live record. `get` never produces this;
    /// absence is a normal outcome there and is reported as `Ok(None)`.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Uniform CRUD capability over one entity kind.
///
/// Semantics shared by every implementation:
/// - `create` mints a fresh unique id, stamps `created_at == updated_at`,
///   applies kind defaults, and never fails for structurally valid input.
///   Required-field validation is the route layer's job, not the store's.
/// - `list` returns an insertion-ordered snapshot; mutating the returned
///   records does not affect the store.
/// - `get` reports absence as `Ok(None)`.
/// - `update` replaces all update-carrying fields (omitted optionals become
///   unset), `patch` merges only supplied fields; both advance `updated_at`
///   and fail with [`StoreError::NotFound`] for unknown ids.
/// - `delete` is idempotent: deleting an unknown id is not an error.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn create(&self, input: E::Create) -> Result<E, StoreError>;

    async fn list(&self) -> Result<Vec<E>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<E>, StoreError>;

    async fn update(&self, id: &str, input: E::Update) -> Result<E, StoreError>;

    async fn patch(&self, id: &str, patch: E::Patch) -> Result<E, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
