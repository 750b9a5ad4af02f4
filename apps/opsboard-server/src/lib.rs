//! # Opsboard Server
//!
//! Axum route layer over the `EntityStore` contract.
//!
//! Responsibilities:
//! - map HTTP verbs/paths to store calls for each entity kind
//! - required-field validation on create/update bodies
//! - translate failures into `{message}` responses (400/404/500)
//! - CORS restricted to the single configured origin
//!
//! Everything else (identity, timestamps, update-vs-patch semantics) lives
//! behind the store contract.

mod error;
mod routes;
mod validate;

pub use routes::{app, AppState};
