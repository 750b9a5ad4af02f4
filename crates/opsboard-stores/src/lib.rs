//! # Opsboard Stores
//!
//! Minimal store implementations for the Opsboard service.
//!
//! This crate provides:
//! - InMemoryStore: keyed-map backend for all three entity kinds

mod memory;

pub use memory::InMemoryStore;

// Re-export core traits for convenience
pub use opsboard_core::store::{EntityStore, StoreError};
