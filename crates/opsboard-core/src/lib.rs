//! # Opsboard Core
//!
//! Shared abstractions for the Opsboard service.
//!
//! This crate contains:
//! - Person / Project / Task record types and their input shapes
//! - The `EntityStore` contract shared by every storage backend
//! - `StoreError`
//!
//! This crate does NOT care about:
//! - How records are stored (see opsboard-stores)
//! - How the contract is exposed over HTTP (see opsboard-server / opsboard-client)

pub mod store;
pub mod types;

pub use store::{EntityStore, StoreError};
pub use types::{
    CreatePersonInput, CreateProjectInput, CreateTaskInput, Entity, EntityId, Person, PersonPatch,
    Project, ProjectPatch, Task, TaskPatch, TaskStatus, UpdatePersonInput, UpdateProjectInput,
    UpdateTaskInput,
};
