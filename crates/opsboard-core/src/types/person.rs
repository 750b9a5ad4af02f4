//! Person type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{mint_id, Entity, EntityId};

/// A member of the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier, assigned by the store.
    pub id: EntityId,
    /// Display name, never blank.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Reassigned on every successful mutation.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial update: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Entity for Person {
    type Create = CreatePersonInput;
    type Update = UpdatePersonInput;
    type Patch = PersonPatch;

    const KIND: &'static str = "person";

    fn new(input: CreatePersonInput) -> Self {
        let now = Utc::now();
        Self {
            id: mint_id(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply_update(&mut self, input: UpdatePersonInput) {
        self.name = input.name;
        self.email = input.email;
        self.updated_at = Utc::now();
    }

    fn apply_patch(&mut self, patch: PersonPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        self.updated_at = Utc::now();
    }
}
