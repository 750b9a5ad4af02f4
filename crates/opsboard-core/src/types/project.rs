//! Project type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{mint_id, Entity, EntityId};

/// A unit of work, optionally owned by a person.
///
/// `owner_id` is semantically a Person id but is never validated against the
/// people table; dangling references are allowed and read back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
}

/// Partial update: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<EntityId>,
}

impl Entity for Project {
    type Create = CreateProjectInput;
    type Update = UpdateProjectInput;
    type Patch = ProjectPatch;

    const KIND: &'static str = "project";

    fn new(input: CreateProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: mint_id(),
            name: input.name,
            description: input.description,
            owner_id: input.owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply_update(&mut self, input: UpdateProjectInput) {
        self.name = input.name;
        self.description = input.description;
        self.owner_id = input.owner_id;
        self.updated_at = Utc::now();
    }

    fn apply_patch(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = Some(owner_id);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_owner_reference_is_kept() {
        let project = Project::new(CreateProjectInput {
            name: "Apollo".to_string(),
            description: None,
            owner_id: Some("no-such-person".to_string()),
        });

        assert_eq!(project.owner_id.as_deref(), Some("no-such-person"));
    }

    #[test]
    fn test_update_clears_omitted_optionals() {
        let mut project = Project::new(CreateProjectInput {
            name: "Apollo".to_string(),
            description: Some("moonshot".to_string()),
            owner_id: Some("p1".to_string()),
        });

        project.apply_update(UpdateProjectInput {
            name: "Apollo 11".to_string(),
            description: None,
            owner_id: None,
        });

        assert_eq!(project.name, "Apollo 11");
        assert_eq!(project.description, None);
        assert_eq!(project.owner_id, None);
    }

    #[test]
    fn test_patch_merges_only_supplied_fields() {
        let mut project = Project::new(CreateProjectInput {
            name: "Apollo".to_string(),
            description: Some("moonshot".to_string()),
            owner_id: None,
        });

        project.apply_patch(ProjectPatch {
            owner_id: Some("p1".to_string()),
            ..ProjectPatch::default()
        });

        assert_eq!(project.name, "Apollo");
        assert_eq!(project.description.as_deref(), Some("moonshot"));
        assert_eq!(project.owner_id.as_deref(), Some("p1"));
    }
}
