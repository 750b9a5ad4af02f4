//! Task type definitions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{mint_id, Entity, EntityId};

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown status '{}', expected todo | in_progress | done",
                other
            )),
        }
    }
}

/// A tracked item, optionally tied to a project and an assignee.
///
/// `project_id` and `assignee_id` are unvalidated references; dangling values
/// are allowed and read back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `todo` when absent.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
}

/// Partial update: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<EntityId>,
}

impl Entity for Task {
    type Create = CreateTaskInput;
    type Update = UpdateTaskInput;
    type Patch = TaskPatch;

    const KIND: &'static str = "task";

    fn new(input: CreateTaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: mint_id(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            project_id: input.project_id,
            assignee_id: input.assignee_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply_update(&mut self, input: UpdateTaskInput) {
        self.title = input.title;
        self.description = input.description;
        self.status = input.status;
        self.project_id = input.project_id;
        self.assignee_id = input.assignee_id;
        self.updated_at = Utc::now();
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(project_id) = patch.project_id {
            self.project_id = Some(project_id);
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = Some(assignee_id);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input(title: &str) -> CreateTaskInput {
        CreateTaskInput {
            title: title.to_string(),
            description: None,
            status: None,
            project_id: None,
            assignee_id: None,
        }
    }

    #[test]
    fn test_new_task_defaults_status_to_todo() {
        let task = Task::new(sample_input("T"));
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_new_task_keeps_explicit_status() {
        let task = Task::new(CreateTaskInput {
            status: Some(TaskStatus::Done),
            ..sample_input("T")
        });
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_wire_shape_is_snake_case() {
        let task = Task::new(CreateTaskInput {
            status: Some(TaskStatus::InProgress),
            ..sample_input("T")
        });
        let json = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(json["status"], "in_progress");
    }

    #[test]
    fn test_patch_changes_only_supplied_fields() {
        let mut task = Task::new(CreateTaskInput {
            description: Some("first pass".to_string()),
            ..sample_input("Write parser")
        });

        task.apply_patch(TaskPatch {
            status: Some(TaskStatus::InProgress),
            assignee_id: Some("p1".to_string()),
            ..TaskPatch::default()
        });

        assert_eq!(task.title, "Write parser");
        assert_eq!(task.description.as_deref(), Some("first pass"));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.assignee_id.as_deref(), Some("p1"));
        assert_eq!(task.project_id, None);
    }

    #[test]
    fn test_update_replaces_every_field() {
        let mut task = Task::new(CreateTaskInput {
            description: Some("first pass".to_string()),
            project_id: Some("proj".to_string()),
            ..sample_input("Write parser")
        });

        task.apply_update(UpdateTaskInput {
            title: "Rewrite parser".to_string(),
            description: None,
            status: TaskStatus::Done,
            project_id: None,
            assignee_id: None,
        });

        assert_eq!(task.title, "Rewrite parser");
        assert_eq!(task.description, None);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.project_id, None);
    }
}
