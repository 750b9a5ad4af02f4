//! Route-level required-field checks.
//!
//! Validation belongs to the route layer, not the store: the store accepts
//! any structurally valid input. Required string fields are trimmed before
//! storage; blank-after-trim fails. Patch bodies are never validated here --
//! an all-absent patch is a legal no-op mutation.

use opsboard_core::types::{
    CreatePersonInput, CreateProjectInput, CreateTaskInput, UpdatePersonInput, UpdateProjectInput,
    UpdateTaskInput,
};

pub(crate) trait Validated: Sized {
    /// Trim and check required fields; the error is the response message.
    fn validated(self) -> Result<Self, String>;
}

fn required(field: &'static str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(trimmed.to_string())
}

impl Validated for CreatePersonInput {
    fn validated(mut self) -> Result<Self, String> {
        self.name = required("name", self.name)?;
        Ok(self)
    }
}

impl Validated for UpdatePersonInput {
    fn validated(mut self) -> Result<Self, String> {
        self.name = required("name", self.name)?;
        Ok(self)
    }
}

impl Validated for CreateProjectInput {
    fn validated(mut self) -> Result<Self, String> {
        self.name = required("name", self.name)?;
        Ok(self)
    }
}

impl Validated for UpdateProjectInput {
    fn validated(mut self) -> Result<Self, String> {
        self.name = required("name", self.name)?;
        Ok(self)
    }
}

impl Validated for CreateTaskInput {
    fn validated(mut self) -> Result<Self, String> {
        self.title = required("title", self.title)?;
        Ok(self)
    }
}

impl Validated for UpdateTaskInput {
    fn validated(mut self) -> Result<Self, String> {
        self.title = required("title", self.title)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let input = CreatePersonInput {
            name: "   ".to_string(),
            email: None,
        };
        assert_eq!(input.validated().unwrap_err(), "name is required");
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        let input = CreatePersonInput {
            name: "  Ada  ".to_string(),
            email: None,
        };
        assert_eq!(input.validated().unwrap().name, "Ada");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let input = CreateTaskInput {
            title: "".to_string(),
            description: None,
            status: None,
            project_id: None,
            assignee_id: None,
        };
        assert_eq!(input.validated().unwrap_err(), "title is required");
    }
}
