use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::Role;
use crate::errors::validation::{require, ValidationError, ValidationResult};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub role: Role,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub role: Role,
    pub username: String,
    pub password: String,
}

/// Fields supplied by the assigning admin when a task is created.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub assigned_to: String,
    pub assigned_by: String,
    pub task_description: String,
    pub deadline: Option<NaiveDate>,
    pub urgent: bool,
    pub cost_center: Option<String>,
    pub project: Option<String>,
    pub department: Option<String>,
    pub assignor: Option<String>,
    pub categorization_1: Option<String>,
    pub categorization_2: Option<String>,
    pub identification_no: Option<String>,
}

impl NewTask {
    pub fn new(
        assigned_to: impl Into<String>,
        assigned_by: impl Into<String>,
        task_description: impl Into<String>,
    ) -> Self {
        Self {
            assigned_to: assigned_to.into(),
            assigned_by: assigned_by.into(),
            task_description: task_description.into(),
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn urgent(mut self) -> Self {
        self.urgent = true;
        self
    }

    pub fn with_cost_center(mut self, value: impl Into<String>) -> Self {
        self.cost_center = Some(value.into());
        self
    }

    pub fn with_project(mut self, value: impl Into<String>) -> Self {
        self.project = Some(value.into());
        self
    }

    pub fn with_department(mut self, value: impl Into<String>) -> Self {
        self.department = Some(value.into());
        self
    }

    pub fn with_assignor(mut self, value: impl Into<String>) -> Self {
        self.assignor = Some(value.into());
        self
    }

    pub fn with_categorizations(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.categorization_1 = Some(first.into());
        self.categorization_2 = Some(second.into());
        self
    }

    pub fn with_identification_no(mut self, value: impl Into<String>) -> Self {
        self.identification_no = Some(value.into());
        self
    }

    /// Assignee, assigner, description and deadline are required.
    pub fn validate(&self) -> ValidationResult<()> {
        require("assignee", &self.assigned_to)?;
        require("assigned_by", &self.assigned_by)?;
        require("task_description", &self.task_description)?;
        if self.deadline.is_none() {
            return Err(ValidationError::MissingField("deadline"));
        }
        Ok(())
    }

    /// Trims text fields and drops blank optional metadata.
    pub(crate) fn normalized(mut self) -> Self {
        self.assigned_to = self.assigned_to.trim().to_string();
        self.assigned_by = self.assigned_by.trim().to_string();
        for field in [
            &mut self.cost_center,
            &mut self.project,
            &mut self.department,
            &mut self.assignor,
            &mut self.categorization_1,
            &mut self.categorization_2,
            &mut self.identification_no,
        ] {
            *field = field
                .take()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }
        self
    }
}
