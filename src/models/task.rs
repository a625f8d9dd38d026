use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::forms::NewTask;
use super::timestamp;

pub type TaskMap = BTreeMap<String, TaskRecord>;

// Define task status enum
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub assigned_to: String,
    pub assigned_by: String,
    pub task_description: String,
    pub status: TaskStatus,
    #[serde(with = "timestamp", alias = "assigned_time")]
    pub assigned_date: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorization_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorization_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_no: Option<String>,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default, with = "timestamp::date_option", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    // Completion payload: all three null while pending, all three set once completed.
    #[serde(default, with = "timestamp::option")]
    completion_date: Option<NaiveDateTime>,
    #[serde(default)]
    completion_notes: Option<String>,
    #[serde(default)]
    completion_image: Option<String>,
}

impl TaskRecord {
    /// A fresh pending record with an empty completion payload.
    pub fn pending(task: NewTask, assigned_date: NaiveDateTime) -> Self {
        Self {
            assigned_to: task.assigned_to,
            assigned_by: task.assigned_by,
            task_description: task.task_description,
            status: TaskStatus::Pending,
            assigned_date,
            cost_center: task.cost_center,
            project: task.project,
            department: task.department,
            assignor: task.assignor,
            categorization_1: task.categorization_1,
            categorization_2: task.categorization_2,
            identification_no: task.identification_no,
            urgent: task.urgent,
            deadline: task.deadline,
            completion_date: None,
            completion_notes: None,
            completion_image: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Pending → completed. The whole payload is set in one step; the caller
    /// has already checked the task is still pending.
    pub(crate) fn complete(&mut self, proof_image: &[u8], notes: &str, completed_at: NaiveDateTime) {
        self.status = TaskStatus::Completed;
        self.completion_date = Some(completed_at);
        self.completion_notes = Some(notes.to_string());
        self.completion_image = Some(STANDARD.encode(proof_image));
    }

    pub fn completion_date(&self) -> Option<NaiveDateTime> {
        self.completion_date
    }

    pub fn completion_notes(&self) -> Option<&str> {
        self.completion_notes.as_deref()
    }

    /// Proof image as stored (base64 text).
    pub fn completion_image(&self) -> Option<&str> {
        self.completion_image.as_deref()
    }

    /// Decoded proof image bytes; `None` while pending or if the stored text
    /// is not valid base64.
    pub fn decode_completion_image(&self) -> Option<Vec<u8>> {
        let encoded = self.completion_image.as_deref()?;
        match STANDARD.decode(encoded) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Stored completion image is not valid base64: {}", e);
                None
            }
        }
    }

    /// Whether the deadline has passed for a task still pending on `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.deadline.map_or(false, |deadline| deadline < today)
    }
}

/// On-disk layout of the task document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDocument {
    /// Next sequence number handed to a new task id. Absent in documents
    /// written before the counter existed.
    #[serde(default)]
    pub next_seq: u64,
    #[serde(default)]
    pub tasks: TaskMap,
}

impl TaskDocument {
    /// Highest sequence number embedded in an existing `task_{seq}_...` id.
    pub fn highest_id_sequence(&self) -> u64 {
        self.tasks
            .keys()
            .filter_map(|id| id.strip_prefix("task_")?.split('_').next()?.parse::<u64>().ok())
            .filter(|seq| *seq < u64::MAX)
            .max()
            .unwrap_or(0)
    }
}
