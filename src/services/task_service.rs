use std::path::PathBuf;

use super::document::JsonDocument;
use crate::errors::validation::require;
use crate::errors::{StoreError, StoreResult, ValidationError};
use crate::models::timestamp::{self, ID_STAMP_FORMAT};
use crate::models::{NewTask, TaskDocument, TaskMap, TaskRecord};

#[derive(Clone)]
pub struct TaskService {
    document: JsonDocument<TaskDocument>,
}

impl TaskService {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let document: JsonDocument<TaskDocument> = JsonDocument::new(path, || Ok(TaskDocument::default()));
        document.ensure()?;
        Ok(Self { document })
    }

    /// Inserts a pending task and returns its id, `task_{seq}_{YYYYMMDD_HHMMSS}`.
    /// `seq` comes from the counter stored in the document and is allocated
    /// under the document lock, so ids never repeat within a process.
    pub fn create_task(&self, task: NewTask) -> StoreResult<String> {
        task.validate()?;
        let task = task.normalized();
        let assignee = task.assigned_to.clone();

        let task_id = self.document.update(|doc| {
            let now = timestamp::now();
            let stamp = now.format(ID_STAMP_FORMAT).to_string();

            // Legacy documents have no counter; resume above anything already used.
            let mut seq = doc
                .next_seq
                .max(doc.highest_id_sequence().saturating_add(1))
                .max((doc.tasks.len() as u64).saturating_add(1));
            let mut task_id = format!("task_{}_{}", seq, stamp);
            while doc.tasks.contains_key(&task_id) {
                seq = seq
                    .checked_add(1)
                    .ok_or_else(|| StoreError::AlreadyExists(format!("task {}", task_id)))?;
                task_id = format!("task_{}_{}", seq, stamp);
            }

            doc.next_seq = seq.saturating_add(1);
            doc.tasks.insert(task_id.clone(), TaskRecord::pending(task, now));
            Ok(task_id)
        })?;

        tracing::info!("Created task {} for {}", task_id, assignee);
        Ok(task_id)
    }

    /// Pending → completed, setting date, notes and proof image together.
    /// Completing a task twice is rejected so the first proof is never overwritten.
    pub fn complete_task(&self, task_id: &str, proof_image: &[u8], notes: &str) -> StoreResult<()> {
        require("completion_notes", notes)?;
        if proof_image.is_empty() {
            return Err(ValidationError::MissingField("proof_image").into());
        }

        self.document.update(|doc| {
            let record = doc.tasks.get_mut(task_id).ok_or_else(|| {
                tracing::warn!("Task not found: {}", task_id);
                StoreError::task_not_found(task_id)
            })?;
            if record.is_completed() {
                tracing::warn!("Task {} is already completed", task_id);
                return Err(StoreError::AlreadyCompleted(task_id.to_string()));
            }
            record.complete(proof_image, notes.trim(), timestamp::now());
            Ok(())
        })?;

        tracing::info!("Task {} completed", task_id);
        Ok(())
    }

    pub fn get_task(&self, task_id: &str) -> StoreResult<TaskRecord> {
        self.document
            .read()?
            .tasks
            .remove(task_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))
    }

    pub fn list_by_assignee(&self, username: &str) -> StoreResult<TaskMap> {
        let tasks = self.filtered(|task| task.assigned_to == username)?;
        tracing::debug!("{} tasks assigned to {}", tasks.len(), username);
        Ok(tasks)
    }

    pub fn list_by_assigner(&self, username: &str) -> StoreResult<TaskMap> {
        self.filtered(|task| task.assigned_by == username)
    }

    pub fn list_all(&self) -> StoreResult<TaskMap> {
        Ok(self.document.read()?.tasks)
    }

    fn filtered(&self, keep: impl Fn(&TaskRecord) -> bool) -> StoreResult<TaskMap> {
        let mut tasks = self.list_all()?;
        tasks.retain(|_, task| keep(task));
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn task(assignee: &str) -> NewTask {
        NewTask::new(assignee, "admin", "Check harness")
            .with_deadline(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
    }

    #[test]
    fn ids_resume_after_legacy_sequence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"{"tasks": {"task_5_20240101_090000": {
                "assigned_to": "a", "assigned_by": "b", "task_description": "c",
                "status": "pending", "assigned_date": "2024-01-01 09:00:00",
                "completion_image": null, "completion_date": null, "completion_notes": null
            }}}"#,
        )
        .unwrap();
        let service = TaskService::open(&path).unwrap();

        let id = service.create_task(task("tech")).unwrap();
        assert!(id.starts_with("task_6_"), "unexpected id {}", id);
        let id = service.create_task(task("tech")).unwrap();
        assert!(id.starts_with("task_7_"), "unexpected id {}", id);
    }

    #[test]
    fn oversized_sequences_do_not_overflow() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"{"next_seq": 18446744073709551615, "tasks": {"task_18446744073709551615_x": {
                "assigned_to": "a", "assigned_by": "b", "task_description": "c",
                "status": "pending", "assigned_date": "2024-01-01 09:00:00",
                "completion_image": null, "completion_date": null, "completion_notes": null
            }}}"#,
        )
        .unwrap();
        let service = TaskService::open(&path).unwrap();

        let id = service.create_task(task("tech")).unwrap();
        assert!(id.starts_with("task_18446744073709551615_"), "unexpected id {}", id);
        assert_eq!(service.list_all().unwrap().len(), 2);
    }

    #[test]
    fn invalid_task_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let service = TaskService::open(dir.path().join("tasks.json")).unwrap();
        let result = service.create_task(NewTask::new("tech", "admin", "no deadline"));
        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::MissingField("deadline")))
        ));
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn filters_by_assignee_and_assigner() {
        let dir = TempDir::new().unwrap();
        let service = TaskService::open(dir.path().join("tasks.json")).unwrap();
        service.create_task(task("ann")).unwrap();
        service.create_task(task("bob")).unwrap();
        service
            .create_task(NewTask::new("ann", "lead", "Other").with_deadline(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()))
            .unwrap();

        assert_eq!(service.list_by_assignee("ann").unwrap().len(), 2);
        assert_eq!(service.list_by_assignee("bob").unwrap().len(), 1);
        assert!(service.list_by_assignee("nobody").unwrap().is_empty());
        assert_eq!(service.list_by_assigner("admin").unwrap().len(), 2);
        assert_eq!(service.list_all().unwrap().len(), 3);
    }

    #[test]
    fn completion_requires_notes_and_image() {
        let dir = TempDir::new().unwrap();
        let service = TaskService::open(dir.path().join("tasks.json")).unwrap();
        let id = service.create_task(task("ann")).unwrap();

        assert!(matches!(
            service.complete_task(&id, b"img", "  "),
            Err(StoreError::Validation(ValidationError::MissingField("completion_notes")))
        ));
        assert!(matches!(
            service.complete_task(&id, b"", "done"),
            Err(StoreError::Validation(ValidationError::MissingField("proof_image")))
        ));
        assert!(service.get_task(&id).unwrap().is_pending());
    }
}
