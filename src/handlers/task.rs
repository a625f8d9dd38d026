use serde::Serialize;

use crate::dashboard::{available_technicians, recommend_technician, technician_stats};
use crate::errors::{StoreError, StoreResult, ValidationError};
use crate::middleware::require_role;
use crate::models::{NewTask, Role, Session, TaskMap, TaxonomyDocument, TaxonomyField};
use crate::services::Stores;

/// Everything an assignment form needs to render its dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOptions {
    pub taxonomy: TaxonomyDocument,
    pub default_cost_center: Option<String>,
    /// Technicians with no pending work, or every technician when none is free.
    pub candidates: Vec<String>,
    pub recommended: Option<String>,
}

pub fn assignment_options(stores: &Stores, session: &Session) -> StoreResult<AssignmentOptions> {
    require_role(session, &[Role::Admin], "assign tasks")?;

    let taxonomy = stores.taxonomy.snapshot()?;
    let technicians = stores.credentials.usernames(Role::Technician)?;
    let tasks = stores.tasks.list_all()?;

    let stats = technician_stats(&tasks, technicians.iter().map(String::as_str));
    let available: Vec<String> = available_technicians(&stats).into_iter().map(str::to_string).collect();
    let candidates = if available.is_empty() { technicians } else { available };
    let recommended = recommend_technician(&stats).map(|s| s.technician.clone());

    Ok(AssignmentOptions {
        default_cost_center: taxonomy.preferred_default(TaxonomyField::CostCenter).map(str::to_string),
        taxonomy,
        candidates,
        recommended,
    })
}

/// Creates a task assigned by the session's admin. Cost center, project and
/// department are required and must be configured values; the assignee must
/// be a registered technician.
pub fn assign_task(stores: &Stores, session: &Session, mut task: NewTask) -> StoreResult<String> {
    require_role(session, &[Role::Admin], "assign tasks")?;

    task.assigned_by = session.username.clone();
    task.validate()?;

    let taxonomy = stores.taxonomy.snapshot()?;
    check_listed(&taxonomy, TaxonomyField::CostCenter, task.cost_center.as_deref(), true)?;
    check_listed(&taxonomy, TaxonomyField::Projects, task.project.as_deref(), true)?;
    check_listed(&taxonomy, TaxonomyField::Departments, task.department.as_deref(), true)?;
    check_listed(&taxonomy, TaxonomyField::Categorization1, task.categorization_1.as_deref(), false)?;
    check_listed(&taxonomy, TaxonomyField::Categorization2, task.categorization_2.as_deref(), false)?;

    if !stores.credentials.exists(Role::Technician, task.assigned_to.trim())? {
        return Err(StoreError::NotFound(format!("technician '{}'", task.assigned_to.trim())));
    }

    if task.assignor.is_none() {
        task.assignor = Some(session.username.clone());
    }
    let urgent = task.urgent;
    let task_id = stores.tasks.create_task(task)?;

    tracing::info!(
        "Admin '{}' assigned {}{}",
        session.username,
        task_id,
        if urgent { " (urgent)" } else { "" }
    );
    Ok(task_id)
}

fn check_listed(
    taxonomy: &TaxonomyDocument,
    field: TaxonomyField,
    value: Option<&str>,
    required: bool,
) -> StoreResult<()> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) if taxonomy.contains(field, value) => Ok(()),
        Some(value) => Err(ValidationError::NotAllowed {
            field: field.label(),
            value: value.to_string(),
        }
        .into()),
        None if required => Err(ValidationError::MissingField(field.label()).into()),
        None => Ok(()),
    }
}

/// Technicians complete only their own tasks.
pub fn complete_task(
    stores: &Stores,
    session: &Session,
    task_id: &str,
    proof_image: &[u8],
    completion_notes: &str,
) -> StoreResult<()> {
    require_role(session, &[Role::Technician], "complete tasks")?;

    let task = stores.tasks.get_task(task_id)?;
    if task.assigned_to != session.username {
        tracing::warn!(
            "Technician '{}' tried to complete {} assigned to '{}'",
            session.username,
            task_id,
            task.assigned_to
        );
        return Err(StoreError::Forbidden(format!("complete task {}", task_id)));
    }

    stores.tasks.complete_task(task_id, proof_image, completion_notes)
}

pub fn my_tasks(stores: &Stores, session: &Session) -> StoreResult<TaskMap> {
    require_role(session, &[Role::Technician], "view assigned tasks")?;
    stores.tasks.list_by_assignee(&session.username)
}

pub fn all_tasks(stores: &Stores, session: &Session) -> StoreResult<TaskMap> {
    require_role(session, &[Role::Admin, Role::SuperAdmin], "view all tasks")?;
    stores.tasks.list_all()
}

/// Super admins maintain the dropdown lists.
pub fn add_taxonomy_value(stores: &Stores, session: &Session, field: TaxonomyField, value: &str) -> StoreResult<bool> {
    require_role(session, &[Role::SuperAdmin], "edit configuration lists")?;
    stores.taxonomy.add_value(field, value)
}

pub fn remove_taxonomy_value(stores: &Stores, session: &Session, field: TaxonomyField, value: &str) -> StoreResult<bool> {
    require_role(session, &[Role::SuperAdmin], "edit configuration lists")?;
    stores.taxonomy.remove_value(field, value)
}
