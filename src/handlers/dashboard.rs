use serde::Serialize;

use crate::dashboard::{
    admin_stats, available_technicians, efficiency_score, recommend_technician, stats_for_technician,
    task_summary, team_overview, technician_stats, AdminStats, TaskSummary, TeamOverview, TechnicianStats,
};
use crate::errors::StoreResult;
use crate::middleware::require_role;
use crate::models::{Role, Session, TaskMap};
use crate::services::Stores;

#[derive(Debug, Clone, Serialize)]
pub struct TechnicianDashboard {
    pub stats: TechnicianStats,
    pub efficiency_points: u32,
    pub tasks: TaskMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub summary: TaskSummary,
    pub technicians: Vec<TechnicianStats>,
    pub available: Vec<String>,
    pub recommended: Option<String>,
    pub overview: TeamOverview,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuperAdminOverview {
    pub summary: TaskSummary,
    pub admins: Vec<AdminStats>,
    pub technicians: Vec<TechnicianStats>,
}

pub fn technician_dashboard(stores: &Stores, session: &Session) -> StoreResult<TechnicianDashboard> {
    require_role(session, &[Role::Technician], "view the technician dashboard")?;
    tracing::info!("Building dashboard for technician '{}'", session.username);

    let tasks = stores.tasks.list_by_assignee(&session.username)?;
    let stats = stats_for_technician(&tasks, &session.username);

    Ok(TechnicianDashboard {
        efficiency_points: efficiency_score(&tasks, &session.username),
        stats,
        tasks,
    })
}

pub fn admin_dashboard(stores: &Stores, session: &Session) -> StoreResult<AdminDashboard> {
    require_role(session, &[Role::Admin], "view the admin dashboard")?;
    tracing::info!("Building admin dashboard for '{}'", session.username);

    let tasks = stores.tasks.list_all()?;
    let technicians = stores.credentials.usernames(Role::Technician)?;
    let stats = technician_stats(&tasks, technicians.iter().map(String::as_str));

    let available = available_technicians(&stats).into_iter().map(str::to_string).collect();
    let recommended = recommend_technician(&stats).map(|s| s.technician.clone());
    tracing::debug!("Recommended technician: {:?}", recommended);

    Ok(AdminDashboard {
        summary: task_summary(&tasks),
        overview: team_overview(&stats),
        technicians: stats,
        available,
        recommended,
    })
}

pub fn super_admin_overview(stores: &Stores, session: &Session) -> StoreResult<SuperAdminOverview> {
    require_role(session, &[Role::SuperAdmin], "view the account overview")?;

    let tasks = stores.tasks.list_all()?;
    let admins = stores.credentials.usernames(Role::Admin)?;
    let technicians = stores.credentials.usernames(Role::Technician)?;

    Ok(SuperAdminOverview {
        summary: task_summary(&tasks),
        admins: admin_stats(&tasks, admins.iter().map(String::as_str)),
        technicians: technician_stats(&tasks, technicians.iter().map(String::as_str)),
    })
}
