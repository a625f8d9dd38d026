//! Role-checked operations for the presentation layer. Every call takes the
//! caller's [`Session`](crate::models::Session) explicitly.

mod auth;
mod dashboard;
mod task;

pub use auth::{list_accounts, login, register_account, remove_account};
pub use dashboard::{
    admin_dashboard, super_admin_overview, technician_dashboard, AdminDashboard, SuperAdminOverview,
    TechnicianDashboard,
};
pub use task::{
    add_taxonomy_value, all_tasks, assign_task, assignment_options, complete_task, my_tasks,
    remove_taxonomy_value, AssignmentOptions,
};
