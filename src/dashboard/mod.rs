//! Derived statistics over a task snapshot.
//!
//! Everything here is a pure function of its inputs: nothing is persisted and
//! the snapshot is only borrowed.

mod recommend;
mod stats;

pub use recommend::{available_technicians, rank_technicians, recommend_technician};
pub use stats::{
    admin_stats, admin_stats_by_assigner, efficiency_score, stats_for_technician, task_summary,
    team_overview, technician_stats, technician_stats_by_assignee, AdminStats, TaskSummary, TeamOverview,
    TechnicianStats, POINTS_PER_COMPLETED_TASK,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;

    use crate::models::timestamp::TIMESTAMP_FORMAT;
    use crate::models::{NewTask, TaskMap, TaskRecord};

    pub fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap()
    }

    /// `(id, assignee, assigner, completed_at)`
    pub fn snapshot(rows: &[(&str, &str, &str, Option<&str>)]) -> TaskMap {
        rows.iter()
            .map(|(id, to, by, completed_at)| {
                let mut record = TaskRecord::pending(NewTask::new(*to, *by, "work"), at("2024-01-01 08:00:00"));
                if let Some(done) = completed_at {
                    record.complete(b"proof", "done", at(done));
                }
                (id.to_string(), record)
            })
            .collect()
    }
}
