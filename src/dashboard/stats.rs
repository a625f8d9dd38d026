use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{TaskMap, TaskRecord};

pub const POINTS_PER_COMPLETED_TASK: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianStats {
    pub technician: String,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Most recent completion among this technician's tasks.
    pub last_completed: Option<NaiveDateTime>,
}

impl TechnicianStats {
    fn empty(technician: &str) -> Self {
        Self {
            technician: technician.to_string(),
            total: 0,
            completed: 0,
            pending: 0,
            last_completed: None,
        }
    }

    fn record(&mut self, task: &TaskRecord) {
        self.total += 1;
        if task.is_completed() {
            self.completed += 1;
            self.last_completed = self.last_completed.max(task.completion_date());
        } else {
            self.pending += 1;
        }
    }

    /// Completed share in percent, rounded to one decimal; 0 with no tasks.
    pub fn completion_rate(&self) -> f64 {
        percent(self.completed, self.total)
    }

    pub fn efficiency_points(&self) -> u32 {
        points_for(self.completed)
    }

    pub fn is_available(&self) -> bool {
        self.pending == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub admin: String,
    pub total: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub urgent_pending: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverview {
    pub technicians: usize,
    pub total: usize,
    pub completed: usize,
    pub average_completion_rate: f64,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

/// One entry per roster name, in roster order, including technicians with no tasks.
pub fn technician_stats<'a>(
    tasks: &TaskMap,
    technicians: impl IntoIterator<Item = &'a str>,
) -> Vec<TechnicianStats> {
    technicians
        .into_iter()
        .map(|technician| stats_for_technician(tasks, technician))
        .collect()
}

pub fn stats_for_technician(tasks: &TaskMap, technician: &str) -> TechnicianStats {
    let mut stats = TechnicianStats::empty(technician);
    tasks
        .values()
        .filter(|task| task.assigned_to == technician)
        .for_each(|task| stats.record(task));
    stats
}

/// One entry per distinct assignee found in the snapshot, sorted by name.
pub fn technician_stats_by_assignee(tasks: &TaskMap) -> Vec<TechnicianStats> {
    let mut assignees: Vec<&str> = tasks.values().map(|t| t.assigned_to.as_str()).collect();
    assignees.sort_unstable();
    assignees.dedup();
    technician_stats(tasks, assignees)
}

pub fn admin_stats<'a>(tasks: &TaskMap, admins: impl IntoIterator<Item = &'a str>) -> Vec<AdminStats> {
    admins
        .into_iter()
        .map(|admin| {
            let assigned = tasks.values().filter(|task| task.assigned_by == admin);
            let (total, pending) = assigned.fold((0, 0), |(total, pending), task| {
                (total + 1, pending + usize::from(task.is_pending()))
            });
            AdminStats {
                admin: admin.to_string(),
                total,
                pending,
            }
        })
        .collect()
}

pub fn admin_stats_by_assigner(tasks: &TaskMap) -> Vec<AdminStats> {
    let mut assigners: Vec<&str> = tasks.values().map(|t| t.assigned_by.as_str()).collect();
    assigners.sort_unstable();
    assigners.dedup();
    admin_stats(tasks, assigners)
}

pub fn task_summary(tasks: &TaskMap) -> TaskSummary {
    tasks.values().fold(TaskSummary::default(), |mut summary, task| {
        summary.total += 1;
        if task.is_completed() {
            summary.completed += 1;
        } else {
            summary.pending += 1;
            if task.urgent {
                summary.urgent_pending += 1;
            }
        }
        summary
    })
}

/// Totals across technicians; the average rate is completed / total over
/// everyone, not a mean of per-technician rates.
pub fn team_overview(stats: &[TechnicianStats]) -> TeamOverview {
    let total = stats.iter().map(|s| s.total).sum();
    let completed = stats.iter().map(|s| s.completed).sum();
    TeamOverview {
        technicians: stats.len(),
        total,
        completed,
        average_completion_rate: percent(completed, total),
    }
}

/// Points earned by `username`: completed tasks × 10.
pub fn efficiency_score(tasks: &TaskMap, username: &str) -> u32 {
    let completed = tasks
        .values()
        .filter(|task| task.assigned_to == username && task.is_completed())
        .count();
    points_for(completed)
}

/// Saturates at `u32::MAX` instead of wrapping.
fn points_for(completed: usize) -> u32 {
    u32::try_from(completed)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_COMPLETED_TASK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{at, snapshot};

    #[test]
    fn per_technician_counts() {
        let tasks = snapshot(&[
            ("t1", "A", "boss", None),
            ("t2", "A", "boss", Some("2024-02-01 10:00:00")),
            ("t3", "B", "boss", None),
        ]);
        let stats = technician_stats_by_assignee(&tasks);

        assert_eq!(stats.len(), 2);
        assert_eq!((stats[0].technician.as_str(), stats[0].total, stats[0].completed, stats[0].pending), ("A", 2, 1, 1));
        assert_eq!((stats[1].technician.as_str(), stats[1].total, stats[1].completed, stats[1].pending), ("B", 1, 0, 1));
        assert_eq!(stats[0].last_completed, Some(at("2024-02-01 10:00:00")));
        assert_eq!(stats[1].last_completed, None);
    }

    #[test]
    fn last_completed_is_the_latest_not_the_last_seen() {
        let tasks = snapshot(&[
            ("t1", "A", "boss", Some("2024-03-05 09:00:00")),
            ("t2", "A", "boss", Some("2024-01-01 09:00:00")),
        ]);
        let stats = technician_stats(&tasks, ["A"]);
        assert_eq!(stats[0].last_completed, Some(at("2024-03-05 09:00:00")));
    }

    #[test]
    fn roster_includes_idle_technicians() {
        let tasks = snapshot(&[("t1", "A", "boss", None)]);
        let stats = technician_stats(&tasks, ["C", "A"]);
        assert_eq!(stats[0].technician, "C");
        assert_eq!(stats[0].total, 0);
        assert_eq!(stats[0].completion_rate(), 0.0);
        assert!(stats[0].is_available());
        assert_eq!(stats[1].pending, 1);
    }

    #[test]
    fn completion_rate_rounds_to_one_decimal() {
        let tasks = snapshot(&[
            ("t1", "A", "boss", Some("2024-01-02 00:00:00")),
            ("t2", "A", "boss", None),
            ("t3", "A", "boss", None),
        ]);
        let stats = technician_stats(&tasks, ["A"]);
        assert_eq!(stats[0].completion_rate(), 33.3);
        assert_eq!(stats[0].efficiency_points(), 10);
    }

    #[test]
    fn efficiency_points_saturate() {
        let stats = TechnicianStats {
            completed: usize::MAX,
            ..TechnicianStats::empty("A")
        };
        assert_eq!(stats.efficiency_points(), u32::MAX);
        assert_eq!(points_for(u32::MAX as usize / 10 + 1), u32::MAX);
        assert_eq!(points_for(3), 30);
    }

    #[test]
    fn admin_counts() {
        let tasks = snapshot(&[
            ("t1", "A", "ops", None),
            ("t2", "B", "ops", Some("2024-01-02 00:00:00")),
            ("t3", "B", "lead", None),
        ]);
        let stats = admin_stats(&tasks, ["ops", "lead", "idle"]);
        assert_eq!(stats[0], AdminStats { admin: "ops".into(), total: 2, pending: 1 });
        assert_eq!(stats[1], AdminStats { admin: "lead".into(), total: 1, pending: 1 });
        assert_eq!(stats[2], AdminStats { admin: "idle".into(), total: 0, pending: 0 });
        assert_eq!(admin_stats_by_assigner(&tasks).len(), 2);
    }

    #[test]
    fn summary_and_overview() {
        let mut tasks = snapshot(&[
            ("t1", "A", "ops", None),
            ("t2", "B", "ops", Some("2024-01-02 00:00:00")),
            ("t3", "B", "ops", None),
        ]);
        tasks.get_mut("t3").unwrap().urgent = true;

        assert_eq!(
            task_summary(&tasks),
            TaskSummary { total: 3, pending: 2, completed: 1, urgent_pending: 1 }
        );

        let overview = team_overview(&technician_stats_by_assignee(&tasks));
        assert_eq!(overview.technicians, 2);
        assert_eq!(overview.total, 3);
        assert_eq!(overview.completed, 1);
        assert_eq!(overview.average_completion_rate, 33.3);
        assert_eq!(team_overview(&[]).average_completion_rate, 0.0);
    }

    #[test]
    fn efficiency_is_ten_points_per_completion() {
        let tasks = snapshot(&[
            ("t1", "A", "ops", Some("2024-01-02 00:00:00")),
            ("t2", "A", "ops", Some("2024-01-03 00:00:00")),
            ("t3", "A", "ops", None),
        ]);
        assert_eq!(efficiency_score(&tasks, "A"), 20);
        assert_eq!(efficiency_score(&tasks, "B"), 0);
    }

    #[test]
    fn aggregation_does_not_touch_snapshot() {
        let tasks = snapshot(&[("t1", "A", "ops", None)]);
        let before = tasks.clone();
        let _ = technician_stats_by_assignee(&tasks);
        let _ = admin_stats_by_assigner(&tasks);
        let _ = task_summary(&tasks);
        assert_eq!(tasks, before);
    }
}
