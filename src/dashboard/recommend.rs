use std::cmp::Ordering;

use super::stats::TechnicianStats;

/// Technicians with no pending work, in input order.
pub fn available_technicians(stats: &[TechnicianStats]) -> Vec<&str> {
    stats
        .iter()
        .filter(|s| s.is_available())
        .map(|s| s.technician.as_str())
        .collect()
}

// Fewest pending, then fewest total, then longest since last completion
// (never completed first), then name.
fn workload_order(a: &TechnicianStats, b: &TechnicianStats) -> Ordering {
    a.pending
        .cmp(&b.pending)
        .then(a.total.cmp(&b.total))
        .then(a.last_completed.cmp(&b.last_completed))
        .then_with(|| a.technician.cmp(&b.technician))
}

/// Least-loaded first.
pub fn rank_technicians(stats: &[TechnicianStats]) -> Vec<&TechnicianStats> {
    let mut ranked: Vec<&TechnicianStats> = stats.iter().collect();
    ranked.sort_by(|a, b| workload_order(a, b));
    ranked
}

pub fn recommend_technician(stats: &[TechnicianStats]) -> Option<&TechnicianStats> {
    stats.iter().min_by(|a, b| workload_order(a, b))
}
