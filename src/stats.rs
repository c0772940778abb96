use serde::Serialize;

use crate::models::Todo;

/// Aggregate completion counters shown above the list. Todos and subtasks
/// weigh the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percentage: u8,
}

/// Pure function of the canonical collection; the displayed/filtered view
/// never influences the counters.
pub fn compute_stats(todos: &[Todo]) -> Stats {
    let total = todos.len() + todos.iter().map(|t| t.subtasks.len()).sum::<usize>();
    let completed = todos.iter().filter(|t| t.status.is_completed()).count()
        + todos
            .iter()
            .map(|t| t.subtasks.iter().filter(|s| s.status.is_completed()).count())
            .sum::<usize>();
    let percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };
    Stats {
        total,
        completed,
        pending: total - completed,
        percentage,
    }
}
