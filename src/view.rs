use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Status, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Default,
    DateAsc,
    DateDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == Status::Pending,
            StatusFilter::Completed => status == Status::Completed,
        }
    }
}

/// The displayed list: a transient projection of the canonical collection.
/// Each projector operation REPLACES the whole list from canonical state,
/// so filter, sort and search never compose with one another. Any store
/// mutation resets the view to "show everything". Reset-on-mutate is a
/// known UX tradeoff kept for predictability over composed projections.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    displayed: Vec<Todo>,
    /// True only when the last projection was a search that matched nothing;
    /// rendering shows a placeholder row instead of an empty list.
    searched_empty: bool,
}

impl ViewState {
    pub fn displayed(&self) -> &[Todo] {
        &self.displayed
    }

    pub fn searched_empty(&self) -> bool {
        self.searched_empty
    }

    /// Mirrors the canonical list in insertion order.
    pub fn reset(&mut self, todos: &[Todo]) {
        self.displayed = todos.to_vec();
        self.searched_empty = false;
    }

    /// Stable sort by calendar due date. A missing due date sorts as the
    /// farthest-future date: last ascending, first descending.
    pub fn apply_sort(&mut self, todos: &[Todo], order: SortOrder) {
        self.searched_empty = false;
        match order {
            SortOrder::Default => {
                self.displayed = todos.to_vec();
            }
            SortOrder::DateAsc => {
                let mut sorted = todos.to_vec();
                sorted.sort_by_key(|t| sort_key(t.due_date));
                self.displayed = sorted;
            }
            SortOrder::DateDesc => {
                let mut sorted = todos.to_vec();
                sorted.sort_by(|a, b| sort_key(b.due_date).cmp(&sort_key(a.due_date)));
                self.displayed = sorted;
            }
        }
    }

    pub fn apply_filter(&mut self, todos: &[Todo], filter: StatusFilter) {
        self.searched_empty = false;
        self.displayed = todos
            .iter()
            .filter(|t| filter.matches(t.status))
            .cloned()
            .collect();
    }

    /// Case-insensitive substring match on todo text only; subtask text is
    /// not searched. A blank term resets to the full canonical list.
    pub fn apply_search(&mut self, todos: &[Todo], term: &str) {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            self.reset(todos);
            return;
        }
        self.displayed = todos
            .iter()
            .filter(|t| t.text.to_lowercase().contains(&term))
            .cloned()
            .collect();
        self.searched_empty = self.displayed.is_empty();
    }
}

fn sort_key(due_date: Option<NaiveDate>) -> NaiveDate {
    due_date.unwrap_or(NaiveDate::MAX)
}
