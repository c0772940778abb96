use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Status;
use crate::view::ViewState;

/// Action affordances a row carries. Which set applies is fixed by row kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ToggleComplete,
    AddSubtask,
    Edit,
    Delete,
}

pub const TODO_ACTIONS: [Action; 4] = [
    Action::ToggleComplete,
    Action::AddSubtask,
    Action::Edit,
    Action::Delete,
];

pub const SUBTASK_ACTIONS: [Action; 3] = [Action::ToggleComplete, Action::Edit, Action::Delete];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TodoRow {
    pub id: String,
    pub text: String,
    pub due_label: String,
    pub status: Status,
    pub subtask_count: usize,
    /// The expand/collapse affordance is shown only when subtasks exist.
    pub expandable: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubtaskRow {
    pub todo_id: String,
    pub id: String,
    pub text: String,
    pub due_label: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListRow {
    Todo(TodoRow),
    Subtask(SubtaskRow),
    /// Shown instead of an empty list when a search matched nothing.
    NoResults,
}

/// Day/month ordering of the displayed date. Comparison and validation
/// always work on calendar dates; only labels go through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    DayFirst,
    MonthFirst,
}

impl DateStyle {
    /// Month-first is the US convention; everywhere else leads with the day.
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(locale) if locale.starts_with("en-US") => DateStyle::MonthFirst,
            _ => DateStyle::DayFirst,
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DateStyle::DayFirst => date.format("%d/%m/%Y").to_string(),
            DateStyle::MonthFirst => date.format("%m/%d/%Y").to_string(),
        }
    }
}

fn due_label(due_date: Option<NaiveDate>, style: DateStyle, placeholder: &str) -> String {
    match due_date {
        Some(date) => style.format(date),
        None => placeholder.to_string(),
    }
}

/// Pure projection of the displayed list onto presentation rows. Subtasks
/// render indented beneath their parent only while it is expanded.
pub fn render_rows(view: &ViewState, style: DateStyle) -> Vec<ListRow> {
    if view.searched_empty() {
        return vec![ListRow::NoResults];
    }
    let mut rows = Vec::new();
    for todo in view.displayed() {
        rows.push(ListRow::Todo(TodoRow {
            id: todo.id.clone(),
            text: todo.text.clone(),
            due_label: due_label(todo.due_date, style, "No Date"),
            status: todo.status,
            subtask_count: todo.subtasks.len(),
            expandable: !todo.subtasks.is_empty(),
            expanded: todo.expanded,
        }));
        if todo.expanded {
            for subtask in &todo.subtasks {
                rows.push(ListRow::Subtask(SubtaskRow {
                    todo_id: todo.id.clone(),
                    id: subtask.id.clone(),
                    text: subtask.text.clone(),
                    due_label: due_label(subtask.due_date, style, "-"),
                    status: subtask.status,
                }));
            }
        }
    }
    rows
}
