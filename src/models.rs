use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length (in characters) of todo and subtask text.
pub const TEXT_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Status::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Subtask {
    pub id: String,
    pub text: String,
    pub status: Status,
    /// A user action always supplies a due date, but older persisted data
    /// may lack one; such entries render with a placeholder.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Display-only; meaningful only while `subtasks` is non-empty.
    #[serde(default)]
    pub expanded: bool,
}

impl Todo {
    pub fn new(id: String, text: String, due_date: NaiveDate) -> Self {
        Self {
            id,
            text,
            status: Status::Pending,
            due_date: Some(due_date),
            subtasks: Vec::new(),
            expanded: false,
        }
    }
}

impl Subtask {
    pub fn new(id: String, text: String, due_date: NaiveDate) -> Self {
        Self {
            id,
            text,
            status: Status::Pending,
            due_date: Some(due_date),
        }
    }
}

/// Generates a collision-free opaque id. Timestamp-based ids collide under
/// rapid creation, so use random UUIDs instead.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
