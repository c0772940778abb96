use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::models::{fresh_id, Status, Subtask, Todo, TEXT_LIMIT};

/// Broad category of a domain error, used by surfaces to pick severity or
/// wording. Every kind is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TodoError {
    EmptyText,
    TextTooLong { limit: usize },
    DuplicateText { text: String },
    MissingDueDate,
    PastDueDate { date: NaiveDate },
    TodoNotFound { id: String },
    SubtaskNotFound { id: String },
    NoTodos,
    NoSubtasks,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::EmptyText
            | TodoError::TextTooLong { .. }
            | TodoError::DuplicateText { .. }
            | TodoError::MissingDueDate
            | TodoError::PastDueDate { .. } => ErrorKind::Validation,
            TodoError::TodoNotFound { .. } | TodoError::SubtaskNotFound { .. } => {
                ErrorKind::NotFound
            }
            TodoError::NoTodos | TodoError::NoSubtasks => ErrorKind::Empty,
        }
    }
}

impl std::fmt::Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoError::EmptyText => write!(f, "text cannot be empty"),
            TodoError::TextTooLong { limit } => {
                write!(f, "text must be at most {limit} characters")
            }
            TodoError::DuplicateText { text } => write!(f, "\"{text}\" already exists"),
            TodoError::MissingDueDate => write!(f, "a due date is required"),
            TodoError::PastDueDate { date } => write!(f, "due date {date} is in the past"),
            TodoError::TodoNotFound { id } => write!(f, "todo not found: {id}"),
            TodoError::SubtaskNotFound { id } => write!(f, "subtask not found: {id}"),
            TodoError::NoTodos => write!(f, "there are no todos to delete"),
            TodoError::NoSubtasks => write!(f, "this todo has no subtasks"),
        }
    }
}

impl std::error::Error for TodoError {}

fn validate_text(text: &str) -> Result<String, TodoError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoError::EmptyText);
    }
    if trimmed.chars().count() > TEXT_LIMIT {
        return Err(TodoError::TextTooLong { limit: TEXT_LIMIT });
    }
    Ok(trimmed.to_string())
}

/// Due dates are compared by calendar day only; today itself is allowed.
fn validate_due_date(date: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate, TodoError> {
    let date = date.ok_or(TodoError::MissingDueDate)?;
    if date < today {
        return Err(TodoError::PastDueDate { date });
    }
    Ok(date)
}

fn duplicate_of<'a>(mut texts: impl Iterator<Item = &'a str>, candidate: &str) -> bool {
    let lowered = candidate.to_lowercase();
    texts.any(|text| text.to_lowercase() == lowered)
}

/// Owner of the canonical collection. Clones share the same underlying
/// list, mirroring the single-writer model of the app: one store instance,
/// handed to whatever drives the interaction surface.
#[derive(Clone, Default)]
pub struct TodoStore {
    inner: Arc<Mutex<Vec<Todo>>>,
}

impl TodoStore {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(todos)),
        }
    }

    pub fn todos(&self) -> Vec<Todo> {
        let guard = self.inner.lock().expect("store poisoned");
        guard.clone()
    }

    pub fn replace_todos(&self, todos: Vec<Todo>) {
        let mut guard = self.inner.lock().expect("store poisoned");
        *guard = todos;
    }

    pub fn len(&self) -> usize {
        let guard = self.inner.lock().expect("store poisoned");
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_todo(
        &self,
        text: &str,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let text = validate_text(text)?;
        if duplicate_of(guard.iter().map(|t| t.text.as_str()), &text) {
            return Err(TodoError::DuplicateText { text });
        }
        let due = validate_due_date(due_date, today)?;
        let todo = Todo::new(fresh_id(), text, due);
        guard.push(todo.clone());
        Ok(todo)
    }

    pub fn edit_todo(
        &self,
        id: &str,
        text: &str,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let index = guard
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoError::TodoNotFound { id: id.to_string() })?;
        let text = validate_text(text)?;
        // The todo being edited may keep its own text.
        let duplicate = duplicate_of(
            guard.iter().filter(|t| t.id != id).map(|t| t.text.as_str()),
            &text,
        );
        if duplicate {
            return Err(TodoError::DuplicateText { text });
        }
        let due = validate_due_date(due_date, today)?;
        let todo = &mut guard[index];
        todo.text = text;
        todo.due_date = Some(due);
        Ok(todo.clone())
    }

    /// Removes the todo and its whole subtask sequence in one step.
    pub fn delete_todo(&self, id: &str) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let index = guard
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoError::TodoNotFound { id: id.to_string() })?;
        Ok(guard.remove(index))
    }

    pub fn delete_all(&self) -> Result<usize, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        if guard.is_empty() {
            return Err(TodoError::NoTodos);
        }
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }

    pub fn toggle_todo_status(&self, id: &str) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::TodoNotFound { id: id.to_string() })?;
        todo.status = todo.status.toggled();
        Ok(todo.clone())
    }

    pub fn set_todo_status(&self, id: &str, status: Status) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::TodoNotFound { id: id.to_string() })?;
        todo.status = status;
        Ok(todo.clone())
    }

    pub fn toggle_expand(&self, id: &str) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::TodoNotFound { id: id.to_string() })?;
        if todo.subtasks.is_empty() {
            return Err(TodoError::NoSubtasks);
        }
        todo.expanded = !todo.expanded;
        Ok(todo.clone())
    }

    pub fn add_subtask(
        &self,
        todo_id: &str,
        text: &str,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Subtask, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard.iter_mut().find(|t| t.id == todo_id).ok_or_else(|| {
            TodoError::TodoNotFound {
                id: todo_id.to_string(),
            }
        })?;
        let text = validate_text(text)?;
        if duplicate_of(todo.subtasks.iter().map(|s| s.text.as_str()), &text) {
            return Err(TodoError::DuplicateText { text });
        }
        let due = validate_due_date(due_date, today)?;
        let subtask = Subtask::new(fresh_id(), text, due);
        todo.subtasks.push(subtask.clone());
        // A freshly added subtask should be visible right away.
        todo.expanded = true;
        Ok(subtask)
    }

    pub fn edit_subtask(
        &self,
        todo_id: &str,
        subtask_id: &str,
        text: &str,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Subtask, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard.iter_mut().find(|t| t.id == todo_id).ok_or_else(|| {
            TodoError::TodoNotFound {
                id: todo_id.to_string(),
            }
        })?;
        let index = todo
            .subtasks
            .iter()
            .position(|s| s.id == subtask_id)
            .ok_or_else(|| TodoError::SubtaskNotFound {
                id: subtask_id.to_string(),
            })?;
        let text = validate_text(text)?;
        let duplicate = duplicate_of(
            todo.subtasks
                .iter()
                .filter(|s| s.id != subtask_id)
                .map(|s| s.text.as_str()),
            &text,
        );
        if duplicate {
            return Err(TodoError::DuplicateText { text });
        }
        let due = validate_due_date(due_date, today)?;
        let subtask = &mut todo.subtasks[index];
        subtask.text = text;
        subtask.due_date = Some(due);
        Ok(subtask.clone())
    }

    pub fn delete_subtask(&self, todo_id: &str, subtask_id: &str) -> Result<Subtask, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard.iter_mut().find(|t| t.id == todo_id).ok_or_else(|| {
            TodoError::TodoNotFound {
                id: todo_id.to_string(),
            }
        })?;
        let index = todo
            .subtasks
            .iter()
            .position(|s| s.id == subtask_id)
            .ok_or_else(|| TodoError::SubtaskNotFound {
                id: subtask_id.to_string(),
            })?;
        Ok(todo.subtasks.remove(index))
    }

    pub fn toggle_subtask_status(
        &self,
        todo_id: &str,
        subtask_id: &str,
    ) -> Result<Subtask, TodoError> {
        let mut guard = self.inner.lock().expect("store poisoned");
        let todo = guard.iter_mut().find(|t| t.id == todo_id).ok_or_else(|| {
            TodoError::TodoNotFound {
                id: todo_id.to_string(),
            }
        })?;
        let subtask = todo
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| TodoError::SubtaskNotFound {
                id: subtask_id.to_string(),
            })?;
        subtask.status = subtask.status.toggled();
        Ok(subtask.clone())
    }
}
