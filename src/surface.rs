use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::notify::Severity;
use crate::render::{DateStyle, ListRow};
use crate::stats::Stats;
use crate::storage::StorageError;

/// Everything the list presentation needs after an operation: the rows in
/// display order plus the counters derived from canonical state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatePayload {
    pub rows: Vec<ListRow>,
    pub stats: Stats,
}

/// What a create/edit modal hands back on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// Boundary to whatever hosts the list: modal prompts, the notification
/// banner, the rendered presentation, and the storage location. The command
/// layer drives the whole app through this trait; tests swap in a scripted
/// implementation.
pub trait Surface {
    fn data_dir(&self) -> Result<PathBuf, StorageError>;

    /// Modal capture for create/edit flows. `None` means the user dismissed
    /// the modal; the store must stay untouched in that case.
    fn prompt_text_and_date(
        &self,
        title: &str,
        initial_text: &str,
        initial_date: Option<NaiveDate>,
    ) -> Option<FormInput>;

    /// Modal capture for destructive flows.
    fn prompt_confirm(&self, title: &str, message: &str) -> bool;

    /// Fire-and-forget banner; the surface owns dismissal timing.
    fn notify(&self, message: &str, severity: Severity);

    /// Receives the freshly rendered list after every re-render.
    fn present(&self, payload: StatePayload);

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn date_style(&self) -> DateStyle {
        DateStyle::detect()
    }
}
