//! Todopad core: a two-level todo list (todos with subtasks) with validated
//! CRUD, filter/sort/search projections over the displayed list, completion
//! counters, and write-through persistence to a single JSON blob.
//!
//! The presentation lives behind the [`surface::Surface`] trait; the
//! [`commands`] module drives the store/view/storage trio through it.

pub mod commands;
pub mod logging;
pub mod models;
pub mod notify;
pub mod render;
pub mod stats;
pub mod storage;
pub mod store;
pub mod surface;
pub mod view;

pub use models::{Status, Subtask, Todo};
pub use stats::{compute_stats, Stats};
pub use store::{ErrorKind, TodoError, TodoStore};
pub use surface::{FormInput, StatePayload, Surface};
pub use view::{SortOrder, StatusFilter, ViewState};
