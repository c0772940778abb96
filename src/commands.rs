use crate::models::{Subtask, Todo};
use crate::notify::Severity;
use crate::render::render_rows;
use crate::stats::compute_stats;
use crate::storage::{Storage, StorageError};
use crate::store::{TodoError, TodoStore};
use crate::surface::{StatePayload, Surface};
use crate::view::{SortOrder, StatusFilter, ViewState};

#[derive(Debug, PartialEq, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

/// A dismissed modal: not an error, nothing changed, nothing to report.
fn cancelled<T>() -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: None,
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

fn domain_err<T>(ctx: &impl Surface, error: &TodoError) -> CommandResult<T> {
    let message = error.to_string();
    ctx.notify(&message, Severity::Error);
    err(&message)
}

fn persist(ctx: &impl Surface, store: &TodoStore) -> Result<(), StorageError> {
    let root = ctx.data_dir()?;
    let storage = Storage::new(root);
    storage.ensure_dirs()?;
    storage.save(&store.todos())
}

fn present(ctx: &impl Surface, store: &TodoStore, view: &ViewState) {
    ctx.present(StatePayload {
        rows: render_rows(view, ctx.date_style()),
        stats: compute_stats(&store.todos()),
    });
}

/// Post-mutation sequence: the view falls back to the full canonical list
/// (any active filter/sort/search is deliberately discarded), the collection
/// is written through, and the fresh rows plus counters go to the surface.
fn commit<T>(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    success: &str,
    data: T,
) -> CommandResult<T> {
    view.reset(&store.todos());
    if let Err(error) = persist(ctx, store) {
        let message = format!("storage error: {error}");
        ctx.notify(&message, Severity::Error);
        return err(&message);
    }
    present(ctx, store, view);
    ctx.notify(success, Severity::Success);
    ok(data)
}

/// Loads the persisted collection (missing or corrupt data means an empty
/// list) and performs the first render.
pub fn init_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
) -> CommandResult<usize> {
    let root = match ctx.data_dir() {
        Ok(path) => path,
        Err(error) => {
            let message = format!("storage error: {error}");
            ctx.notify(&message, Severity::Error);
            return err(&message);
        }
    };
    let storage = Storage::new(root);
    if let Err(error) = storage.ensure_dirs() {
        let message = format!("storage error: {error}");
        ctx.notify(&message, Severity::Error);
        return err(&message);
    }
    let todos = storage.load();
    log::info!("loaded {} todos", todos.len());
    store.replace_todos(todos);
    view.reset(&store.todos());
    present(ctx, store, view);
    ok(store.len())
}

pub fn create_todo_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
) -> CommandResult<Todo> {
    let mut text = String::new();
    let mut date = None;
    // Validation failures keep the modal open with the entered values.
    loop {
        let input = match ctx.prompt_text_and_date("Add Todo", &text, date) {
            Some(input) => input,
            None => return cancelled(),
        };
        match store.add_todo(&input.text, input.date, ctx.today()) {
            Ok(todo) => return commit(ctx, store, view, "todo added", todo),
            Err(error) => {
                ctx.notify(&error.to_string(), Severity::Error);
                text = input.text;
                date = input.date;
            }
        }
    }
}

pub fn edit_todo_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
) -> CommandResult<Todo> {
    let current = match store.todos().into_iter().find(|t| t.id == todo_id) {
        Some(todo) => todo,
        None => {
            return domain_err(
                ctx,
                &TodoError::TodoNotFound {
                    id: todo_id.to_string(),
                },
            )
        }
    };
    let mut text = current.text;
    let mut date = current.due_date;
    loop {
        let input = match ctx.prompt_text_and_date("Edit Todo", &text, date) {
            Some(input) => input,
            None => return cancelled(),
        };
        match store.edit_todo(todo_id, &input.text, input.date, ctx.today()) {
            Ok(todo) => return commit(ctx, store, view, "todo updated", todo),
            Err(error) => {
                ctx.notify(&error.to_string(), Severity::Error);
                text = input.text;
                date = input.date;
            }
        }
    }
}

pub fn delete_todo_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
) -> CommandResult<Todo> {
    let todo = match store.todos().into_iter().find(|t| t.id == todo_id) {
        Some(todo) => todo,
        None => {
            return domain_err(
                ctx,
                &TodoError::TodoNotFound {
                    id: todo_id.to_string(),
                },
            )
        }
    };
    let message = format!("Delete \"{}\" and all its subtasks?", todo.text);
    if !ctx.prompt_confirm("Delete Todo", &message) {
        return cancelled();
    }
    match store.delete_todo(todo_id) {
        Ok(removed) => commit(ctx, store, view, "todo deleted", removed),
        Err(error) => domain_err(ctx, &error),
    }
}

pub fn delete_all_todos_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
) -> CommandResult<usize> {
    if store.is_empty() {
        return domain_err(ctx, &TodoError::NoTodos);
    }
    let message = format!("Delete all {} todo items?", store.len());
    if !ctx.prompt_confirm("Delete All Todos", &message) {
        return cancelled();
    }
    match store.delete_all() {
        Ok(removed) => commit(ctx, store, view, "all todos deleted", removed),
        Err(error) => domain_err(ctx, &error),
    }
}

pub fn toggle_todo_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
) -> CommandResult<Todo> {
    match store.toggle_todo_status(todo_id) {
        Ok(todo) => commit(ctx, store, view, "status updated", todo),
        Err(error) => domain_err(ctx, &error),
    }
}

pub fn create_subtask_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
) -> CommandResult<Subtask> {
    if !store.todos().iter().any(|t| t.id == todo_id) {
        return domain_err(
            ctx,
            &TodoError::TodoNotFound {
                id: todo_id.to_string(),
            },
        );
    }
    let mut text = String::new();
    // The subtask modal pre-fills today as the due date.
    let mut date = Some(ctx.today());
    loop {
        let input = match ctx.prompt_text_and_date("Add Subtask", &text, date) {
            Some(input) => input,
            None => return cancelled(),
        };
        match store.add_subtask(todo_id, &input.text, input.date, ctx.today()) {
            Ok(subtask) => return commit(ctx, store, view, "subtask added", subtask),
            Err(error) => {
                ctx.notify(&error.to_string(), Severity::Error);
                text = input.text;
                date = input.date;
            }
        }
    }
}

pub fn edit_subtask_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
    subtask_id: &str,
) -> CommandResult<Subtask> {
    let parent = match store.todos().into_iter().find(|t| t.id == todo_id) {
        Some(todo) => todo,
        None => {
            return domain_err(
                ctx,
                &TodoError::TodoNotFound {
                    id: todo_id.to_string(),
                },
            )
        }
    };
    let current = match parent.subtasks.into_iter().find(|s| s.id == subtask_id) {
        Some(subtask) => subtask,
        None => {
            return domain_err(
                ctx,
                &TodoError::SubtaskNotFound {
                    id: subtask_id.to_string(),
                },
            )
        }
    };
    let mut text = current.text;
    let mut date = current.due_date;
    loop {
        let input = match ctx.prompt_text_and_date("Edit Subtask", &text, date) {
            Some(input) => input,
            None => return cancelled(),
        };
        match store.edit_subtask(todo_id, subtask_id, &input.text, input.date, ctx.today()) {
            Ok(subtask) => return commit(ctx, store, view, "subtask updated", subtask),
            Err(error) => {
                ctx.notify(&error.to_string(), Severity::Error);
                text = input.text;
                date = input.date;
            }
        }
    }
}

pub fn delete_subtask_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
    subtask_id: &str,
) -> CommandResult<Subtask> {
    let parent = match store.todos().into_iter().find(|t| t.id == todo_id) {
        Some(todo) => todo,
        None => {
            return domain_err(
                ctx,
                &TodoError::TodoNotFound {
                    id: todo_id.to_string(),
                },
            )
        }
    };
    let subtask = match parent.subtasks.into_iter().find(|s| s.id == subtask_id) {
        Some(subtask) => subtask,
        None => {
            return domain_err(
                ctx,
                &TodoError::SubtaskNotFound {
                    id: subtask_id.to_string(),
                },
            )
        }
    };
    let message = format!("Delete subtask \"{}\"?", subtask.text);
    if !ctx.prompt_confirm("Delete Subtask", &message) {
        return cancelled();
    }
    match store.delete_subtask(todo_id, subtask_id) {
        Ok(removed) => commit(ctx, store, view, "subtask deleted", removed),
        Err(error) => domain_err(ctx, &error),
    }
}

pub fn toggle_subtask_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
    subtask_id: &str,
) -> CommandResult<Subtask> {
    match store.toggle_subtask_status(todo_id, subtask_id) {
        Ok(subtask) => commit(ctx, store, view, "subtask status updated", subtask),
        Err(error) => domain_err(ctx, &error),
    }
}

pub fn toggle_expand_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    todo_id: &str,
) -> CommandResult<Todo> {
    match store.toggle_expand(todo_id) {
        Ok(todo) => {
            // Expansion is a display toggle; it re-renders and persists but
            // does not announce itself.
            view.reset(&store.todos());
            if let Err(error) = persist(ctx, store) {
                let message = format!("storage error: {error}");
                ctx.notify(&message, Severity::Error);
                return err(&message);
            }
            present(ctx, store, view);
            ok(todo)
        }
        Err(error) => domain_err(ctx, &error),
    }
}

/// The three projector operations replace the displayed list wholesale and
/// never touch the canonical collection or storage.
pub fn sort_todos_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    order: SortOrder,
) -> CommandResult<usize> {
    view.apply_sort(&store.todos(), order);
    present(ctx, store, view);
    ok(view.displayed().len())
}

pub fn filter_todos_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    filter: StatusFilter,
) -> CommandResult<usize> {
    view.apply_filter(&store.todos(), filter);
    present(ctx, store, view);
    ok(view.displayed().len())
}

pub fn search_todos_impl(
    ctx: &impl Surface,
    store: &TodoStore,
    view: &mut ViewState,
    term: &str,
) -> CommandResult<usize> {
    view.apply_search(&store.todos(), term);
    present(ctx, store, view);
    ok(view.displayed().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::render::{DateStyle, ListRow};
    use crate::surface::FormInput;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct TestSurface {
        root: tempfile::TempDir,
        data_dir_error: Option<String>,
        prompts: Mutex<VecDeque<Option<FormInput>>>,
        confirms: Mutex<VecDeque<bool>>,
        notifications: Mutex<Vec<(String, Severity)>>,
        presented: Mutex<Vec<StatePayload>>,
    }

    impl TestSurface {
        fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
                data_dir_error: None,
                prompts: Mutex::new(VecDeque::new()),
                confirms: Mutex::new(VecDeque::new()),
                notifications: Mutex::new(Vec::new()),
                presented: Mutex::new(Vec::new()),
            }
        }

        fn with_data_dir_error(message: &str) -> Self {
            let mut ctx = Self::new();
            ctx.data_dir_error = Some(message.to_string());
            ctx
        }

        fn script_prompt(&self, input: Option<FormInput>) {
            self.prompts.lock().unwrap().push_back(input);
        }

        fn script_confirm(&self, answer: bool) {
            self.confirms.lock().unwrap().push_back(answer);
        }

        fn notifications(&self) -> Vec<(String, Severity)> {
            self.notifications.lock().unwrap().clone()
        }

        fn last_payload(&self) -> StatePayload {
            self.presented.lock().unwrap().last().cloned().unwrap()
        }

        fn presented_count(&self) -> usize {
            self.presented.lock().unwrap().len()
        }
    }

    impl Surface for TestSurface {
        fn data_dir(&self) -> Result<PathBuf, StorageError> {
            if let Some(message) = &self.data_dir_error {
                return Err(StorageError::Io(std::io::Error::other(message.clone())));
            }
            Ok(self.root.path().to_path_buf())
        }

        fn prompt_text_and_date(
            &self,
            _title: &str,
            _initial_text: &str,
            _initial_date: Option<NaiveDate>,
        ) -> Option<FormInput> {
            // An empty script behaves like a dismissed modal.
            self.prompts.lock().unwrap().pop_front().flatten()
        }

        fn prompt_confirm(&self, _title: &str, _message: &str) -> bool {
            self.confirms.lock().unwrap().pop_front().unwrap_or(false)
        }

        fn notify(&self, message: &str, severity: Severity) {
            self.notifications
                .lock()
                .unwrap()
                .push((message.to_string(), severity));
        }

        fn present(&self, payload: StatePayload) {
            self.presented.lock().unwrap().push(payload);
        }

        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
        }

        fn date_style(&self) -> DateStyle {
            DateStyle::DayFirst
        }
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn input(text: &str, date: Option<NaiveDate>) -> Option<FormInput> {
        Some(FormInput {
            text: text.to_string(),
            date,
        })
    }

    fn seeded(ctx: &TestSurface, texts: &[&str]) -> (TodoStore, ViewState) {
        let store = TodoStore::default();
        let mut view = ViewState::default();
        for text in texts {
            ctx.script_prompt(input(text, Some(tomorrow())));
            let res = create_todo_impl(ctx, &store, &mut view);
            assert!(res.ok, "seed todo failed: {:?}", res.error);
        }
        (store, view)
    }

    #[test]
    fn init_starts_empty_without_a_data_file() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();

        let res = init_impl(&ctx, &store, &mut view);
        assert_eq!(res, ok(0));
        assert!(store.is_empty());
        let payload = ctx.last_payload();
        assert!(payload.rows.is_empty());
        assert_eq!(payload.stats.total, 0);
        assert_eq!(payload.stats.percentage, 0);
    }

    #[test]
    fn init_reloads_what_a_previous_session_persisted() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants", "call plumber"]);
        let id = store.todos()[0].id.clone();
        ctx.script_prompt(input("fetch the hose", Some(tomorrow())));
        assert!(create_subtask_impl(&ctx, &store, &mut view, &id).ok);

        // A second session over the same directory sees identical data.
        let fresh_store = TodoStore::default();
        let mut fresh_view = ViewState::default();
        let res = init_impl(&ctx, &fresh_store, &mut fresh_view);
        assert_eq!(res, ok(2));
        assert_eq!(fresh_store.todos(), store.todos());
    }

    #[test]
    fn init_reports_storage_errors() {
        let ctx = TestSurface::with_data_dir_error("nope");
        let store = TodoStore::default();
        let mut view = ViewState::default();
        let res = init_impl(&ctx, &store, &mut view);
        assert!(!res.ok);
        assert!(matches!(
            ctx.notifications().last(),
            Some((_, Severity::Error))
        ));
    }

    #[test]
    fn create_todo_commits_presents_and_notifies() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();

        ctx.script_prompt(input("water plants", Some(tomorrow())));
        let res = create_todo_impl(&ctx, &store, &mut view);
        assert!(res.ok);
        assert_eq!(store.len(), 1);

        // Write-through happened.
        assert!(ctx.root.path().join("todos.json").is_file());

        let payload = ctx.last_payload();
        assert_eq!(payload.rows.len(), 1);
        assert_eq!(payload.stats.total, 1);
        assert_eq!(
            ctx.notifications(),
            vec![("todo added".to_string(), Severity::Success)]
        );
    }

    #[test]
    fn create_todo_retries_after_validation_failure_with_input_retained() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();

        // First submit has no date, second fixes it.
        ctx.script_prompt(input("water plants", None));
        ctx.script_prompt(input("water plants", Some(tomorrow())));
        let res = create_todo_impl(&ctx, &store, &mut view);
        assert!(res.ok);
        assert_eq!(store.len(), 1);

        let notes = ctx.notifications();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].1, Severity::Error);
        assert_eq!(notes[1], ("todo added".to_string(), Severity::Success));
    }

    #[test]
    fn dismissing_the_create_modal_changes_nothing() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();

        ctx.script_prompt(None);
        let res = create_todo_impl(&ctx, &store, &mut view);
        assert!(res.ok);
        assert!(res.data.is_none());
        assert!(store.is_empty());
        assert!(ctx.notifications().is_empty());
        assert_eq!(ctx.presented_count(), 0);
    }

    #[test]
    fn create_todo_reports_persist_failure() {
        let ctx = TestSurface::with_data_dir_error("nope");
        let store = TodoStore::default();
        let mut view = ViewState::default();

        ctx.script_prompt(input("water plants", Some(tomorrow())));
        let res = create_todo_impl(&ctx, &store, &mut view);
        assert!(!res.ok);
        assert!(res.error.unwrap().contains("storage error"));
    }

    #[test]
    fn edit_todo_prefills_and_updates() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);
        let id = store.todos()[0].id.clone();

        ctx.script_prompt(input("water the garden", Some(tomorrow())));
        let res = edit_todo_impl(&ctx, &store, &mut view, &id);
        assert!(res.ok);
        assert_eq!(store.todos()[0].text, "water the garden");
        assert_eq!(
            ctx.notifications().last(),
            Some(&("todo updated".to_string(), Severity::Success))
        );
    }

    #[test]
    fn edit_todo_unknown_id_notifies_not_found() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);

        let res = edit_todo_impl(&ctx, &store, &mut view, "missing");
        assert!(!res.ok);
        assert!(res.error.unwrap().contains("todo not found"));
        assert_eq!(store.todos()[0].text, "water plants");
    }

    #[test]
    fn delete_todo_requires_confirmation() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);
        let id = store.todos()[0].id.clone();

        // Declined: nothing happens.
        ctx.script_confirm(false);
        let res = delete_todo_impl(&ctx, &store, &mut view, &id);
        assert!(res.ok && res.data.is_none());
        assert_eq!(store.len(), 1);

        // Confirmed: todo and its subtasks go away together.
        ctx.script_prompt(input("fetch the hose", Some(tomorrow())));
        create_subtask_impl(&ctx, &store, &mut view, &id);
        ctx.script_confirm(true);
        let res = delete_todo_impl(&ctx, &store, &mut view, &id);
        assert!(res.ok);
        assert_eq!(res.data.unwrap().subtasks.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_all_rejects_an_empty_collection() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();

        let res = delete_all_todos_impl(&ctx, &store, &mut view);
        assert!(!res.ok);
        assert!(res.error.unwrap().contains("no todos"));

        let (store, mut view) = seeded(&ctx, &["a", "b"]);
        ctx.script_confirm(true);
        let res = delete_all_todos_impl(&ctx, &store, &mut view);
        assert_eq!(res.data, Some(2));
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_todo_updates_counters_in_the_payload() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);
        let id = store.todos()[0].id.clone();

        let res = toggle_todo_impl(&ctx, &store, &mut view, &id);
        assert!(res.ok);
        assert_eq!(res.data.unwrap().status, Status::Completed);
        let payload = ctx.last_payload();
        assert_eq!(payload.stats.completed, 1);
        assert_eq!(payload.stats.percentage, 100);

        let res = toggle_todo_impl(&ctx, &store, &mut view, "missing");
        assert!(!res.ok);
    }

    #[test]
    fn subtask_lifecycle_through_commands() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);
        let todo_id = store.todos()[0].id.clone();

        ctx.script_prompt(input("fetch the hose", Some(tomorrow())));
        let res = create_subtask_impl(&ctx, &store, &mut view, &todo_id);
        assert!(res.ok);
        let subtask_id = res.data.unwrap().id;
        // Parent expanded, so the payload carries both rows.
        assert_eq!(ctx.last_payload().rows.len(), 2);

        ctx.script_prompt(input("roll out the hose", Some(tomorrow())));
        let res = edit_subtask_impl(&ctx, &store, &mut view, &todo_id, &subtask_id);
        assert_eq!(res.data.unwrap().text, "roll out the hose");

        let res = toggle_subtask_impl(&ctx, &store, &mut view, &todo_id, &subtask_id);
        assert_eq!(res.data.unwrap().status, Status::Completed);
        assert_eq!(ctx.last_payload().stats.completed, 1);

        ctx.script_confirm(true);
        let res = delete_subtask_impl(&ctx, &store, &mut view, &todo_id, &subtask_id);
        assert!(res.ok);
        assert!(store.todos()[0].subtasks.is_empty());
    }

    #[test]
    fn create_subtask_for_unknown_todo_fails_before_prompting() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);

        // No prompt is scripted: reaching the modal would read as a
        // dismissal and return ok, so the not-found error proves the
        // command failed before opening it.
        let res = create_subtask_impl(&ctx, &store, &mut view, "missing");
        assert!(!res.ok);
        assert!(res.error.unwrap().contains("todo not found"));
        assert!(store.todos()[0].subtasks.is_empty());
    }

    #[test]
    fn toggle_expand_needs_subtasks_and_stays_quiet_on_success() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);
        let id = store.todos()[0].id.clone();

        let res = toggle_expand_impl(&ctx, &store, &mut view, &id);
        assert!(!res.ok);
        assert!(!store.todos()[0].expanded);

        ctx.script_prompt(input("fetch the hose", Some(tomorrow())));
        create_subtask_impl(&ctx, &store, &mut view, &id);
        let before = ctx.notifications().len();

        let res = toggle_expand_impl(&ctx, &store, &mut view, &id);
        assert!(res.ok);
        assert!(!res.data.unwrap().expanded);
        // Re-rendered without a success banner.
        assert_eq!(ctx.notifications().len(), before);
    }

    #[test]
    fn mutation_resets_an_active_filter() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["open one", "done one"]);
        let done_id = store.todos()[1].id.clone();
        toggle_todo_impl(&ctx, &store, &mut view, &done_id);

        let res = filter_todos_impl(&ctx, &store, &mut view, StatusFilter::Completed);
        assert_eq!(res.data, Some(1));
        assert_eq!(ctx.last_payload().rows.len(), 1);

        // Any successful mutation falls back to showing everything.
        let open_id = store.todos()[0].id.clone();
        toggle_todo_impl(&ctx, &store, &mut view, &open_id);
        assert_eq!(view.displayed().len(), 2);
        assert_eq!(ctx.last_payload().rows.len(), 2);
    }

    #[test]
    fn sort_command_orders_rows_without_persisting() {
        let ctx = TestSurface::new();
        let store = TodoStore::default();
        let mut view = ViewState::default();
        ctx.script_prompt(input("late", NaiveDate::from_ymd_opt(2026, 12, 1)));
        create_todo_impl(&ctx, &store, &mut view);
        ctx.script_prompt(input("early", Some(tomorrow())));
        create_todo_impl(&ctx, &store, &mut view);

        let res = sort_todos_impl(&ctx, &store, &mut view, SortOrder::DateAsc);
        assert!(res.ok);
        let payload = ctx.last_payload();
        match &payload.rows[0] {
            ListRow::Todo(row) => assert_eq!(row.text, "early"),
            other => panic!("expected todo row, got {other:?}"),
        }
        // Canonical order is untouched.
        assert_eq!(store.todos()[0].text, "late");
    }

    #[test]
    fn search_command_presents_placeholder_on_no_match() {
        let ctx = TestSurface::new();
        let (store, mut view) = seeded(&ctx, &["water plants"]);

        let res = search_todos_impl(&ctx, &store, &mut view, "zzz");
        assert_eq!(res.data, Some(0));
        assert_eq!(ctx.last_payload().rows, vec![ListRow::NoResults]);

        // Stats still reflect canonical state, not the empty view.
        assert_eq!(ctx.last_payload().stats.total, 1);

        let res = search_todos_impl(&ctx, &store, &mut view, "");
        assert_eq!(res.data, Some(1));
    }
}
