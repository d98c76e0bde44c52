use crate::domain::{
    aggregate_status, clamp_cursor, items_of_task, next_task_code, Clock, Item, ItemStatus,
    PauseState, Task, View,
};
use crate::persistence::{save_metadata, SessionMetadata, Store, StoreError};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Typed command that deletes the current selection
pub const DELETE_COMMAND: &str = "\\d";
/// Typed command that quits
pub const QUIT_COMMAND: &str = "\\q";

/// Main application state.
///
/// Every command reads the clock once, applies the change to the in-memory
/// tasks/items, recomputes the affected task status and then writes through to
/// the store. Store failures never undo the in-memory change; they are logged
/// and shown in the status line.
pub struct AppState {
    store: Box<dyn Store>,
    clock: Box<dyn Clock>,
    /// Where the pause state is saved; `None` keeps it in memory only
    meta_path: Option<PathBuf>,
    pub tasks: Vec<Task>,
    /// Items of every task, so a global pause reaches all of them
    pub items: Vec<Item>,
    pub pause: PauseState,
    pub view: View,
    pub cursor: usize,
    pub input: String,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Ids handed out when the store could not assign one
    next_provisional_id: i64,
}

impl AppState {
    /// Load all tasks and items from the store
    pub fn load(
        store: Box<dyn Store>,
        clock: Box<dyn Clock>,
        pause: PauseState,
        meta_path: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        let tasks = store.load_tasks()?;
        let mut items = Vec::new();
        for task in &tasks {
            items.extend(store.load_items(task.id)?);
        }
        info!(tasks = tasks.len(), items = items.len(), paused = pause.is_paused(), "loaded checklist");

        Ok(Self {
            store,
            clock,
            meta_path,
            tasks,
            items,
            pause,
            view: View::Tasks,
            cursor: 0,
            input: String::new(),
            status_message: None,
            should_quit: false,
            next_provisional_id: -1,
        })
    }

    /// Current instant, for rendering running timers
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        match self.view {
            View::Tasks => None,
            View::Items(task_id) => Some(task_id),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let task_id = self.selected_task_id()?;
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Items of the open task, in display order
    pub fn visible_items(&self) -> Vec<&Item> {
        match self.view {
            View::Tasks => Vec::new(),
            View::Items(task_id) => items_of_task(&self.items, task_id).collect(),
        }
    }

    fn row_count(&self) -> usize {
        match self.view {
            View::Tasks => self.tasks.len(),
            View::Items(task_id) => items_of_task(&self.items, task_id).count(),
        }
    }

    /// Index into `self.items` of the item under the cursor
    fn selected_item_index(&self) -> Option<usize> {
        let task_id = self.selected_task_id()?;
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.task_id == task_id)
            .nth(self.cursor)
            .map(|(idx, _)| idx)
    }

    pub fn move_selection_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.cursor + 1 < self.row_count() {
            self.cursor += 1;
        }
    }

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Handle Enter on the input line
    pub fn submit_input(&mut self) {
        let text = self.input.trim().to_string();
        self.input.clear();

        match text.as_str() {
            QUIT_COMMAND => self.quit(),
            DELETE_COMMAND => self.delete_selected(),
            "" => {
                if self.view == View::Tasks {
                    if let Some(task_id) = self.tasks.get(self.cursor).map(|t| t.id) {
                        self.select_task(task_id);
                    }
                }
            }
            _ => self.add(text),
        }
    }

    /// Add a task (task list) or an item to the open task
    pub fn add(&mut self, text: String) {
        match self.view {
            View::Tasks => self.add_task(text),
            View::Items(task_id) => self.add_item(task_id, text),
        }
    }

    fn add_task(&mut self, title: String) {
        let code = next_task_code(&self.tasks);
        let id = match self.store.create_task(&code, &title) {
            Ok(id) => id,
            Err(e) => {
                self.report_store_error("create task", e);
                self.provisional_id()
            }
        };
        info!(task_id = id, %code, "task added");
        self.tasks.push(Task::new(id, code, title));
    }

    fn add_item(&mut self, task_id: i64, text: String) {
        let now = self.clock.now();
        let mut item = Item::new(task_id, text, now);
        item.id = if is_provisional(task_id) {
            debug!(task_id, "task was never stored; item kept in memory only");
            self.provisional_id()
        } else {
            match self.store.create_item(&item) {
                Ok(id) => id,
                Err(e) => {
                    self.report_store_error("create item", e);
                    self.provisional_id()
                }
            }
        };
        info!(item_id = item.id, task_id, "item added");
        self.items.push(item);
        self.refresh_task_status(task_id);
    }

    /// Advance the selected item through NotStarted -> Started -> Done -> NotStarted
    pub fn toggle_status(&mut self) {
        let Some(idx) = self.selected_item_index() else {
            return;
        };
        let now = self.clock.now();
        let pause = self.pause;

        let item = &mut self.items[idx];
        let from = item.status;
        item.toggle_status(now, &pause);
        debug!(item_id = item.id, ?from, to = ?item.status, "status toggled");

        self.persist_item(idx);
        let task_id = self.items[idx].task_id;
        self.refresh_task_status(task_id);
    }

    /// Reset the selected item's tracked time
    pub fn restart_selected(&mut self) {
        let Some(idx) = self.selected_item_index() else {
            return;
        };
        let now = self.clock.now();
        self.items[idx].restart(now);
        info!(item_id = self.items[idx].id, "item restarted");

        self.persist_item(idx);
        let task_id = self.items[idx].task_id;
        self.refresh_task_status(task_id);
    }

    /// Freeze every started item. No-op when already paused.
    pub fn pause_all(&mut self) {
        let now = self.clock.now();
        let Some(touched) = self.pause.pause_all(&mut self.items, now) else {
            return;
        };
        info!(items = touched.len(), "paused all timers");
        for idx in touched {
            self.persist_item(idx);
        }
        self.save_pause_state();
    }

    /// Let frozen items run again. No-op when not paused.
    pub fn resume_all(&mut self) {
        let now = self.clock.now();
        let Some(touched) = self.pause.resume_all(&mut self.items, now) else {
            return;
        };
        info!(items = touched.len(), "resumed all timers");
        for idx in touched {
            self.persist_item(idx);
        }
        self.save_pause_state();
    }

    pub fn toggle_pause(&mut self) {
        if self.pause.is_paused() {
            self.resume_all();
        } else {
            self.pause_all();
        }
    }

    /// Delete the task or item under the cursor
    pub fn delete_selected(&mut self) {
        match self.view {
            View::Tasks => {
                if let Some(task_id) = self.tasks.get(self.cursor).map(|t| t.id) {
                    self.delete_task(task_id);
                }
            }
            View::Items(_) => {
                if let Some(idx) = self.selected_item_index() {
                    let item_id = self.items[idx].id;
                    self.delete_item(item_id);
                }
            }
        }
    }

    /// Delete a task and its items
    pub fn delete_task(&mut self, task_id: i64) {
        let Some(pos) = self.tasks.iter().position(|t| t.id == task_id) else {
            return;
        };
        if is_provisional(task_id) {
            debug!(task_id, "skipping delete of unsaved task");
        } else if let Err(e) = self.store.delete_task(task_id) {
            self.report_store_error("delete task", e);
        }
        self.tasks.remove(pos);
        self.items.retain(|i| i.task_id != task_id);
        info!(task_id, "task deleted");

        if self.view == View::Items(task_id) {
            self.view = View::Tasks;
        }
        self.clamp_cursor();
    }

    pub fn delete_item(&mut self, item_id: i64) {
        let Some(pos) = self.items.iter().position(|i| i.id == item_id) else {
            return;
        };
        if is_provisional(item_id) {
            debug!(item_id, "skipping delete of unsaved item");
        } else if let Err(e) = self.store.delete_item(item_id) {
            self.report_store_error("delete item", e);
        }
        let item = self.items.remove(pos);
        info!(item_id, "item deleted");

        self.refresh_task_status(item.task_id);
        self.clamp_cursor();
    }

    /// Open a task's item list
    pub fn select_task(&mut self, task_id: i64) {
        if self.tasks.iter().any(|t| t.id == task_id) {
            self.view = View::Items(task_id);
            self.cursor = 0;
            self.input.clear();
        }
    }

    /// Back to the task list, keeping the cursor on the task that was open
    pub fn deselect_task(&mut self) {
        if let View::Items(task_id) = self.view {
            self.view = View::Tasks;
            self.cursor = self.tasks.iter().position(|t| t.id == task_id).unwrap_or(0);
            self.input.clear();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Recompute a task's status from its items and write it through
    fn refresh_task_status(&mut self, task_id: i64) {
        let status = aggregate_status(items_of_task(&self.items, task_id).map(|i| i.status));
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = status;
        }
        if is_provisional(task_id) {
            debug!(task_id, ?status, "skipping status write for unsaved task");
        } else if let Err(e) = self.store.update_task_status(task_id, status) {
            self.report_store_error("update task status", e);
        }
    }

    fn persist_item(&mut self, idx: usize) {
        let item_id = self.items[idx].id;
        if is_provisional(item_id) {
            debug!(item_id, "skipping write for unsaved item");
            return;
        }
        if let Err(e) = self.store.update_item_state(&self.items[idx]) {
            self.report_store_error("save item", e);
        }
    }

    fn save_pause_state(&mut self) {
        let Some(path) = &self.meta_path else {
            return;
        };
        if let Err(e) = save_metadata(path, &SessionMetadata::from_pause(&self.pause)) {
            warn!(error = %e, "failed to save pause state");
            self.status_message = Some(format!("Warning: could not save pause state: {}", e));
        }
    }

    fn report_store_error(&mut self, action: &str, err: StoreError) {
        warn!(error = %err, action, "persistence failed; keeping in-memory state");
        self.status_message = Some(format!("Warning: could not {}: {}", action, err));
    }

    fn provisional_id(&mut self) -> i64 {
        let id = self.next_provisional_id;
        self.next_provisional_id -= 1;
        id
    }

    fn clamp_cursor(&mut self) {
        self.cursor = clamp_cursor(self.cursor, self.row_count());
    }

    pub fn dismiss_message(&mut self) {
        self.status_message = None;
    }

    /// Save session state on the way out
    pub fn shutdown(&mut self) {
        self.save_pause_state();
    }
}

/// Ids below zero were handed out after a failed create and have no row
fn is_provisional(id: i64) -> bool {
    id < 0
}
