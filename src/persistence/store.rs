use crate::domain::{Item, ItemStatus, Task};
use thiserror::Error;

/// Errors raised by a [`Store`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed timestamp in {table}.{column} (row {row_id}): {value:?}")]
    MalformedTimestamp {
        table: &'static str,
        column: &'static str,
        row_id: i64,
        value: String,
    },

    #[error("unknown status code {code} in {table} (row {row_id})")]
    UnknownStatus {
        table: &'static str,
        row_id: i64,
        code: i64,
    },

    #[error("item {row_id} is marked done but has no checked_at")]
    MissingCheckedAt { row_id: i64 },

    #[error("duration of item {item_id} is too large to store")]
    DurationOverflow { item_id: i64 },
}

/// Durable task/item records
pub trait Store {
    /// All tasks in creation order
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Items of one task in creation order
    fn load_items(&self, task_id: i64) -> Result<Vec<Item>, StoreError>;

    /// Insert a task (status NotStarted) and return its id
    fn create_task(&mut self, code: &str, title: &str) -> Result<i64, StoreError>;

    /// Insert an item and return its id
    fn create_item(&mut self, item: &Item) -> Result<i64, StoreError>;

    /// Write status, created_at, checked_at and frozen_duration of `item`
    fn update_item_state(&mut self, item: &Item) -> Result<(), StoreError>;

    fn update_task_status(&mut self, task_id: i64, status: ItemStatus) -> Result<(), StoreError>;

    fn delete_item(&mut self, item_id: i64) -> Result<(), StoreError>;

    /// Delete a task together with all of its items
    fn delete_task(&mut self, task_id: i64) -> Result<(), StoreError>;
}
