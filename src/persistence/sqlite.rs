use super::codec::{
    duration_to_nanos, format_optional_timestamp, format_timestamp, nanos_to_duration,
    parse_optional_timestamp, parse_timestamp,
};
use super::store::{Store, StoreError};
use crate::domain::{Item, ItemStatus, Task};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    title TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL,
    text TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    checked_at TEXT NOT NULL DEFAULT '',
    frozen_duration INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_items_task_id ON items (task_id);
";

const SELECT_TASKS: &str = "SELECT id, code, title, status FROM tasks ORDER BY id";
const SELECT_ITEMS: &str = "SELECT id, task_id, text, status, created_at, checked_at, frozen_duration
    FROM items WHERE task_id = ?1 ORDER BY id";
const INSERT_TASK: &str = "INSERT INTO tasks (code, title, status) VALUES (?1, ?2, ?3)";
const INSERT_ITEM: &str = "INSERT INTO items (task_id, text, status, created_at, checked_at, frozen_duration)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_ITEM_STATE: &str = "UPDATE items
    SET status = ?1, created_at = ?2, checked_at = ?3, frozen_duration = ?4 WHERE id = ?5";
const UPDATE_TASK_STATUS: &str = "UPDATE tasks SET status = ?1 WHERE id = ?2";
const DELETE_ITEM: &str = "DELETE FROM items WHERE id = ?1";
const DELETE_TASK_ITEMS: &str = "DELETE FROM items WHERE task_id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Item columns as stored, before timestamps are validated
struct ItemRow {
    id: i64,
    task_id: i64,
    text: String,
    status: i64,
    created_at: String,
    checked_at: String,
    frozen_duration: i64,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, StoreError> {
        let status = ItemStatus::from_code(self.status).ok_or(StoreError::UnknownStatus {
            table: "items",
            row_id: self.id,
            code: self.status,
        })?;

        let created_at = parse_timestamp(&self.created_at).ok_or_else(|| StoreError::MalformedTimestamp {
            table: "items",
            column: "created_at",
            row_id: self.id,
            value: self.created_at.clone(),
        })?;

        let checked_at =
            parse_optional_timestamp(&self.checked_at).ok_or_else(|| StoreError::MalformedTimestamp {
                table: "items",
                column: "checked_at",
                row_id: self.id,
                value: self.checked_at.clone(),
            })?;

        // checked_at is present exactly when the item is Done
        let checked_at = match (status, checked_at) {
            (ItemStatus::Done, None) => return Err(StoreError::MissingCheckedAt { row_id: self.id }),
            (ItemStatus::Done, Some(at)) => Some(at),
            (_, Some(at)) => {
                debug!(item_id = self.id, %at, "dropping checked_at of reopened item");
                None
            }
            (_, None) => None,
        };

        Ok(Item {
            id: self.id,
            task_id: self.task_id,
            text: self.text,
            status,
            created_at,
            checked_at,
            frozen_duration: nanos_to_duration(self.frozen_duration),
        })
    }
}

/// SQLite-backed [`Store`]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the tables exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened database");
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn frozen_nanos(item: &Item) -> Result<i64, StoreError> {
        duration_to_nanos(item.frozen_duration).ok_or(StoreError::DurationOverflow { item_id: item.id })
    }
}

impl Store for SqliteStore {
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, code, title, status_code) = row?;
            let status = ItemStatus::from_code(status_code).ok_or(StoreError::UnknownStatus {
                table: "tasks",
                row_id: id,
                code: status_code,
            })?;
            tasks.push(Task { id, code, title, status });
        }

        Ok(tasks)
    }

    fn load_items(&self, task_id: i64) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_ITEMS)?;
        let rows = stmt.query_map(params![task_id], |row| {
            Ok(ItemRow {
                id: row.get(0)?,
                task_id: row.get(1)?,
                text: row.get(2)?,
                status: row.get(3)?,
                created_at: row.get(4)?,
                checked_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                frozen_duration: row.get(6)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.into_item()?);
        }

        Ok(items)
    }

    fn create_task(&mut self, code: &str, title: &str) -> Result<i64, StoreError> {
        self.conn
            .execute(INSERT_TASK, params![code, title, ItemStatus::NotStarted.code()])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_item(&mut self, item: &Item) -> Result<i64, StoreError> {
        let frozen = Self::frozen_nanos(item)?;
        self.conn.execute(
            INSERT_ITEM,
            params![
                item.task_id,
                item.text,
                item.status.code(),
                format_timestamp(item.created_at),
                format_optional_timestamp(item.checked_at),
                frozen,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_item_state(&mut self, item: &Item) -> Result<(), StoreError> {
        let frozen = Self::frozen_nanos(item)?;
        self.conn.execute(
            UPDATE_ITEM_STATE,
            params![
                item.status.code(),
                format_timestamp(item.created_at),
                format_optional_timestamp(item.checked_at),
                frozen,
                item.id,
            ],
        )?;
        Ok(())
    }

    fn update_task_status(&mut self, task_id: i64, status: ItemStatus) -> Result<(), StoreError> {
        self.conn.execute(UPDATE_TASK_STATUS, params![status.code(), task_id])?;
        Ok(())
    }

    fn delete_item(&mut self, item_id: i64) -> Result<(), StoreError> {
        self.conn.execute(DELETE_ITEM, params![item_id])?;
        Ok(())
    }

    fn delete_task(&mut self, task_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(DELETE_TASK_ITEMS, params![task_id])?;
        tx.execute(DELETE_TASK, params![task_id])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::{Clock, MockClock};
    use crate::domain::PauseState;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn store_with_task() -> (SqliteStore, i64) {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let task_id = store.create_task("T01", "Release").unwrap();
        (store, task_id)
    }

    #[test]
    fn test_create_and_load_tasks() {
        let (mut store, first) = store_with_task();
        let second = store.create_task("T02", "Docs").unwrap();
        assert_ne!(first, second);

        let tasks = store.load_tasks().unwrap();
        assert_eq!(
            tasks,
            vec![
                Task::new(first, "T01".to_string(), "Release".to_string()),
                Task::new(second, "T02".to_string(), "Docs".to_string()),
            ]
        );
    }

    #[test]
    fn test_item_state_survives_reload() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let (mut store, task_id) = store_with_task();

        let mut item = Item::new(task_id, "Tag the build".to_string(), clock.now());
        item.id = store.create_item(&item).unwrap();

        item.toggle_status(clock.now(), &pause);
        clock.advance(Duration::nanoseconds(61_000_000_123));
        item.toggle_status(clock.now(), &pause);
        store.update_item_state(&item).unwrap();

        let loaded = store.load_items(task_id).unwrap();
        assert_eq!(loaded, vec![item.clone()]);
        assert_eq!(
            loaded[0].frozen_duration,
            loaded[0].checked_at.unwrap() - loaded[0].created_at
        );
    }

    #[test]
    fn test_absent_checked_at_stored_as_empty() {
        let clock = MockClock::new();
        let (mut store, task_id) = store_with_task();
        let item = Item::new(task_id, "x".to_string(), clock.now());
        let id = store.create_item(&item).unwrap();

        let raw: String = store
            .conn
            .query_row("SELECT checked_at FROM items WHERE id = ?1", params![id], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, "");
        assert_eq!(store.load_items(task_id).unwrap()[0].checked_at, None);
    }

    #[test]
    fn test_malformed_timestamp_is_reported() {
        let (store, task_id) = store_with_task();
        store
            .conn
            .execute(
                "INSERT INTO items (task_id, text, status, created_at, checked_at, frozen_duration)
                 VALUES (?1, 'broken', 0, 'not-a-time', '', 0)",
                params![task_id],
            )
            .unwrap();

        let err = store.load_items(task_id).unwrap_err();
        match err {
            StoreError::MalformedTimestamp { column, value, .. } => {
                assert_eq!(column, "created_at");
                assert_eq!(value, "not-a-time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_checked_at_is_reported() {
        let (store, task_id) = store_with_task();
        store
            .conn
            .execute(
                "INSERT INTO items (task_id, text, status, created_at, checked_at, frozen_duration)
                 VALUES (?1, 'broken', 2, '2024-05-01T09:00:00Z', '??', 0)",
                params![task_id],
            )
            .unwrap();

        assert!(matches!(
            store.load_items(task_id),
            Err(StoreError::MalformedTimestamp { column: "checked_at", .. })
        ));
    }

    #[test]
    fn test_done_row_without_checked_at_is_reported() {
        let (store, task_id) = store_with_task();
        store
            .conn
            .execute(
                "INSERT INTO items (task_id, text, status, created_at, checked_at, frozen_duration)
                 VALUES (?1, 'done', 2, '2024-05-01T09:00:00Z', '', 5000000000)",
                params![task_id],
            )
            .unwrap();

        assert!(matches!(
            store.load_items(task_id),
            Err(StoreError::MissingCheckedAt { .. })
        ));
    }

    #[test]
    fn test_reopened_row_drops_checked_at() {
        let (store, task_id) = store_with_task();
        store
            .conn
            .execute(
                "INSERT INTO items (task_id, text, status, created_at, checked_at, frozen_duration)
                 VALUES (?1, 'reopened', 0, '2024-05-01T09:00:00Z', '2024-05-01T09:00:05Z', 5000000000)",
                params![task_id],
            )
            .unwrap();

        let items = store.load_items(task_id).unwrap();
        assert_eq!(items[0].status, ItemStatus::NotStarted);
        assert_eq!(items[0].checked_at, None);
        assert_eq!(items[0].frozen_duration, Duration::seconds(5));
    }

    #[test]
    fn test_unknown_status_is_reported() {
        let (store, _) = store_with_task();
        store.conn.execute("UPDATE tasks SET status = 9", []).unwrap();
        assert!(matches!(
            store.load_tasks(),
            Err(StoreError::UnknownStatus { table: "tasks", code: 9, .. })
        ));
    }

    #[test]
    fn test_update_task_status() {
        let (mut store, task_id) = store_with_task();
        store.update_task_status(task_id, ItemStatus::Done).unwrap();
        assert_eq!(store.load_tasks().unwrap()[0].status, ItemStatus::Done);
    }

    #[test]
    fn test_delete_item() {
        let clock = MockClock::new();
        let (mut store, task_id) = store_with_task();
        let keep = store
            .create_item(&Item::new(task_id, "keep".to_string(), clock.now()))
            .unwrap();
        let gone = store
            .create_item(&Item::new(task_id, "drop".to_string(), clock.now()))
            .unwrap();

        store.delete_item(gone).unwrap();
        let ids: Vec<i64> = store.load_items(task_id).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn test_delete_task_cascades() {
        let clock = MockClock::new();
        let (mut store, task_id) = store_with_task();
        let other_task = store.create_task("T02", "Other").unwrap();
        store
            .create_item(&Item::new(task_id, "a".to_string(), clock.now()))
            .unwrap();
        store
            .create_item(&Item::new(other_task, "b".to_string(), clock.now()))
            .unwrap();

        store.delete_task(task_id).unwrap();

        assert_eq!(store.load_tasks().unwrap().len(), 1);
        assert!(store.load_items(task_id).unwrap().is_empty());
        assert_eq!(store.load_items(other_task).unwrap().len(), 1);
        let orphans: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM items WHERE task_id = ?1", params![task_id], |r| r.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_reopen_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.create_task("T01", "Persisted").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load_tasks().unwrap()[0].title, "Persisted");
    }
}
