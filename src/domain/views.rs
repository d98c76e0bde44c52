use super::item::Item;
use super::pause::PauseState;
use chrono::{DateTime, Duration, Utc};

/// Format a duration rounded to the second, e.g. "45s", "3m 05s", "1h 02m 05s".
/// Negative durations (clock skew) show as "0s".
pub fn format_elapsed(duration: Duration) -> String {
    let total_ms = duration.num_milliseconds().max(0);
    let total_secs = (total_ms + 500) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Items of one task, in store order
pub fn items_of_task(items: &[Item], task_id: i64) -> impl Iterator<Item = &Item> {
    items.iter().filter(move |i| i.task_id == task_id)
}

/// Total displayed elapsed time across a task's items
pub fn task_elapsed(items: &[Item], task_id: i64, now: DateTime<Utc>, pause: &PauseState) -> Duration {
    items_of_task(items, task_id)
        .map(|i| i.elapsed(now, pause))
        .fold(Duration::zero(), |acc, d| acc + d)
}

/// Keep a cursor inside a list of `len` rows
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        cursor.min(len - 1)
    }
}
