use super::enums::ItemStatus;

/// A task groups checklist items. Its status is always derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    /// Short code such as "T03"
    pub code: String,
    pub title: String,
    pub status: ItemStatus,
}

impl Task {
    pub fn new(id: i64, code: String, title: String) -> Self {
        Self {
            id,
            code,
            title,
            status: ItemStatus::NotStarted,
        }
    }
}

/// Derive a task status from its items' statuses:
/// Done when every item is done, Started on any progress, otherwise NotStarted
pub fn aggregate_status<I>(statuses: I) -> ItemStatus
where
    I: IntoIterator<Item = ItemStatus>,
{
    let (mut total, mut done, mut started) = (0usize, 0usize, 0usize);
    for status in statuses {
        total += 1;
        match status {
            ItemStatus::Done => done += 1,
            ItemStatus::Started => started += 1,
            ItemStatus::NotStarted => {}
        }
    }

    if total > 0 && done == total {
        ItemStatus::Done
    } else if started > 0 || done > 0 {
        ItemStatus::Started
    } else {
        ItemStatus::NotStarted
    }
}

/// Next free task code: one past the highest "Tnn" code in use
pub fn next_task_code(tasks: &[Task]) -> String {
    let highest = tasks
        .iter()
        .filter_map(|t| t.code.strip_prefix('T'))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("T{:02}", highest + 1)
}
