use crate::domain::{items_of_task, Item, ItemStatus, PauseState, Task};
use chrono::{DateTime, Duration, Utc};

/// Per-task line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub code: String,
    pub title: String,
    pub status: ItemStatus,
    pub done_items: usize,
    pub total_items: usize,
    pub elapsed: Duration,
}

/// Totals across every task
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlobalStats {
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub started_tasks: usize,
    pub total_items: usize,
    pub done_items: usize,
    pub total_elapsed: Duration,
}

/// Summarize each task from its items
pub fn summarize_tasks(
    tasks: &[Task],
    items: &[Item],
    now: DateTime<Utc>,
    pause: &PauseState,
) -> Vec<TaskSummary> {
    tasks
        .iter()
        .map(|task| {
            let mut summary = TaskSummary {
                code: task.code.clone(),
                title: task.title.clone(),
                status: task.status,
                done_items: 0,
                total_items: 0,
                elapsed: Duration::zero(),
            };
            for item in items_of_task(items, task.id) {
                summary.total_items += 1;
                if item.status == ItemStatus::Done {
                    summary.done_items += 1;
                }
                summary.elapsed += item.elapsed(now, pause);
            }
            summary
        })
        .collect()
}

/// Calculate totals over the task summaries
pub fn calculate_global_stats(summaries: &[TaskSummary]) -> GlobalStats {
    summaries.iter().fold(GlobalStats::default(), |mut stats, s| {
        stats.total_tasks += 1;
        match s.status {
            ItemStatus::Done => stats.done_tasks += 1,
            ItemStatus::Started => stats.started_tasks += 1,
            ItemStatus::NotStarted => {}
        }
        stats.total_items += s.total_items;
        stats.done_items += s.done_items;
        stats.total_elapsed += s.elapsed;
        stats
    })
}
