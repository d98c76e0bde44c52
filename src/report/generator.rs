use crate::domain::{format_elapsed, PauseState};
use crate::persistence::Store;
use crate::report::stats::{calculate_global_stats, summarize_tasks, GlobalStats, TaskSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};

/// Format percentage with 1 decimal place
fn format_percent(done: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", done as f64 / total as f64 * 100.0)
}

/// Build the markdown report for everything in the store
pub fn generate_report(store: &dyn Store, pause: &PauseState, now: DateTime<Utc>) -> Result<String> {
    let tasks = store.load_tasks().context("Failed to load tasks for report")?;
    let mut items = Vec::new();
    for task in &tasks {
        items.extend(
            store
                .load_items(task.id)
                .with_context(|| format!("Failed to load items of {}", task.code))?,
        );
    }

    let summaries = summarize_tasks(&tasks, &items, now, pause);
    let global = calculate_global_stats(&summaries);
    Ok(render_report(&summaries, &global, pause, now))
}

fn render_report(
    summaries: &[TaskSummary],
    global: &GlobalStats,
    pause: &PauseState,
    now: DateTime<Utc>,
) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "# Checklist Report - {}\n\n",
        now.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Tasks:** {} (Done: {}, Started: {})\n",
        global.total_tasks, global.done_tasks, global.started_tasks
    ));
    report.push_str(&format!(
        "- **Items Done:** {}/{} ({})\n",
        global.done_items,
        global.total_items,
        format_percent(global.done_items, global.total_items)
    ));
    report.push_str(&format!(
        "- **Tracked Time:** {}\n",
        format_elapsed(global.total_elapsed)
    ));
    if let Some(paused_at) = pause.paused_at() {
        report.push_str(&format!(
            "- **Paused Since:** {}\n",
            paused_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ));
    }
    report.push('\n');

    // Tasks Section
    report.push_str("## Tasks\n\n");
    if summaries.is_empty() {
        report.push_str("_No tasks yet._\n");
        return report;
    }

    report.push_str("| Code | Task | Status | Items | Time |\n");
    report.push_str("|------|------|--------|-------|------|\n");
    for s in summaries {
        report.push_str(&format!(
            "| {} | {} | {} | {}/{} | {} |\n",
            s.code,
            s.title.replace('|', "\\|"),
            s.status.to_tag(),
            s.done_items,
            s.total_items,
            format_elapsed(s.elapsed)
        ));
    }

    report
}
