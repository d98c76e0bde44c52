use crate::app::AppState;
use crate::domain::{format_elapsed, task_elapsed, Item, ItemStatus, PauseState, Task, View};
use crate::ui::styles::{
    border_style, default_style, paused_style, running_style, selected_style, status_style,
    title_style,
};
use chrono::{DateTime, Duration, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task list or the open task's items
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = app.now();

    let (title, rows): (String, Vec<ListItem>) = match app.view {
        View::Tasks => {
            let rows = app
                .tasks
                .iter()
                .map(|task| {
                    let elapsed = task_elapsed(&app.items, task.id, now, &app.pause);
                    ListItem::new(create_task_line(task, elapsed))
                })
                .collect();
            (" Checklist ".to_string(), rows)
        }
        View::Items(_) => {
            let title = app
                .selected_task()
                .map(|t| format!(" {} - {} ", t.code, t.title))
                .unwrap_or_else(|| " Items ".to_string());
            let rows = app
                .visible_items()
                .into_iter()
                .map(|item| ListItem::new(create_item_line(item, now, &app.pause)))
                .collect();
            (title, rows)
        }
    };

    let empty = rows.is_empty();
    let list = List::new(rows)
        .style(default_style())
        .highlight_style(selected_style())
        .highlight_symbol("> ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        );

    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Format: [>] T01 - Release  (12m 04s)
fn create_task_line(task: &Task, elapsed: Duration) -> Line<'static> {
    Line::from(vec![
        Span::styled(task.status.badge().to_string(), status_style(task.status)),
        Span::raw(format!(" {} - {}", task.code, task.title)),
        Span::raw(format!("  ({})", format_elapsed(elapsed))),
    ])
}

/// Format: [>] Tag the build  (1m 02s)
fn create_item_line(item: &Item, now: DateTime<Utc>, pause: &PauseState) -> Line<'static> {
    let elapsed_style = match item.status {
        ItemStatus::Started if pause.is_paused() => paused_style(),
        ItemStatus::Started => running_style(),
        ItemStatus::NotStarted | ItemStatus::Done => default_style(),
    };

    Line::from(vec![
        Span::styled(item.status.badge().to_string(), status_style(item.status)),
        Span::raw(format!(" {}", item.text)),
        Span::styled(
            format!("  ({})", format_elapsed(item.elapsed(now, pause))),
            elapsed_style,
        ),
    ])
}
