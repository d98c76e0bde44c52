use crate::app::AppState;
use crate::domain::PauseState;
use crate::ui::styles::{banner_style, error_style, hint_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the pause banner and the latest warning, if any
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = create_status_line(&app.pause, app.status_message.as_deref());
    f.render_widget(Paragraph::new(line), area);
}

fn create_status_line(pause: &PauseState, message: Option<&str>) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(paused_at) = pause.paused_at() {
        let since = paused_at.with_timezone(&Local).format("%H:%M:%S");
        spans.push(Span::styled(
            format!(" ⏸ PAUSED since {} (Ctrl+P to resume) ", since),
            banner_style(),
        ));
    }

    match message {
        Some(msg) => {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(msg.to_string(), error_style()));
        }
        None if spans.is_empty() => {
            spans.push(Span::styled(" Running", hint_style()));
        }
        None => {}
    }

    Line::from(spans)
}
