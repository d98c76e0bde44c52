use crate::app::AppState;
use crate::domain::View;
use crate::ui::styles::{border_style, default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the single-line input box at the bottom of the screen
pub fn render_input_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = create_input_line(&app.input, &app.view);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Input ", title_style())),
    );

    f.render_widget(paragraph, area);
}

fn placeholder(view: &View) -> &'static str {
    match view {
        View::Tasks => "Add new task",
        View::Items(_) => "Add new item",
    }
}

fn create_input_line(input: &str, view: &View) -> Line<'static> {
    if input.is_empty() {
        return Line::from(vec![
            Span::raw("> "),
            Span::styled(placeholder(view), hint_style()),
        ]);
    }

    Line::from(vec![
        Span::raw("> "),
        Span::styled(input.to_string(), default_style()),
        Span::styled("█", default_style()),
    ])
}
