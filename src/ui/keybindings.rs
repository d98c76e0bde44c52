use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ move   "),
        Span::raw("Enter add/open   "),
        Span::raw("Space toggle   "),
        Span::raw("Ctrl+T toggle   "),
        Span::raw("Ctrl+R restart   "),
        Span::raw("Ctrl+P pause/resume   "),
        Span::raw("\\d delete   "),
        Span::raw("Esc back   "),
        Span::raw("\\q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
