use crate::domain::ItemStatus;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Badge style per status
pub fn status_style(status: ItemStatus) -> Style {
    match status {
        ItemStatus::NotStarted => Style::default().fg(Color::Gray),
        ItemStatus::Started => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        ItemStatus::Done => Style::default().fg(Color::Green),
    }
}

/// Elapsed time of a running item
pub fn running_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Elapsed time frozen by a global pause
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Pause banner style
pub fn banner_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Warning message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
