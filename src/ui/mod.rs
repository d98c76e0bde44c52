pub mod input_line;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod status_line;
pub mod styles;

use crate::app::AppState;
use input_line::render_input_line;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use status_line::render_status_line;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let layout = create_layout(f.size());

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_status_line(f, app, layout.status_area);
    render_input_line(f, app, layout.input_area);
}
