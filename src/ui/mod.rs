pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_settings_modal, render_time_up_modal};
use ratatui::Frame;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
    render_task_pane(f, app, layout.task_area);

    // Dialogs, lowest first; time-up draws over an open form
    render_settings_modal(f, app, size);
    render_input_form(f, app, size);
    render_time_up_modal(f, app, size);
}
