use crate::app::AppState;
use crate::domain::{Mode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Big scrub step for { and }
const SCRUB_FAST_STEP: i64 = 5;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode() {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::TimeUp => handle_time_up_mode(app, key),
        UiMode::TaskForm => handle_task_form_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Mode tabs
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(mode) = Mode::all().into_iter().find(|m| m.key() == c) {
                app.select_mode(mode);
            }
            Ok(false)
        }

        // Start/pause
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_timer();
            Ok(false)
        }

        // Reset countdown
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }

        // Scrub remaining minutes
        KeyCode::Char('[') | KeyCode::Left => {
            app.scrub(-1);
            Ok(false)
        }
        KeyCode::Char(']') | KeyCode::Right => {
            app.scrub(1);
            Ok(false)
        }
        KeyCode::Char('{') => {
            app.scrub(-SCRUB_FAST_STEP);
            Ok(false)
        }
        KeyCode::Char('}') => {
            app.scrub(SCRUB_FAST_STEP);
            Ok(false)
        }

        // Task list navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Edit selected task
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }

        // Delete selected task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Delete all tasks
        KeyCode::Char('D') => {
            app.delete_all_tasks();
            Ok(false)
        }

        // Settings
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.open_settings();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the time-up dialog is showing
fn handle_time_up_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.stop_timer();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the add/edit task form
fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_task_form();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_task_form();
            Ok(false)
        }
        KeyCode::Tab => {
            app.task_form_next_field();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.task_form_backspace();
            Ok(false)
        }
        // Without Ctrl so chords never type into the form
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.task_form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the settings dialog
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.save_settings();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_settings();
            Ok(false)
        }
        KeyCode::Tab | KeyCode::Down => {
            app.settings_next_field();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.settings_backspace();
            Ok(false)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.settings_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}
