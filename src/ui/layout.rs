use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub timer_area: Rect,
    pub task_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Timer pane (fixed height)
/// - Task list pane (rest)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Keybindings bar
            Constraint::Length(11), // Timer pane
            Constraint::Min(0),     // Task list
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        timer_area: chunks[1],
        task_area: chunks[2],
    }
}

/// Create centered modal area with the given content height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
