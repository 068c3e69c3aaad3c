use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, estimate_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Helper to format a total estimate for the pane title
fn format_total(duration: chrono::Duration) -> String {
    let total_minutes = duration.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Render the task list pane
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!(
        " Tasks ({}) · {} planned ",
        app.tasks.len(),
        format_total(app.tasks.total_time())
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if app.tasks.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::styled(
            "No tasks yet. Press a to add one.",
            default_style(),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>3}. ", idx + 1)),
                Span::raw(task.description.clone()),
                Span::raw("  "),
                Span::styled(task.time.to_string(), estimate_style()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}
