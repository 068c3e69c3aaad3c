use crate::app::AppState;
use crate::domain::TaskField;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.modals.task_form {
        return;
    }
    let form = &app.task_form;
    let modal_area = create_modal_area(area, 16);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if app.modals.edit_target.is_some() {
        " Edit Task "
    } else {
        " Add Task "
    };

    let mut lines = vec![Line::raw("")];

    for field in TaskField::all() {
        let value = match field {
            TaskField::Description => &form.draft.description,
            TaskField::Hours => &form.draft.hours,
            TaskField::Minutes => &form.draft.minutes,
            TaskField::Seconds => &form.draft.seconds,
        };
        let editing = *field == form.editing_field;

        let label = if editing {
            format!("{}: (editing)", field.label())
        } else {
            format!("{}:", field.label())
        };
        lines.push(Line::raw(label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(value.as_str(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
