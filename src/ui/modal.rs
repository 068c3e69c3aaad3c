use crate::app::AppState;
use crate::domain::Mode;
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

/// Render the time's-up modal shown when a countdown expires
pub fn render_time_up_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.modals.time_up {
        return;
    }
    let modal_area = create_modal_area(area, 9);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {} is over. Time's up!", app.timer.mode().name())),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [r]", modal_title_style()),
            Span::raw(" Reset  "),
            Span::styled("[s]", modal_title_style()),
            Span::raw(" Stop"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" ⏰ Time's Up ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the settings modal with the three editable durations
pub fn render_settings_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.modals.settings {
        return;
    }
    let form = &app.settings_form;
    let modal_area = create_modal_area(area, 12);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw(""), Line::raw("  Durations (minutes):"), Line::raw("")];

    for (idx, mode) in Mode::all().into_iter().enumerate() {
        let editing = idx == form.editing_field;
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<12} > ", format!("{}:", mode.name()))),
            Span::styled(form.fields[idx].as_str(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Settings ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
