use crate::app::AppState;
use crate::domain::{Mode, MAX_SCRUB_MINUTES};
use crate::ui::styles::{
    active_tab_style, border_style, default_style, gauge_style, hint_style, paused_style,
    running_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Format time as "HH:MM"
fn format_time(dt: chrono::DateTime<chrono::Local>) -> String {
    dt.format("%H:%M").to_string()
}

/// Render the countdown pane: mode tabs, MM:SS, status and the scrub gauge
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Timer ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode tabs
            Constraint::Length(1),
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Status
            Constraint::Length(1),
            Constraint::Length(1), // Scrub gauge
            Constraint::Min(0),
        ])
        .split(inner);

    // Mode tabs
    let mut tabs = Vec::new();
    for mode in Mode::all() {
        let label = format!(" [{}] {} ", mode.key(), mode.name());
        if mode == app.timer.mode() {
            tabs.push(Span::styled(label, active_tab_style()));
        } else {
            tabs.push(Span::styled(label, default_style()));
        }
        tabs.push(Span::raw("  "));
    }
    f.render_widget(
        Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
        rows[0],
    );

    // Countdown
    let countdown_style = if app.timer.is_running() {
        running_style()
    } else {
        paused_style()
    };
    f.render_widget(
        Paragraph::new(Span::styled(app.timer.display(), countdown_style))
            .alignment(Alignment::Center),
        rows[2],
    );

    // Status
    let status = match app.timer.projected_finish(chrono::Local::now()) {
        Some(finish) => format!(
            "Running · {:.0}% done · ends at {}",
            app.timer.progress() * 100.0,
            format_time(finish)
        ),
        None => format!(
            "Paused · {:.0}% done · Space to start",
            app.timer.progress() * 100.0
        ),
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, hint_style())).alignment(Alignment::Center),
        rows[3],
    );

    // Scrub gauge over the remaining minutes
    let minutes = app.timer.remaining_minutes();
    let ratio = f64::from(minutes.min(MAX_SCRUB_MINUTES)) / f64::from(MAX_SCRUB_MINUTES);
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(ratio)
        .label(format!("{} / {} min", minutes, MAX_SCRUB_MINUTES));
    f.render_widget(gauge, rows[5]);
}
