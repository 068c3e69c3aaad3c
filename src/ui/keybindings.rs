use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" 1/2/3 mode   "),
        Span::raw("Space start/pause   "),
        Span::raw("r reset   "),
        Span::raw("[ / ] scrub   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("x delete   "),
        Span::raw("D delete all   "),
        Span::raw("s settings   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
