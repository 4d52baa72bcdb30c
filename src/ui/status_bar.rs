//! Status bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status bar.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let mut spans = vec![Span::raw(app.status.clone())];
    if app.realtime_enabled() {
        spans.push(Span::styled("  ● LIVE", Style::default().fg(colors.error)));
    }
    if !app.animator.is_idle() {
        spans.push(Span::styled("  ~", Style::default().fg(colors.warning)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
