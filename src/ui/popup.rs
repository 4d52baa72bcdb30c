//! Info overlay popup for the selected element.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the info overlay, if one is showing.
pub fn draw_popup(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let Some(overlay) = app.interaction.overlay() else {
        return;
    };

    let popup = centered_rect(40, 30, area);
    f.render_widget(Clear, popup);

    let remaining = overlay.expires_at.saturating_sub(app.now());
    let block = Block::default()
        .title(format!(" Selected ({:.1}s) ", remaining as f64 / 1000.0))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.heading))
        .style(Style::default().bg(colors.bg));

    let mut lines = Vec::with_capacity(overlay.lines.len());
    for (i, text) in overlay.lines.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(colors.heading).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text)
        };
        lines.push(Line::from(Span::styled(text.clone(), style)));
    }

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
