//! User interface rendering.

mod chart;
mod formatters;
mod keymap_bar;
mod panels;
mod popup;
mod status_bar;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use chart::ChartLayout;
pub use formatters::{format_percent, format_stat_value, truncate_to_width};
pub use theme::{rgb, ThemeColors};

/// Areas of the main screen.
#[derive(Debug, Clone, Copy)]
struct Areas {
    chart: Rect,
    summary: Rect,
    insights: Option<Rect>,
    status: Rect,
    keymap: Rect,
}

fn split(area: Rect, app: &App) -> Areas {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Keymap bar
        ])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[0]);

    let (summary, insights) = if app.show_insights {
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(content[1]);
        (side[0], Some(side[1]))
    } else {
        (content[1], None)
    };

    Areas {
        chart: content[0],
        summary,
        insights,
        status: main_chunks[1],
        keymap: main_chunks[2],
    }
}

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);
    let areas = split(f.area(), app);

    chart::draw_chart(f, areas.chart, app, &colors);
    panels::draw_summary(f, areas.summary, app, &colors);
    if let Some(area) = areas.insights {
        panels::draw_insights(f, area, app, &colors);
    }
    status_bar::draw_status(f, areas.status, app, &colors);
    keymap_bar::draw_keymap(
        f,
        areas.keymap,
        app.interaction.selected().is_some(),
        &colors,
    );
    popup::draw_popup(f, areas.chart, app, &colors);
}

/// Main-chart cell under a screen position, for a screen of size `area`.
pub fn cell_at(area: Rect, app: &App, x: u16, y: u16) -> Option<(usize, usize)> {
    let areas = split(area, app);
    chart::layout(areas.chart, app).cell_at(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::fallback_dataset;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_shows_labels_and_panels() {
        let mut app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        app.finish_animations();
        let screen = rendered(&app);
        assert!(screen.contains("Electronics"));
        assert!(screen.contains("Q1 2022"));
        assert!(screen.contains("Insights"));
        assert!(screen.contains("Forecast"));
    }

    #[test]
    fn test_draw_shows_popup_after_select() {
        let mut app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        app.finish_animations();
        app.select_at_cursor();
        let screen = rendered(&app);
        assert!(screen.contains("Selected"));
        assert!(screen.contains("Sales ($K)"));
    }

    #[test]
    fn test_cell_at_matches_drawn_grid() {
        let app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        let area = Rect::new(0, 0, 120, 36);
        let areas = split(area, &app);
        let layout = chart::layout(areas.chart, &app);
        let rect = layout.cell_rect(2, 1).unwrap();
        assert_eq!(cell_at(area, &app, rect.x, rect.y), Some((2, 1)));
        assert_eq!(cell_at(area, &app, 0, 35), None);
    }
}
