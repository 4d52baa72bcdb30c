//! Top-down projection of the chart scene.
//!
//! Each main-chart element gets a cell in a rows × columns grid. Inside the
//! cell the element's animated height is drawn as a vertical bar, a point or a
//! line marker, colored with the element's current material.

use crate::app::App;
use crate::scale::{BandScale, LinearScale};
use crate::scene::{format_value, ChartType, NodeId, Shape};
use crate::ui::formatters::{center_to_width, truncate_to_width};
use crate::ui::theme::rgb;
use crate::ui::ThemeColors;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Partial block glyphs for the top of a bar, from one eighth to full.
const EIGHTHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Widest row label column.
const MAX_LABEL_WIDTH: usize = 14;

/// Rows above the grid: the colorbar and its tick labels.
const HEADER_ROWS: u16 = 2;

/// Width of the colorbar gradient.
const COLORBAR_WIDTH: usize = 40;

/// Approximate number of colorbar ticks.
const COLORBAR_TICKS: usize = 4;

/// Screen geometry of the cell grid.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    /// Area holding the cells.
    pub grid: Rect,
    /// Area holding the row labels.
    pub labels: Rect,
    /// Row of column labels under the grid.
    pub footer: Rect,
    rows: BandScale,
    cols: BandScale,
}

impl ChartLayout {
    /// Lay out a grid of `rows` × `cols` cells inside `inner`.
    pub fn new(inner: Rect, rows: usize, cols: usize, label_width: u16) -> Self {
        // colorbar on top, column labels below
        let top = inner.y.saturating_add(HEADER_ROWS);
        let height = inner.height.saturating_sub(HEADER_ROWS + 1);
        let label_width = label_width.min(inner.width / 3);

        let grid = Rect {
            x: inner.x + label_width,
            y: top,
            width: inner.width.saturating_sub(label_width),
            height,
        };
        let labels = Rect {
            x: inner.x,
            y: top,
            width: label_width,
            height,
        };
        let footer = Rect {
            x: grid.x,
            y: top + height,
            width: grid.width,
            height: 1.min(inner.height),
        };

        Self {
            grid,
            labels,
            footer,
            rows: BandScale::new(rows, (grid.y as f64, (grid.y + grid.height) as f64), 0.15),
            cols: BandScale::new(cols, (grid.x as f64, (grid.x + grid.width) as f64), 0.2),
        }
    }

    /// Screen rectangle of a cell.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        let x = self.cols.position(col)?;
        let y = self.rows.position(row)?;
        Some(Rect {
            x: x.round() as u16,
            y: y.round() as u16,
            width: (self.cols.bandwidth().floor() as u16).max(1),
            height: (self.rows.bandwidth().floor() as u16).max(1),
        })
    }

    /// Cell under a screen position.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let row = self.rows.index_at(y as f64 + 0.5)?;
        let col = self.cols.index_at(x as f64 + 0.5)?;
        Some((row, col))
    }
}

/// Outer block of the chart panel.
fn chart_block<'a>(app: &App, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(format!(
            " {} | {} | {} | {} ",
            app.dataset.metadata.title_or_default(),
            app.table().name,
            app.chart_type.name(),
            app.scheme.name()
        ))
        .title_style(Style::default().fg(colors.heading))
}

/// Width of the row label column for the displayed table.
fn label_width(app: &App) -> u16 {
    let table = app.table();
    let widest = (0..table.rows())
        .map(|r| table.row_label(r).width())
        .max()
        .unwrap_or(0);
    (widest.min(MAX_LABEL_WIDTH) + 1) as u16
}

/// Layout the chart would use inside `area`.
pub fn layout(area: Rect, app: &App) -> ChartLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let (rows, cols) = app.scene.dims();
    ChartLayout::new(inner, rows, cols, label_width(app))
}

/// Draw the chart panel.
pub fn draw_chart(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let block = chart_block(app, colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < HEADER_ROWS + 2 {
        return;
    }

    let layout = layout(area, app);
    let buf = f.buffer_mut();
    draw_colorbar(buf, inner, app, colors);
    draw_row_labels(buf, &layout, app, colors);
    draw_column_labels(buf, &layout, app, colors);

    let (rows, cols) = app.scene.dims();
    for row in 0..rows {
        for col in 0..cols {
            let (Some(id), Some(rect)) = (app.scene.element_at(row, col), layout.cell_rect(row, col))
            else {
                continue;
            };
            let is_cursor = app.cursor == (row, col);
            draw_cell(buf, rect, app, id, is_cursor, colors);
        }
    }
}

/// Value gradient with round tick values underneath.
fn draw_colorbar(buf: &mut Buffer, inner: Rect, app: &App, colors: &ThemeColors) {
    let width = COLORBAR_WIDTH.min(inner.width as usize);
    let start = inner.x + ((inner.width as usize - width) / 2) as u16;
    let end = inner.x + inner.width;
    let axis = LinearScale::new(
        app.scales.extent,
        (f64::from(start), (start as usize + width - 1) as f64),
    );

    for x in start..start + width as u16 {
        let value = axis.invert(f64::from(x));
        if let Some(cell) = buf.cell_mut((x, inner.y)) {
            cell.set_char('▀').set_fg(rgb(app.scales.color.color(value)));
        }
    }

    let y = inner.y + 1;
    let mut free = inner.x;
    for tick in app.scales.height.ticks(COLORBAR_TICKS) {
        let label = format_value(tick);
        let label_width = label.width() as u16;
        let center = axis.map(tick).round() as u16;
        let x = center.saturating_sub(label_width / 2).max(free);
        if x + label_width > end {
            break;
        }
        put_str(buf, x, y, &label, colors.value, end - x);
        free = x + label_width + 1;
    }
}

fn draw_row_labels(buf: &mut Buffer, layout: &ChartLayout, app: &App, colors: &ThemeColors) {
    let table = app.table();
    let width = layout.labels.width.saturating_sub(1) as usize;
    for row in 0..table.rows() {
        let Some(rect) = layout.cell_rect(row, 0) else {
            continue;
        };
        let y = rect.y + rect.height.saturating_sub(1);
        let color = if app.cursor.0 == row { colors.heading } else { colors.label };
        let text = truncate_to_width(table.row_label(row), width);
        put_str(buf, layout.labels.x, y, &text, color, layout.labels.width);
    }
}

fn draw_column_labels(buf: &mut Buffer, layout: &ChartLayout, app: &App, colors: &ThemeColors) {
    let table = app.table();
    for col in 0..table.cols() {
        let Some(rect) = layout.cell_rect(0, col) else {
            continue;
        };
        let color = if app.cursor.1 == col { colors.heading } else { colors.label };
        let text = center_to_width(table.column_label(col), rect.width as usize);
        put_str(buf, rect.x, layout.footer.y, &text, color, rect.width);
    }
}

/// Animated height of an element as a fraction of the tallest possible.
fn height_fraction(app: &App, id: NodeId) -> f64 {
    let Some(node) = app.scene.graph.get(id) else {
        return 0.0;
    };
    let h = match node.shape {
        Shape::Box { height, .. } => height,
        _ => node.transform.position.y,
    };
    (h as f64 / app.config.max_height).clamp(0.0, 1.0)
}

fn draw_cell(
    buf: &mut Buffer,
    rect: Rect,
    app: &App,
    id: NodeId,
    is_cursor: bool,
    colors: &ThemeColors,
) {
    let Some(node) = app.scene.graph.get(id) else {
        return;
    };
    let mut style = Style::default().fg(rgb(node.material.color));
    if node.material.opacity < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }
    if node.material.is_highlight() {
        style = style.add_modifier(Modifier::BOLD);
    }
    let bg = if is_cursor { Some(colors.cursor_bg) } else { None };

    if let Some(bg) = bg {
        fill(buf, rect, ' ', Style::default().bg(bg));
    }

    // in eighths of a terminal row
    let fraction = height_fraction(app, id);
    let eighths = (fraction * rect.height as f64 * 8.0).round() as usize;
    let full = eighths / 8;
    let partial = eighths % 8;
    let bottom = rect.y + rect.height - 1;

    match app.chart_type {
        ChartType::Bars => {
            for i in 0..full.min(rect.height as usize) {
                fill_row(buf, rect, bottom - i as u16, '█', style, bg);
            }
            if partial > 0 && full < rect.height as usize {
                fill_row(buf, rect, bottom - full as u16, EIGHTHS[partial - 1], style, bg);
            }
        },
        ChartType::Points | ChartType::Lines => {
            let level = full.min(rect.height as usize - 1) as u16;
            let y = bottom - level;
            if app.chart_type == ChartType::Lines {
                fill_row(buf, rect, y, '─', style, bg);
            }
            let x = rect.x + rect.width / 2;
            set(buf, x, y, '●', style, bg);
        },
    }

    if let Some(text) = value_label(app, id) {
        if text.width() <= rect.width as usize {
            let x = rect.x + (rect.width - text.width() as u16) / 2;
            let label_fg = if is_cursor { colors.cursor_fg } else { colors.text };
            let label_style = Style::default().fg(label_fg);
            put_styled(buf, x, rect.y, &text, label_style, bg);
        }
    }
}

/// Text of the element's value label, if it has one.
fn value_label(app: &App, id: NodeId) -> Option<String> {
    let label = app.scene.label_of(id)?;
    match &app.scene.graph.get(label)?.shape {
        Shape::Text { value, .. } => Some(value.clone()),
        _ => None,
    }
}

fn fill(buf: &mut Buffer, rect: Rect, ch: char, style: Style) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

fn fill_row(buf: &mut Buffer, rect: Rect, y: u16, ch: char, style: Style, bg: Option<Color>) {
    for x in rect.x..rect.x + rect.width {
        set(buf, x, y, ch, style, bg);
    }
}

fn set(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style, bg: Option<Color>) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
        if let Some(bg) = bg {
            cell.set_bg(bg);
        }
    }
}

fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, fg: Color, max_width: u16) {
    let text = truncate_to_width(text, max_width as usize);
    put_styled(buf, x, y, &text, Style::default().fg(fg), None);
}

fn put_styled(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style, bg: Option<Color>) {
    let style = match bg {
        Some(bg) => style.bg(bg),
        None => style,
    };
    buf.set_string(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_do_not_overlap() {
        let layout = ChartLayout::new(Rect::new(0, 0, 80, 22), 4, 4, 12);
        let a = layout.cell_rect(0, 0).unwrap();
        let b = layout.cell_rect(0, 1).unwrap();
        let c = layout.cell_rect(1, 0).unwrap();
        assert!(a.x + a.width <= b.x);
        assert!(a.y + a.height <= c.y);
        assert!(a.x >= layout.grid.x);
        assert!(layout.cell_rect(4, 0).is_none());
    }

    #[test]
    fn test_cell_at_inverts_cell_rect() {
        let layout = ChartLayout::new(Rect::new(1, 1, 78, 20), 4, 4, 12);
        for row in 0..4 {
            for col in 0..4 {
                let r = layout.cell_rect(row, col).unwrap();
                assert_eq!(layout.cell_at(r.x + r.width / 2, r.y + r.height / 2), Some((row, col)));
            }
        }
        assert_eq!(layout.cell_at(0, 0), None);
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        use ratatui::{backend::TestBackend, Terminal};

        let colors = ThemeColors::from_theme(&app.theme);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| draw_chart(f, f.area(), app, &colors))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Text of a row inside the panel border.
    fn row_text(buf: &Buffer, y: u16) -> String {
        (1..buf.area.width - 1)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_colorbar_shows_value_ticks() {
        use crate::config::ChartConfig;
        use crate::data::fallback_dataset;

        // sales values span 45..170
        let app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        let buf = render(&app, 80, 24);
        let ticks = row_text(&buf, 2);
        let labels: Vec<&str> = ticks.split_whitespace().collect();
        assert_eq!(labels, vec!["60", "80", "100", "120", "140", "160"]);
        assert!(row_text(&buf, 1).contains('▀'));
    }

    #[test]
    fn test_cursor_cell_uses_cursor_colors() {
        use crate::config::ChartConfig;
        use crate::data::fallback_dataset;

        let mut app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        app.finish_animations();
        app.cursor = (2, 1);
        let colors = ThemeColors::from_theme(&app.theme);
        let buf = render(&app, 80, 24);

        let layout = layout(Rect::new(0, 0, 80, 24), &app);
        let cursor = layout.cell_rect(2, 1).unwrap();
        let other = layout.cell_rect(0, 0).unwrap();
        assert_eq!(buf[(cursor.x, cursor.y)].bg, colors.cursor_bg);
        assert_ne!(buf[(other.x, other.y)].bg, colors.cursor_bg);
    }

    #[test]
    fn test_render_does_not_panic_on_tiny_area() {
        use crate::app::App;
        use crate::config::ChartConfig;
        use crate::data::fallback_dataset;
        use ratatui::{backend::TestBackend, Terminal};

        let app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        let colors = ThemeColors::from_theme(&app.theme);
        for (w, h) in [(3, 3), (10, 5), (80, 24)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal
                .draw(|f| draw_chart(f, f.area(), &app, &colors))
                .unwrap();
        }
    }
}
