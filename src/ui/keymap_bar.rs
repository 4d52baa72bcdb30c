//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, selected: bool, colors: &ThemeColors) {
    let keymap_text = if selected {
        "hjkl:move | Enter:select | Esc:clear | y:copy | e:export | q:quit"
    } else {
        "q:quit | hjkl:move | Enter:select | c:chart | s:colors | d:dataset | g:clusters | r:live | a:replay | i:insights | T:theme | e:export"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
