//! Color themes for the UI.
//!
//! Both themes draw from the Gruvbox palette. [`ThemeColors`] assigns palette
//! entries to the roles the chart, panels and bars use.

use crate::analytics::Severity;
use crate::app::Theme;
use crate::scale::Rgb;
use ratatui::style::Color;

/// The Gruvbox entries the UI draws from.
#[derive(Debug, Clone, Copy)]
struct Palette {
    bg0: Rgb,
    bg1: Rgb,
    bg3: Rgb,
    fg: Rgb,
    orange: Rgb,
    yellow: Rgb,
    green: Rgb,
    aqua: Rgb,
    red: Rgb,
}

const GRUVBOX_DARK: Palette = Palette {
    bg0: Rgb::from_u32(0x282828),
    bg1: Rgb::from_u32(0x3c3836),
    bg3: Rgb::from_u32(0x665c54),
    fg: Rgb::from_u32(0xebdbb2),
    orange: Rgb::from_u32(0xfbb86c),
    yellow: Rgb::from_u32(0xfabd2f),
    green: Rgb::from_u32(0xb8bb26),
    aqua: Rgb::from_u32(0x8ec07c),
    red: Rgb::from_u32(0xfb4934),
};

const GRUVBOX_LIGHT: Palette = Palette {
    bg0: Rgb::from_u32(0xfbf5ea),
    bg1: Rgb::from_u32(0xebdbb2),
    bg3: Rgb::from_u32(0xd5c4a1),
    fg: Rgb::from_u32(0x3c3836),
    orange: Rgb::from_u32(0xaf3a03),
    yellow: Rgb::from_u32(0xb57614),
    green: Rgb::from_u32(0x79740e),
    aqua: Rgb::from_u32(0x667b03),
    red: Rgb::from_u32(0x9d0006),
};

/// Colors by UI role.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Popup and key bar background.
    pub bg: Color,
    /// Body text and value labels on bars.
    pub text: Color,
    /// Panel titles and the row/column under the cursor.
    pub heading: Color,
    /// Field names and axis labels.
    pub label: Color,
    /// Field values and colorbar ticks.
    pub value: Color,
    /// Panel borders.
    pub border: Color,
    /// Text on the cursor cell.
    pub cursor_fg: Color,
    /// Background of the cursor cell.
    pub cursor_bg: Color,
    /// Status bar text.
    pub status_fg: Color,
    /// Status bar background.
    pub status_bg: Color,
    /// Fallback notices and notable insights.
    pub warning: Color,
    /// Anomalies and warning insights.
    pub error: Color,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self::from_palette(&GRUVBOX_DARK),
            Theme::GruvboxLight => Self::from_palette(&GRUVBOX_LIGHT),
        }
    }

    fn from_palette(p: &Palette) -> Self {
        Self {
            bg: rgb(p.bg0),
            text: rgb(p.fg),
            heading: rgb(p.orange),
            label: rgb(p.green),
            value: rgb(p.aqua),
            border: rgb(p.bg3),
            cursor_fg: rgb(p.bg0),
            cursor_bg: rgb(p.orange),
            status_fg: rgb(p.fg),
            status_bg: rgb(p.bg1),
            warning: rgb(p.yellow),
            error: rgb(p.red),
        }
    }

    /// Color for an insight of the given severity.
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.value,
            Severity::Notice => self.warning,
            Severity::Warning => self.error,
        }
    }
}

/// Terminal color for a scene color.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
