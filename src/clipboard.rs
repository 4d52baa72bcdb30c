//! Clipboard integration.

use crate::app::App;
use crate::error::{BarscapeError, Result};
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy the selected element's description. Returns the copied text.
pub fn copy_selection(app: &App) -> Result<String> {
    let text = app
        .selected_description()
        .ok_or(BarscapeError::NothingSelected)?;
    copy_to_clipboard(&text)?;
    tracing::debug!(chars = text.len(), "Selection copied");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::fallback_dataset;

    #[test]
    fn test_copy_without_selection() {
        let app = App::new(fallback_dataset(), ChartConfig::default(), 0).unwrap();
        let err = copy_selection(&app).unwrap_err();
        assert!(matches!(err, BarscapeError::NothingSelected));
        assert_eq!(err.to_string(), "Nothing selected");
    }
}
