// The session uses exactly two text attributes: the terminal default, and
// the highlight that makes private messages stand out in the log.

use ratatui::style::{Color, Modifier, Style};

/// Highlight for private messages.
pub(crate) const ACCENT_PRIVATE: Color = Color::Yellow;

/// Chrome elements (the separator) stay out of the way.
pub(crate) const TEXT_MUTED: Color = Color::DarkGray;

pub(crate) fn line_style(private: bool) -> Style {
    if private {
        Style::default()
            .fg(ACCENT_PRIVATE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub(crate) fn separator_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}
