//! Maps the session state onto the terminal frame.
//!
//! Layout, bottom to top: one padding row, the input row, the separator,
//! and the log area filling the rest. Two columns of horizontal margin all
//! around. The newest log line sits on the bottom row of the log area;
//! private lines get the highlight attribute.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::scrollback::LogLine;
use crate::ui::{theme, App, View};

/// Rows below the log area: separator, input line, bottom padding. The
/// scroll-back capacity is the terminal height minus these.
pub(crate) const CHROME_ROWS: u16 = 3;

const PADDING_H: u16 = 2;

pub(crate) const HELP_LINES: &[&str] = &[
    "=== Help ===",
    "",
    "Commands:",
    "/h - Display this help message",
    "/ln - Display the list of nodes",
    "/lc - Display the list of Channels",
    "/sc <#> - Switch to Channel Number <#>",
    "/m !nodeId <message> - Send a private message to nodeId",
    "/cs - Clear Screen / Message History",
    "/q or Ctrl-C - Quit",
    "",
    "(Press any key to return to chat)",
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    match app.view {
        View::Help => render_help(f),
        View::Chat => render_chat(f, app),
    }
}

fn layout(f: &Frame) -> [Rect; 4] {
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .horizontal_margin(PADDING_H)
    .split(f.area());
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

fn render_chat(f: &mut Frame, app: &App) {
    let [log_area, separator, input_row, _padding] = layout(f);

    let height = log_area.height as usize;
    let count = if app.scroll_offset == 0 {
        height
    } else {
        app.scroll_offset
    };
    let window: Vec<&LogLine> = app.scrollback.window(count).collect();
    // Bottom-align; when the window is taller than the area, keep the newest.
    let visible = window.len().min(height);
    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for _ in 0..height.saturating_sub(visible) {
        lines.push(Line::raw(""));
    }
    for log in &window[window.len() - visible..] {
        lines.push(Line::styled(log.text.clone(), theme::line_style(log.private)));
    }
    f.render_widget(Paragraph::new(lines), log_area);

    render_separator(f, separator);

    let prompt_width = app.prompt.chars().count() as u16;
    let input_width = app.input.chars().count() as u16;
    f.render_widget(
        Paragraph::new(format!("{} {} ", app.prompt, app.input)),
        input_row,
    );
    f.set_cursor_position((input_row.x + prompt_width + 1 + input_width, input_row.y));
}

fn render_help(f: &mut Frame) {
    let [log_area, separator, _input_row, _padding] = layout(f);

    let height = log_area.height as usize;
    let visible = HELP_LINES.len().min(height);
    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for _ in 0..height.saturating_sub(visible) {
        lines.push(Line::raw(""));
    }
    for text in &HELP_LINES[HELP_LINES.len() - visible..] {
        lines.push(Line::raw(*text));
    }
    f.render_widget(Paragraph::new(lines), log_area);

    render_separator(f, separator);
}

fn render_separator(f: &mut Frame, area: Rect) {
    let rule = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::styled(rule, theme::separator_style())),
        area,
    );
}
