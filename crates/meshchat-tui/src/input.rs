//! One key event becomes one session-state transition.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{App, View};

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    // The help screen swallows whatever key dismisses it.
    if app.view == View::Help {
        app.view = View::Chat;
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.submit(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}
