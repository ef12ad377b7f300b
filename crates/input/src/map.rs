//! Key mapping from terminal events to game keys and UI commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::inbox::KeyInbox;
use crate::types::{GameMode, Key};

/// Non-gameplay commands the terminal front end reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Start from the menu or restart after game over
    Start,
    Quit,
}

/// Map a key code to one of the five game keys.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

/// Map a key press to a UI command for the current mode.
///
/// Quit works everywhere. Start is `Enter`/`s` in the menu and `Enter`/`r`
/// on the game-over screen.
pub fn map_command(mode: GameMode, key: KeyEvent) -> Option<UiCommand> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiCommand::Quit);
    }
    match (mode, key.code) {
        (_, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => Some(UiCommand::Quit),
        (GameMode::Menu, KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S')) => {
            Some(UiCommand::Start)
        }
        (GameMode::GameOver, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')) => {
            Some(UiCommand::Start)
        }
        _ => None,
    }
}

/// Feeds terminal key events into a [`KeyInbox`].
///
/// Terminals that report key releases drive press/release directly. Others
/// only ever send presses (and auto-repeat presses), so every press is
/// delivered as a tap.
#[derive(Debug, Clone, Copy)]
pub struct TerminalKeys {
    reports_release: bool,
}

impl TerminalKeys {
    pub fn new(reports_release: bool) -> Self {
        Self { reports_release }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Route one event. Returns a UI command when the key is one in `mode`.
    pub fn handle(&self, inbox: &KeyInbox, mode: GameMode, event: KeyEvent) -> Option<UiCommand> {
        if event.kind == KeyEventKind::Press {
            if let Some(command) = map_command(mode, event) {
                tracing::debug!(?command, mode = mode.as_str(), "ui command");
                return Some(command);
            }
        }

        if let Some(key) = map_key(event.code) {
            match (event.kind, self.reports_release) {
                (KeyEventKind::Press, true) => inbox.press(key),
                (KeyEventKind::Release, true) => inbox.release(key),
                // Auto-repeat while held; the held flag is already set.
                (KeyEventKind::Repeat, true) => {}
                (KeyEventKind::Press | KeyEventKind::Repeat, false) => inbox.tap(key),
                (KeyEventKind::Release, false) => inbox.release(key),
            }
        }
        None
    }
}
