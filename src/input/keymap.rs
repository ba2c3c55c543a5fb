use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;
use crate::controller::{InteractionMode, TemporaryToolMode, ToolMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent) -> Option<Command> {
    map_key_to_command_with_preset(key, KeymapPreset::Default)
}

pub fn map_key_to_command_with_preset(key: KeyEvent, preset: KeymapPreset) -> Option<Command> {
    match preset {
        KeymapPreset::Default => map_key_default(key),
        KeymapPreset::Emacs => map_key_emacs(key),
    }
}

/// Temporary tool held while a pointer gesture carries these modifiers.
pub fn temporary_mode_for_modifiers(modifiers: KeyModifiers) -> Option<TemporaryToolMode> {
    const ZOOM: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::SHIFT);
    const SNAPSHOT: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::ALT);
    const INK: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);

    match modifiers {
        ZOOM => Some(TemporaryToolMode::Zoom),
        SNAPSHOT => Some(TemporaryToolMode::Snapshot),
        INK => Some(TemporaryToolMode::Ink),
        _ => None,
    }
}

fn map_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(Command::Rewind),
            KeyCode::Char('f') => Some(Command::SetInteractionMode {
                mode: InteractionMode::FullScreen,
            }),
            KeyCode::Char('p') => Some(Command::SetInteractionMode {
                mode: InteractionMode::Presentation,
            }),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('1') => Some(tool(ToolMode::Text)),
        KeyCode::Char('2') => Some(tool(ToolMode::Move)),
        KeyCode::Char('3') => Some(tool(ToolMode::Magnify)),
        KeyCode::Char('4') => Some(tool(ToolMode::Select)),
        KeyCode::Char('5') => Some(tool(ToolMode::Note)),
        KeyCode::Char('j') => Some(Command::NextPage),
        KeyCode::Char('k') => Some(Command::PrevPage),
        KeyCode::Char('g') => Some(Command::FirstPage),
        KeyCode::Char('G') => Some(Command::LastPage),
        KeyCode::Char('+') => Some(Command::ZoomIn),
        KeyCode::Char('-') => Some(Command::ZoomOut),
        KeyCode::Char('r') => Some(Command::ToggleReadingBar),
        KeyCode::Char('n') => Some(Command::ReadingBarNextLine),
        KeyCode::Char('N') => Some(Command::ReadingBarPrevLine),
        KeyCode::Char('p') => Some(Command::TogglePacer),
        KeyCode::Char('h') => Some(Command::ToggleHideNotes),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Tab => Some(Command::SelectNextAnnotation),
        KeyCode::BackTab => Some(Command::SelectPrevAnnotation),
        KeyCode::Enter => Some(Command::EditCurrentAnnotation),
        KeyCode::Delete | KeyCode::Backspace => Some(Command::RemoveCurrentAnnotation),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::PrevPage),
            KeyCode::Char('<') => Some(Command::FirstPage),
            KeyCode::Char('>') => Some(Command::LastPage),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::ReadingBarNextLine),
            KeyCode::Char('p') => Some(Command::ReadingBarPrevLine),
            KeyCode::Char('v') => Some(Command::NextPage),
            KeyCode::Char('g') => Some(Command::Cancel),
            KeyCode::Char('o') => Some(Command::Rewind),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::PageDown => Some(Command::NextPage),
        KeyCode::PageUp => Some(Command::PrevPage),
        _ => map_key_default(key),
    }
}

fn tool(mode: ToolMode) -> Command {
    Command::SetToolMode { mode }
}
