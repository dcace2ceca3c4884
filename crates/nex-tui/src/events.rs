//! Keyboard mapping.
//!
//! Translation only; no state is touched here. An open explorer modal
//! captures all input until it is dismissed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nex_core::ComponentClass;

use crate::message::Message;
use crate::models::{AppState, Screen, TabId};

pub fn map_key(key: KeyEvent, state: &AppState) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    if state.explorer.as_ref().is_some_and(|e| e.visible) {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseExplorer),
            KeyCode::Left => Some(Message::PrevSeriesAttr),
            KeyCode::Right => Some(Message::NextSeriesAttr),
            KeyCode::Up => Some(Message::ScrollUp),
            KeyCode::Down => Some(Message::ScrollDown),
            KeyCode::PageUp => Some(Message::ScrollUp),
            KeyCode::PageDown => Some(Message::ScrollDown),
            _ => None,
        };
    }

    if state.screen == Screen::Welcome {
        return match key.code {
            KeyCode::Enter => Some(Message::EnterDashboard),
            KeyCode::Char('n') | KeyCode::Down | KeyCode::Up => Some(Message::NextNetwork),
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char(c @ '1'..='6') => TabId::ALL
            .iter()
            .find(|t| t.hotkey() == c)
            .map(|t| Message::SwitchTab(*t)),
        KeyCode::Char('n') => Some(Message::NextNetwork),
        KeyCode::Char('d') => Some(Message::ToggleDarkMode),
        KeyCode::Char('m') => Some(Message::ToggleCountryMode),
        KeyCode::Tab => Some(Message::FocusNext),
        KeyCode::Up => Some(Message::CursorUp),
        KeyCode::Down => Some(Message::CursorDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Message::ToggleSelected),
        KeyCode::Char('b') => Some(Message::OpenExplorer(ComponentClass::Buses)),
        KeyCode::Char('g') => Some(Message::OpenExplorer(ComponentClass::Generators)),
        KeyCode::Char('l') => Some(Message::OpenExplorer(ComponentClass::Lines)),
        KeyCode::Char('k') => Some(Message::OpenExplorer(ComponentClass::Links)),
        KeyCode::Char('s') => Some(Message::OpenExplorer(ComponentClass::StorageUnits)),
        KeyCode::Char('t') => Some(Message::OpenExplorer(ComponentClass::Stores)),
        _ => None,
    }
}
