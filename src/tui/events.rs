use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    Watched,
    Detail,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Global Escape (closes the detail view when it is open)
    Escape,
    /// Global Enter (returns to the search input)
    Enter,
    NextFocus,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    UpdateSearch(char),
    DeleteChar,
    ToggleSelect,
    DeleteWatched,
    AddWatched,
    SetRating(u8),
    RatingDown,
    RatingUp,
    ToggleLeftBox,
    ToggleRightBox,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, focus: Focus) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key, focus));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent, focus: Focus) -> Action {
    match (key.code, key.modifiers) {
        // Global
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Escape,
        (KeyCode::Enter, _) => Action::Enter,
        (KeyCode::Tab, _) => Action::NextFocus,
        (KeyCode::F(1), _) => Action::ToggleLeftBox,
        (KeyCode::F(2), _) => Action::ToggleRightBox,

        // Navigation (arrows or Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        _ => focused_key_to_action(key, focus),
    }
}

fn focused_key_to_action(key: KeyEvent, focus: Focus) -> Action {
    let plain = matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT);

    match (focus, key.code) {
        (Focus::Search, KeyCode::Char(c)) if plain => Action::UpdateSearch(c),
        (Focus::Search, KeyCode::Backspace) => Action::DeleteChar,

        (Focus::Results, KeyCode::Char(' ')) => Action::ToggleSelect,

        (Focus::Watched, KeyCode::Char('d')) | (Focus::Watched, KeyCode::Delete) => {
            Action::DeleteWatched
        }

        (Focus::Detail, KeyCode::Char('0')) => Action::SetRating(10),
        (Focus::Detail, KeyCode::Char(c @ '1'..='9')) => {
            Action::SetRating(c.to_digit(10).map(|d| d as u8).unwrap_or(0))
        }
        (Focus::Detail, KeyCode::Left) => Action::RatingDown,
        (Focus::Detail, KeyCode::Right) => Action::RatingUp,
        (Focus::Detail, KeyCode::Char('a')) => Action::AddWatched,
        (Focus::Detail, KeyCode::Backspace) => Action::Escape,

        (_, KeyCode::Char('q')) if focus != Focus::Search => Action::Quit,

        _ => Action::None,
    }
}
