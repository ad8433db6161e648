use crate::app::{App, InputMode};
use crate::error::CatalogError;
use crate::pipeline::{SortMode, ViewMode};
use crate::record::{LinkSlot, Record};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Everything that can change application state.
#[derive(Debug)]
pub enum Intent {
    SetSearch(String),
    BeginSearch,
    EndSearch,
    SetCategory(Option<String>),
    SetSort(SortMode),
    SetView(ViewMode),
    SetPage(usize),
    NextPage,
    PrevPage,
    MoveSelection { dx: i32, dy: i32 },
    ToggleFavorite(String),
    CopyLink(LinkSlot),
    OpenLink(LinkSlot),
    ToggleTheme,
    ToggleModalOptOut,
    DismissModal,
    ToggleHelp,
    FetchFinished(Result<Vec<Record>, CatalogError>),
    Tick(Instant),
    Quit,
}

/// Map a key press to an intent, given which surface currently has focus.
pub fn intent_for_key(app: &App, key: KeyEvent) -> Option<Intent> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Intent::Quit);
    }

    // If help is showing, any key closes it
    if app.show_help {
        return Some(Intent::ToggleHelp);
    }

    if app.modal.open {
        return match key.code {
            KeyCode::Char(' ') => Some(Intent::ToggleModalOptOut),
            KeyCode::Enter | KeyCode::Esc => Some(Intent::DismissModal),
            _ => None,
        };
    }

    if app.input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Intent::EndSearch),
            KeyCode::Backspace => {
                let mut text = app.filter.search.clone();
                text.pop().map(|_| Intent::SetSearch(text))
            }
            KeyCode::Char(c) => Some(Intent::SetSearch(format!("{}{}", app.filter.search, c))),
            _ => None,
        };
    }

    let intent = match key.code {
        KeyCode::Char('q') => Intent::Quit,
        KeyCode::Char('?') => Intent::ToggleHelp,
        KeyCode::Char('/') => Intent::BeginSearch,
        KeyCode::Esc if !app.filter.search.is_empty() => Intent::SetSearch(String::new()),
        KeyCode::Char('c') => Intent::SetCategory(app.adjacent_category(true)),
        KeyCode::Char('C') => Intent::SetCategory(app.adjacent_category(false)),
        KeyCode::Char('s') => Intent::SetSort(app.filter.sort.toggled()),
        KeyCode::Char('a') => Intent::SetView(ViewMode::All),
        KeyCode::Char('b') => Intent::SetView(ViewMode::Bookmarks),
        KeyCode::Char('t') => Intent::ToggleTheme,
        KeyCode::Left | KeyCode::Char('h') => Intent::MoveSelection { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => Intent::MoveSelection { dx: 1, dy: 0 },
        KeyCode::Up | KeyCode::Char('k') => Intent::MoveSelection { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => Intent::MoveSelection { dx: 0, dy: 1 },
        KeyCode::PageDown | KeyCode::Char('n') => Intent::NextPage,
        KeyCode::PageUp | KeyCode::Char('p') => Intent::PrevPage,
        KeyCode::Char('g') => Intent::SetPage(1),
        KeyCode::Char('G') => Intent::SetPage(usize::MAX),
        KeyCode::Char('f') | KeyCode::Char(' ') => Intent::ToggleFavorite(app.selected_key()?),
        KeyCode::Char('y') => Intent::CopyLink(LinkSlot::Compact),
        KeyCode::Char('Y') => Intent::CopyLink(LinkSlot::Full),
        KeyCode::Char('1') => Intent::OpenLink(LinkSlot::Compact),
        KeyCode::Char('2') => Intent::OpenLink(LinkSlot::Full),
        KeyCode::Char('3') => Intent::OpenLink(LinkSlot::Watch),
        _ => return None,
    };
    Some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{rec, test_app};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let (mut app, _) = test_app();
        app.modal.open = true;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(intent_for_key(&app, key), Some(Intent::Quit)));
    }

    #[test]
    fn test_modal_captures_keys() {
        let (mut app, _) = test_app();
        app.modal.open = true;
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char(' '))),
            Some(Intent::ToggleModalOptOut)
        ));
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Enter)),
            Some(Intent::DismissModal)
        ));
        assert!(intent_for_key(&app, press(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_editing_routes_chars_to_search() {
        let (mut app, _) = test_app();
        app.input_mode = InputMode::Editing;
        app.filter.search = "a".to_string();
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('q'))),
            Some(Intent::SetSearch(ref t)) if t == "aq"
        ));
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Backspace)),
            Some(Intent::SetSearch(ref t)) if t.is_empty()
        ));
        app.filter.search.clear();
        assert!(intent_for_key(&app, press(KeyCode::Backspace)).is_none());
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Esc)),
            Some(Intent::EndSearch)
        ));
    }

    #[test]
    fn test_normal_mode_bindings() {
        let (app, _) = test_app();
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('b'))),
            Some(Intent::SetView(ViewMode::Bookmarks))
        ));
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('Y'))),
            Some(Intent::CopyLink(LinkSlot::Full))
        ));
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Down)),
            Some(Intent::MoveSelection { dx: 0, dy: 1 })
        ));
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('s'))),
            Some(Intent::SetSort(SortMode::Name))
        ));
        // Esc with an empty search does nothing.
        assert!(intent_for_key(&app, press(KeyCode::Esc)).is_none());
        // Nothing selected, nothing to favorite.
        assert!(intent_for_key(&app, press(KeyCode::Char('f'))).is_none());
    }

    #[test]
    fn test_favorite_key_uses_selected_identity() {
        let (mut app, _) = test_app();
        app.update(Intent::FetchFinished(Ok(vec![rec("A1", "Zeta"), rec("A2", "Alpha")])));
        app.update(Intent::MoveSelection { dx: 1, dy: 0 });
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('f'))),
            Some(Intent::ToggleFavorite(ref k)) if k == "A2"
        ));
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (mut app, _) = test_app();
        app.show_help = true;
        assert!(matches!(
            intent_for_key(&app, press(KeyCode::Char('s'))),
            Some(Intent::ToggleHelp)
        ));
    }
}
