use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::store::SiteDataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    Delete,
    Select,
}

pub fn handle_key<S: SiteDataStore>(key: KeyEvent, app: &mut App<S>) -> Action {
    match app.mode {
        Mode::Search => handle_search_key(key, app),
        Mode::Normal => handle_normal_key(key, app),
    }
}

fn handle_normal_key<S: SiteDataStore>(key: KeyEvent, app: &mut App<S>) -> Action {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_cursor(-1);
            Action::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_cursor(1);
            Action::Continue
        }
        KeyCode::PageUp | KeyCode::Char('u') => {
            app.move_cursor_by_page(false);
            Action::Continue
        }
        KeyCode::PageDown | KeyCode::Char('d') => {
            app.move_cursor_by_page(true);
            Action::Continue
        }
        KeyCode::Home => {
            app.cursor_to_top();
            Action::Continue
        }
        KeyCode::End => {
            app.cursor_to_bottom();
            Action::Continue
        }

        // Actions
        KeyCode::Enter => Action::Select,
        KeyCode::Char(' ') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('/') => {
            app.enter_search();
            Action::Continue
        }

        _ => Action::Continue,
    }
}

fn handle_search_key<S: SiteDataStore>(key: KeyEvent, app: &mut App<S>) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Esc => {
            app.cancel_search();
            Action::Continue
        }
        KeyCode::Enter => {
            app.confirm_search();
            Action::Continue
        }
        KeyCode::Backspace => {
            app.pop_search_char();
            Action::Continue
        }
        KeyCode::Up => {
            app.move_cursor(-1);
            Action::Continue
        }
        KeyCode::Down => {
            app.move_cursor(1);
            Action::Continue
        }
        KeyCode::Char(c) => {
            app.push_search_char(c);
            Action::Continue
        }
        _ => Action::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::screen::UsageScreen;
    use crate::store::memory::MemoryStore;
    use crate::usage::DisplayMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::with_cookies(&["a.com", "a.com", "b.com", "example.org"]);
        App::new(
            UsageScreen::new(DisplayMode::Cookies, store),
            Catalog::default(),
        )
    }

    // === Normal mode ===

    #[test]
    fn test_q_quits() {
        let mut app = app();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut app), Action::Quit);
    }

    #[test]
    fn test_esc_quits_in_normal_mode() {
        let mut app = app();
        assert_eq!(handle_key(key(KeyCode::Esc), &mut app), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        assert_eq!(handle_key(key_ctrl(KeyCode::Char('c')), &mut app), Action::Quit);
    }

    #[test]
    fn test_j_and_k_move_cursor() {
        let mut app = app();
        handle_key(key(KeyCode::Char('j')), &mut app);
        assert_eq!(app.cursor, 1);
        handle_key(key(KeyCode::Char('k')), &mut app);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_end_goes_to_action_row() {
        let mut app = app();
        handle_key(key(KeyCode::End), &mut app);
        assert_eq!(app.cursor, 3);
        handle_key(key(KeyCode::Home), &mut app);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_enter_selects_and_space_deletes() {
        let mut app = app();
        assert_eq!(handle_key(key(KeyCode::Enter), &mut app), Action::Select);
        assert_eq!(handle_key(key(KeyCode::Char(' ')), &mut app), Action::Delete);
        assert_eq!(handle_key(key(KeyCode::Delete), &mut app), Action::Delete);
    }

    #[test]
    fn test_backspace_does_nothing_in_normal_mode() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        handle_key(key(KeyCode::Char('a')), &mut app);
        handle_key(key(KeyCode::Enter), &mut app);

        assert_eq!(handle_key(key(KeyCode::Backspace), &mut app), Action::Continue);
        assert_eq!(app.screen.search(), "a");
        assert!(app.screen.store().purged.is_empty());
    }

    #[test]
    fn test_slash_enters_search() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        assert_eq!(app.mode, Mode::Search);
    }

    // === Search mode ===

    #[test]
    fn test_search_chars_filter_immediately() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        handle_key(key(KeyCode::Char('E')), &mut app);
        handle_key(key(KeyCode::Char('x')), &mut app);

        assert_eq!(app.screen.search(), "Ex");
        assert_eq!(app.screen.section_entries().len(), 1);
        assert_eq!(app.screen.section_entries()[0].key, "example.org");
    }

    #[test]
    fn test_search_q_is_text_not_quit() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut app), Action::Continue);
        assert_eq!(app.screen.search(), "q");
    }

    #[test]
    fn test_search_backspace_and_esc() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        handle_key(key(KeyCode::Char('a')), &mut app);
        handle_key(key(KeyCode::Char('b')), &mut app);
        handle_key(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.screen.search(), "a");

        handle_key(key(KeyCode::Esc), &mut app);
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.screen.is_filtering());
    }

    #[test]
    fn test_search_enter_keeps_filter() {
        let mut app = app();
        handle_key(key(KeyCode::Char('/')), &mut app);
        handle_key(key(KeyCode::Char('b')), &mut app);
        handle_key(key(KeyCode::Enter), &mut app);

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.screen.is_filtering());
        assert_eq!(app.screen.section_entries().len(), 1);
    }
}
