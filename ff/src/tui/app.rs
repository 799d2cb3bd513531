//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.state.should_quit = true;
                return true;
            }

            // === Scroll the conversation ===
            (KeyCode::Up, _) => {
                self.state.scroll = self.state.scroll.saturating_sub(1);
            }
            (KeyCode::Down, _) => {
                self.state.scroll = self.state.scroll.saturating_add(1);
            }
            (KeyCode::PageUp, _) => {
                self.state.scroll = self.state.scroll.saturating_sub(10);
            }
            (KeyCode::PageDown, _) => {
                self.state.scroll = self.state.scroll.saturating_add(10);
            }

            // === Confirm the blueprint under review ===
            (KeyCode::Enter, _) | (KeyCode::Char('y'), _) if self.state.confirmation_enabled() => {
                self.state.queue_confirm();
            }

            // === Submit a new request ===
            (KeyCode::Enter, _) => {
                self.state.queue_submit();
            }

            // === Edit the input buffer ===
            (KeyCode::Backspace, _) if self.state.submission_enabled() => {
                self.state.input.pop();
            }
            (KeyCode::Char(c), m) if self.state.submission_enabled() && !m.contains(KeyModifiers::CONTROL) => {
                self.state.input.push(c);
            }

            _ => {}
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::WorkflowPlan;
    use crate::session::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn empty_plan() -> WorkflowPlan {
        WorkflowPlan {
            summary: "A workflow".to_string(),
            questions_to_user: vec![],
            nodes: vec![],
            connections_logic: String::new(),
        }
    }

    #[test]
    fn test_typing_fills_input() {
        let mut app = App::new();
        type_text(&mut app, "check rss");

        assert_eq!(app.state().input, "check rss");
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = App::new();
        type_text(&mut app, "abc");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.state().input, "ab");
    }

    #[test]
    fn test_enter_queues_submission() {
        let mut app = App::new();
        type_text(&mut app, "check rss");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state().pending_submit.as_deref(), Some("check rss"));
        assert!(app.state().input.is_empty());
    }

    #[test]
    fn test_typing_ignored_while_planning() {
        let mut app = App::new();
        app.state_mut().session.submit("request").unwrap();
        assert_eq!(app.state().session.phase(), Phase::Planning);

        type_text(&mut app, "more text");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().input.is_empty());
        assert!(app.state().pending_submit.is_none());
    }

    #[test]
    fn test_enter_confirms_in_review() {
        let mut app = App::new();
        app.state_mut().session.submit("request").unwrap();
        app.state_mut().session.complete_planning("t-1".to_string(), empty_plan());

        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().pending_confirm);
        assert!(app.state().pending_submit.is_none());
    }

    #[test]
    fn test_y_confirms_in_review() {
        let mut app = App::new();
        app.state_mut().session.submit("request").unwrap();
        app.state_mut().session.complete_planning("t-1".to_string(), empty_plan());

        app.handle_key(key(KeyCode::Char('y')));

        assert!(app.state().pending_confirm);
        // 'y' must not leak into the (disabled) input buffer
        assert!(app.state().input.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(quit);
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = App::new();
        assert!(app.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.state().scroll, 2);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.state().scroll, 1);

        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.state().scroll, 0);
    }
}
