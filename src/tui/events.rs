//! Key handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Job};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    Run(Job),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Outcome {
    if key.kind == KeyEventKind::Release {
        return Outcome::Continue;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Outcome::Quit;
    }
    if app.input.is_some() {
        return handle_input_mode(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Outcome::Quit,
        KeyCode::Tab | KeyCode::Right => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left => app.previous_tab(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('c') => app.clear_output(),
        KeyCode::Enter => {
            if let Some(job) = app.trigger() {
                return Outcome::Run(job);
            }
        }
        _ => {}
    }
    Outcome::Continue
}

fn handle_input_mode(app: &mut App, key: KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => {
            if let Some(job) = app.submit_input() {
                return Outcome::Run(job);
            }
        }
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{Action, Tab};

    fn press(app: &mut App, code: KeyCode) -> Outcome {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Outcome::Quit);
        assert_eq!(press(&mut app, KeyCode::Esc), Outcome::Quit);
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Outcome::Quit
        );
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Monitor);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Reports);
    }

    #[test]
    fn test_enter_runs_action_without_prompts() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        match press(&mut app, KeyCode::Enter) {
            Outcome::Run(job) => assert_eq!(job.action, Action::Dashboard),
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_typing_goes_to_the_input_line() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_action(), Action::MonitorHeal);
        assert_eq!(press(&mut app, KeyCode::Enter), Outcome::Continue);

        // 'q' is text while the input line is open
        assert_eq!(press(&mut app, KeyCode::Char('q')), Outcome::Continue);
        press(&mut app, KeyCode::Char('1'));
        match press(&mut app, KeyCode::Enter) {
            Outcome::Run(job) => {
                assert_eq!(job.action, Action::MonitorHeal);
                assert_eq!(job.inputs, vec!["q1"]);
            }
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_esc_cancels_input_without_quitting() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_some());
        assert_eq!(press(&mut app, KeyCode::Esc), Outcome::Continue);
        assert!(app.input.is_none());
    }

    #[test]
    fn test_clear_output() {
        let mut app = App::new();
        app.push_output("x", vec!["line".to_string()]);
        press(&mut app, KeyCode::Char('c'));
        assert!(app.output.is_empty());
    }
}
