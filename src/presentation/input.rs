use crate::application::{App, AppMode, Focus};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            app.quit();
            return;
        }

        match app.mode {
            AppMode::Landing => Self::handle_landing_mode(app, key),
            AppMode::Form => Self::handle_form_mode(app, key),
        }
    }

    fn handle_landing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.open_form();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                app.quit();
            }
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.close_form();
            }
            KeyCode::Enter => {
                if app.form.can_submit() {
                    app.submit();
                }
            }
            KeyCode::Char(' ') if app.focus == Focus::Submit => {
                if app.form.can_submit() {
                    app.submit();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous();
            }
            KeyCode::Backspace => {
                app.backspace();
            }
            KeyCode::Delete => {
                app.delete();
            }
            KeyCode::Left => {
                app.move_cursor_left();
            }
            KeyCode::Right => {
                app.move_cursor_right();
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::Char(c) => {
                app.insert_char(c);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FormPhase;
    use crate::domain::Field;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_landing_link_opens_form() {
        let mut app = App::default();
        assert_eq!(app.mode, AppMode::Landing);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Form);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_quits_only_from_landing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.value(Field::Name), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Landing);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = App::default();
        app.open_form();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.form.values.is_empty());
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = App::default();
        app.open_form();

        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "123");
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.form.value(Field::Name), "Ana");
        assert_eq!(app.form.value(Field::Cpf), "12");
        assert_eq!(app.focus, Focus::Field(Field::Cpf));

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Field(Field::Name));
        assert_eq!(app.cursor_position, 3);
    }

    #[test]
    fn test_enter_submits_form() {
        let mut app = App::default();
        app.open_form();
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form.phase, FormPhase::Idle);
        assert_eq!(app.form.error(Field::Email), Some("Email is required"));
    }

    #[test]
    fn test_enter_ignored_while_loading() {
        let mut app = App::default();
        app.open_form();
        for (field, value) in [
            (Field::Name, "Ana Silva"),
            (Field::Cpf, "123.456.789-01"),
            (Field::Email, "ana@example.com"),
            (Field::Password, "abcdef"),
            (Field::ConfirmPassword, "abcdef"),
        ] {
            app.set_focus(Focus::Field(field));
            type_text(&mut app, value);
        }

        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_loading());

        app.set_focus(Focus::Field(Field::Email));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_loading());
        assert!(app.form.errors.is_empty());
    }

    #[test]
    fn test_space_on_submit_button_submits() {
        let mut app = App::default();
        app.open_form();
        app.set_focus(Focus::Submit);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.form.errors.len(), 4);
    }
}
