//! Application state management for the terminal signup form.
//!
//! This module contains the main application state and view management
//! for the terminal user interface.

use crate::application::{FormCommand, FormEvent, FormState};
use crate::domain::Field;
use crate::infrastructure::{KeyValueStore, MemoryStore, SubmissionSimulator};
use std::time::{Duration, Instant};

/// Represents the view the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Welcome screen with a single link to the form
    Landing,
    /// Signup form is displayed
    Form,
}

/// Which control of the form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Field(field) => field.next().map(Focus::Field).unwrap_or(Focus::Submit),
            Focus::Submit => Focus::Field(Field::ALL[0]),
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Field(field) => field.previous().map(Focus::Field).unwrap_or(Focus::Submit),
            Focus::Submit => Focus::Field(Field::ALL[Field::ALL.len() - 1]),
        }
    }
}

/// Main application state containing the form and UI state.
///
/// # Examples
///
/// ```
/// use signup::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Landing);
/// assert!(!app.form.is_loading());
/// ```
pub struct App {
    /// Field values, errors and submission flags
    pub form: FormState,
    /// Current view
    pub mode: AppMode,
    /// Focused form control
    pub focus: Focus,
    /// Cursor position, in characters, within the focused field
    pub cursor_position: usize,
    /// Frame counter driving the loading spinner
    pub tick_count: usize,
    /// Set when the user asks to leave the application
    pub should_quit: bool,
    simulator: SubmissionSimulator<Box<dyn KeyValueStore>>,
}

impl Default for App {
    fn default() -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        Self::new(SubmissionSimulator::new(store))
    }
}

impl App {
    pub fn new(simulator: SubmissionSimulator<Box<dyn KeyValueStore>>) -> Self {
        Self {
            form: FormState::new(),
            mode: AppMode::Landing,
            focus: Focus::Field(Field::Name),
            cursor_position: 0,
            tick_count: 0,
            should_quit: false,
            simulator,
        }
    }

    pub fn simulator(&self) -> &SubmissionSimulator<Box<dyn KeyValueStore>> {
        &self.simulator
    }

    /// Follows the landing page link to the signup form.
    pub fn open_form(&mut self) {
        self.mode = AppMode::Form;
        self.set_focus(Focus::Field(Field::Name));
    }

    /// Returns to the landing page. Form contents are kept.
    pub fn close_form(&mut self) {
        self.mode = AppMode::Landing;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::Field(field) => Some(field),
            Focus::Submit => None,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor_position = self
            .focused_field()
            .map(|field| self.form.value(field).chars().count())
            .unwrap_or(0);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    /// Inserts a character at the cursor of the focused field.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.form.value(field).to_string();
        let at = byte_offset(&value, self.cursor_position);
        value.insert(at, c);
        self.cursor_position += 1;
        self.dispatch(FormEvent::FieldChanged(field, value), Instant::now());
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if self.cursor_position == 0 {
            return;
        }
        let mut value = self.form.value(field).to_string();
        let at = byte_offset(&value, self.cursor_position - 1);
        value.remove(at);
        self.cursor_position -= 1;
        self.dispatch(FormEvent::FieldChanged(field, value), Instant::now());
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.form.value(field).to_string();
        if self.cursor_position >= value.chars().count() {
            return;
        }
        let at = byte_offset(&value, self.cursor_position);
        value.remove(at);
        self.dispatch(FormEvent::FieldChanged(field, value), Instant::now());
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.focused_len();
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }

    fn focused_len(&self) -> usize {
        self.focused_field()
            .map(|field| self.form.value(field).chars().count())
            .unwrap_or(0)
    }

    pub fn submit(&mut self) {
        self.submit_at(Instant::now());
    }

    /// Requests a submit as of `now`. Ignored while a submission is pending.
    pub fn submit_at(&mut self, now: Instant) {
        self.dispatch(FormEvent::SubmitRequested, now);
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances the spinner and completes a pending submission whose delay
    /// has elapsed.
    pub fn tick_at(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);

        match self.simulator.poll(now) {
            Some(Ok(())) => {
                self.dispatch(FormEvent::SubmissionSucceeded, now);
                self.set_focus(Focus::Field(Field::Name));
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "signup submission failed");
                self.dispatch(FormEvent::SubmissionFailed, now);
            }
            None => {}
        }
    }

    /// Time left before the pending submission completes.
    pub fn submission_remaining(&self, now: Instant) -> Option<Duration> {
        self.simulator.remaining(now)
    }

    fn dispatch(&mut self, event: FormEvent, now: Instant) {
        if let Some(command) = self.form.apply(event) {
            match command {
                FormCommand::Submit(data) => self.simulator.start(data, now),
            }
        }
        self.keep_cursor_in_bounds();
    }

    fn keep_cursor_in_bounds(&mut self) {
        self.cursor_position = self.cursor_position.min(self.focused_len());
    }
}

fn byte_offset(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}
