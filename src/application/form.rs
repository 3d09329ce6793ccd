//! Signup form state machine.
//!
//! `FormState` holds the field values, current errors and submission flags.
//! It changes only through [`FormState::apply`], which maps an event to the
//! next state and, when a valid submit is accepted, a command for the
//! runtime to carry out.

use crate::domain::{Field, FormErrors, SubmissionOutcome, UserData, Validator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    /// Transient; a submit request is being validated.
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged(Field, String),
    SubmitRequested,
    SubmissionSucceeded,
    SubmissionFailed,
}

/// Work requested by the form that happens outside the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Submit(UserData),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: UserData,
    pub errors: FormErrors,
    pub phase: FormPhase,
    pub outcome: SubmissionOutcome,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure form of [`FormState::apply`].
    pub fn reduce(mut self, event: FormEvent) -> (Self, Option<FormCommand>) {
        let command = self.apply(event);
        (self, command)
    }

    pub fn apply(&mut self, event: FormEvent) -> Option<FormCommand> {
        match event {
            FormEvent::FieldChanged(field, value) => {
                self.values.set(field, value);
                None
            }
            FormEvent::SubmitRequested => self.request_submit(),
            FormEvent::SubmissionSucceeded => {
                if self.phase != FormPhase::Submitting {
                    return None;
                }
                self.phase = FormPhase::Succeeded;
                self.outcome = SubmissionOutcome::Success;
                self.values = UserData::default();
                tracing::info!("signup submitted");
                None
            }
            FormEvent::SubmissionFailed => {
                if self.phase != FormPhase::Submitting {
                    return None;
                }
                self.phase = FormPhase::Failed;
                self.outcome = SubmissionOutcome::Error;
                None
            }
        }
    }

    fn request_submit(&mut self) -> Option<FormCommand> {
        if self.is_loading() {
            tracing::debug!("submit ignored while a submission is in flight");
            return None;
        }

        self.phase = FormPhase::Validating;
        self.errors = Validator::validate(&self.values);

        if !self.errors.is_empty() {
            let fields: Vec<&str> = self.errors.fields().map(Field::key).collect();
            tracing::info!(?fields, "signup rejected by validation");
            self.phase = FormPhase::Idle;
            return None;
        }

        self.phase = FormPhase::Submitting;
        self.outcome = SubmissionOutcome::Unset;
        tracing::info!("signup validated, submitting");
        Some(FormCommand::Submit(self.values.clone()))
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }
}
