//! Application layer managing state and the signup workflow.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing form state, user interactions, and pending submissions.

pub mod form;
pub mod state;

pub use form::*;
pub use state::*;
