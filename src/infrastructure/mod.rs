//! Infrastructure layer providing external service integrations.
//!
//! This module contains the key-value storage behind a signup, the delayed
//! submission that writes to it, and configuration loading.

pub mod config;
pub mod persistence;
pub mod submission;

pub use config::*;
pub use persistence::*;
pub use submission::*;
