//! Signup - Terminal Signup Form Library
//!
//! A terminal signup form with local validation and simulated persistence,
//! built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
