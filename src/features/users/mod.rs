//! Account identity store backing registration, login, and expense ownership.
//!
//! This feature exposes no routes of its own; the auth feature drives
//! account creation, and the expenses feature resolves owners through it.

pub mod models;
pub mod services;

pub use services::UserService;
