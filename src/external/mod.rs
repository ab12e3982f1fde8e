//! External service plumbing shared across the application.

pub mod client;
