//! REST API endpoint handlers.

pub mod agent;
pub mod keys;
