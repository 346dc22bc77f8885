//! Agent backend implementations.

pub mod backend;
