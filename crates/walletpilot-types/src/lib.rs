//! Shared domain types for WalletPilot.
//!
//! This crate contains the core domain types used across the WalletPilot
//! workspace: credential sets, chat messages, wallet records, LLM request
//! shapes, configuration and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod chat;
pub mod config;
pub mod credential;
pub mod error;
pub mod llm;
pub mod wallet;
