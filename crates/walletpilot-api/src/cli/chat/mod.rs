//! Interactive terminal chat client for WalletPilot.
//!
//! Prompts for credentials with hidden input, validates them against a
//! running server, then relays messages to the agent and renders replies as
//! markdown. Credentials live in memory only. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod client;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
