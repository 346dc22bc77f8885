//! Business logic and port traits for WalletPilot.
//!
//! This crate defines the seams (LLM provider, agent backend, session store,
//! fingerprinter) that the infrastructure layer implements. It depends only on
//! `walletpilot-types` -- never on `walletpilot-infra` or any IO crate.

pub mod agent;
pub mod chat;
pub mod llm;
pub mod session;
pub mod ui;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;
