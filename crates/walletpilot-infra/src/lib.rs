//! Infrastructure layer for WalletPilot.
//!
//! Contains implementations of the traits defined in `walletpilot-core`:
//! the OpenAI-compatible LLM provider, the wallet-bound agent backend,
//! SHA-256 session fingerprints, and filesystem adapters for the wallet
//! record and configuration.

pub mod agent;
pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod llm;
pub mod wallet;
