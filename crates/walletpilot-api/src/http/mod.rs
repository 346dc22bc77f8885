//! HTTP/REST API layer for WalletPilot.
//!
//! Axum-based API serving the credential check and the agent chat endpoint,
//! with CORS for the browser client and optional SPA static serving.

pub mod error;
pub mod handlers;
pub mod router;
