//! Cryptographic operations for WalletPilot.
//!
//! - `fingerprint`: SHA-256 session fingerprints over credential sets

pub mod fingerprint;
