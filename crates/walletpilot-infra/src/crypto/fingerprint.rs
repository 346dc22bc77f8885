//! SHA-256 session fingerprints.
//!
//! Implements the `Fingerprinter` trait from `walletpilot-core` using the
//! `sha2` crate (RustCrypto ecosystem).

use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use walletpilot_core::session::fingerprint::{Fingerprinter, SessionFingerprint};
use walletpilot_types::credential::CredentialSet;

/// SHA-256 implementation of `Fingerprinter`.
///
/// Each field is fed to the digest as an 8-byte big-endian length followed by
/// its bytes, so no choice of field contents can make two different
/// credential sets hash the same input. Output is lowercase hex.
pub struct Sha256Fingerprinter;

impl Sha256Fingerprinter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, credentials: &CredentialSet) -> SessionFingerprint {
        let mut hasher = Sha256::new();
        for field in [
            credentials.model_api_key().expose_secret(),
            credentials.wallet_key_id(),
            credentials.wallet_private_key().expose_secret(),
            credentials.network_id().as_str(),
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }
        SessionFingerprint::new(format!("{:x}", hasher.finalize()))
    }
}
