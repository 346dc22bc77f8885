//! Session fingerprints: derived, non-reversible cache keys.
//!
//! The `Fingerprinter` trait is defined here so the cache does not couple to a
//! hashing algorithm. The SHA-256 adapter lives in walletpilot-infra.

use std::fmt;

use walletpilot_types::credential::CredentialSet;

/// Number of leading hex characters shown in log events.
const SHORT_LEN: usize = 12;

/// Cache key derived from a credential set.
///
/// Not a security boundary. Display prints only the short prefix so a full
/// fingerprint never lands in logs by accident.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionFingerprint(String);

impl SessionFingerprint {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters of the fingerprint, for log correlation.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(SHORT_LEN)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for SessionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionFingerprint(\"{}\")", self.short())
    }
}

impl fmt::Display for SessionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

/// Derives a [`SessionFingerprint`] from a credential set.
///
/// Implementations must be deterministic and must cover every field: two
/// credential sets that differ in any field map to different fingerprints.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, credentials: &CredentialSet) -> SessionFingerprint;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_truncates_long_values() {
        let fp = SessionFingerprint::new("0123456789abcdef0123");
        assert_eq!(fp.short(), "0123456789ab");
        assert_eq!(fp.to_string(), "0123456789ab");
        assert_eq!(fp.as_str(), "0123456789abcdef0123");
    }

    #[test]
    fn short_keeps_short_values() {
        assert_eq!(SessionFingerprint::new("abc").short(), "abc");
    }
}
