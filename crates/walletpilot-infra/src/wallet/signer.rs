//! secp256k1 wallet signing keys and EVM address derivation.

use std::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};

use walletpilot_types::error::WalletError;

/// A wallet signing key together with the address it controls.
///
/// Debug output shows the address only.
pub struct WalletSigner {
    key: SigningKey,
    address: String,
}

impl WalletSigner {
    /// Parse a 32-byte hex key, with or without the `0x` prefix.
    pub fn from_hex(value: &str) -> Result<Self, WalletError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes =
            hex::decode(digits).map_err(|e| WalletError::InvalidKey(format!("not hex: {e}")))?;
        if bytes.len() != 32 {
            return Err(WalletError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| WalletError::InvalidKey("not a valid secp256k1 scalar".to_string()))?;
        Ok(Self::from_key(key))
    }

    /// Generate a fresh key from the OS random source.
    pub fn generate() -> Self {
        Self::from_key(SigningKey::random(&mut OsRng))
    }

    fn from_key(key: SigningKey) -> Self {
        let address = address_from_verifying_key(key.verifying_key());
        Self { key, address }
    }

    /// Lowercase `0x`-prefixed address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// `0x`-prefixed hex encoding of the private key, for the wallet record.
    pub fn export_hex(&self) -> String {
        format!("0x{}", hex::encode(self.key.to_bytes()))
    }
}

impl fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Keccak-256 of the uncompressed public key without its `0x04` tag; the
/// address is the last 20 bytes.
fn address_from_verifying_key(key: &VerifyingKey) -> String {
    let encoded = key.to_encoded_point(false);
    let pubkey = encoded.as_bytes();

    let mut hasher = Keccak256::new();
    hasher.update(&pubkey[1..]);
    let digest = hasher.finalize();
    format!("0x{}", hex::encode(&digest[12..]))
}

/// Case-insensitive address comparison.
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_known_address_for_key_one() {
        let signer = WalletSigner::from_hex(KEY_ONE).unwrap();
        assert_eq!(signer.address(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn test_prefix_is_optional() {
        let with = WalletSigner::from_hex(KEY_ONE).unwrap();
        let without = WalletSigner::from_hex(&KEY_ONE[2..]).unwrap();
        assert_eq!(with.address(), without.address());
    }

    #[test]
    fn test_export_roundtrips_through_parse() {
        let signer = WalletSigner::generate();
        let restored = WalletSigner::from_hex(&signer.export_hex()).unwrap();
        assert_eq!(signer.address(), restored.address());
        assert_eq!(signer.export_hex().len(), 66);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(WalletSigner::from_hex("0xzz").is_err());
        assert!(WalletSigner::from_hex("0x1234").is_err());
        // Zero is not a valid scalar.
        assert!(WalletSigner::from_hex(&format!("0x{}", "0".repeat(64))).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = WalletSigner::from_hex(KEY_ONE).unwrap();
        let debug = format!("{signer:?}");
        assert!(debug.contains("0x7e5f4552"));
        assert!(!debug.contains(&KEY_ONE[2..]));
    }

    #[test]
    fn test_same_address_ignores_case() {
        assert!(same_address(
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        ));
        assert!(!same_address("0x01", "0x02"));
    }
}
