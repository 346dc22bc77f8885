//! Wallet adapters: signing keys, the persisted wallet record and the
//! transient wallet-platform credential file.

pub mod credential_file;
pub mod signer;
pub mod store;
