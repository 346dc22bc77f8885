//! Agent session caching.
//!
//! - [`fingerprint`]: derives a cache key from a credential set
//! - [`store`]: injectable fingerprint -> handle storage
//! - [`cache`]: get-or-create over a store and an agent backend

pub mod cache;
pub mod fingerprint;
pub mod store;
