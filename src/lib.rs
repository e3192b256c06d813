//! Fetch a file and compress it into an IMT hash.
//!
//! The [IMT hash](imt) reduces any byte sequence to a fixed
//! digest of 8 bytes, rendered as a 16-character hex string.
//!
//! ```
//! assert_eq!(imt_hash::digest(b"").to_string(), "0000000000000000");
//! assert_eq!(imt_hash::digest(b"A").to_string(), "824bbe00cdc3552d");
//! ```

pub mod checksum;
pub mod hex;
pub mod imt;
pub mod sink;

mod fetch;

pub use fetch::{EventHandler, FetchError, Fetcher, NoEventHandler, Source};
pub use imt::{digest, hash_values, HashError, HashingReader, ImtDigest, ImtHasher};
