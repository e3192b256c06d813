//! The IMT hash.
//!
//! The hash state is a set of 8 accumulators, one for each value in
//! [`COEFFICIENTS`]. Accumulator `i` is computed in its own pass over the
//! whole input:
//!
//! ```text
//! for each position i:
//!     for each byte b:
//!         h[i] = ((h[i - 1] + b) * COEFFICIENTS[i]) % 255
//! ```
//!
//! `h[-1]` is always `0`. Every pass reads the final value left by the
//! previous one, so passes can't be merged into a single loop over the
//! bytes.
//!
//! This is a fingerprint, not a cryptographic hash.

mod hasher;

use std::fmt;

use crate::hex::HexString;

pub use hasher::{HashingReader, ImtHasher};

/// Multipliers for every position of the hash.
pub const COEFFICIENTS: [u32; 8] = [2, 3, 5, 7, 11, 13, 17, 19];

/// Number of bytes in a digest.
pub const DIGEST_LEN: usize = COEFFICIENTS.len();

const MODULUS: u32 = 255;

/// Output of the IMT hash.
///
/// Its [`Display`](fmt::Display) implementation writes the digest as a
/// lowercase hex string of `2 * DIGEST_LEN` characters.
///
/// # Examples
///
/// ```
/// let digest = imt_hash::digest(b"A");
/// assert_eq!(digest.to_string(), "824bbe00cdc3552d");
/// assert_eq!(digest.as_bytes()[0], 130);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImtDigest([u8; DIGEST_LEN]);

impl ImtDigest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Hex representation of this digest.
    pub fn to_hex(&self) -> String {
        crate::hex::encode(self.0)
    }
}

impl AsRef<[u8]> for ImtDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ImtDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HexString(&self.0))
    }
}

/// Errors from [`hash_values`].
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HashError {
    #[error("Invalid byte value {value} at index {index}.")]
    InvalidByteValue { index: usize, value: i64 },
}

/// Compute the IMT hash of `data`.
///
/// Accumulators start at `0`, so an empty input produces a digest
/// with all bytes set to zero.
pub fn digest(data: &[u8]) -> ImtDigest {
    let mut state = [0u32; DIGEST_LEN];

    for (i, coefficient) in COEFFICIENTS.iter().enumerate() {
        for &byte in data {
            let prev = if i == 0 { 0 } else { state[i - 1] };
            state[i] = ((prev + u32::from(byte)) * coefficient) % MODULUS;
        }
    }

    ImtDigest(state.map(|acc| (acc & 0xff) as u8))
}

/// Compute the IMT hash of a sequence of integers.
///
/// Every value must be in `0..=255`. If not, it returns an error before
/// computing anything.
///
/// # Examples
///
/// ```
/// # use imt_hash::{hash_values, HashError};
/// assert_eq!(hash_values([65]).unwrap().to_string(), "824bbe00cdc3552d");
///
/// assert_eq!(
///     hash_values([1, 300]),
///     Err(HashError::InvalidByteValue { index: 1, value: 300 }),
/// );
/// ```
pub fn hash_values<I>(values: I) -> Result<ImtDigest, HashError>
where
    I: IntoIterator,
    I::Item: Into<i64>,
{
    let bytes = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let value = value.into();
            u8::try_from(value).map_err(|_| HashError::InvalidByteValue { index, value })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(digest(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let digest = digest(b"");
        assert_eq!(digest, ImtDigest::default());
        assert_eq!(digest.to_string(), "0000000000000000");
    }

    #[test]
    fn single_byte_chain() {
        // Every position uses the final value of the previous one.
        let expected = [130, 75, 190, 0, 205, 195, 85, 45];
        assert_eq!(digest(b"A").as_bytes(), &expected);
        assert_eq!(digest(b"A").to_hex(), "824bbe00cdc3552d");
    }

    #[test]
    fn golden_values() {
        assert_eq!(digest(b"abc").to_string(), "c67e6999de5dcc93");
        assert_eq!(digest(b"hello world").to_string(), "c8879b00502daa1e");
        assert_eq!(digest(b"Hello, world!\n").to_string(), "145af5006e1eaa69");
    }

    #[test]
    fn fixed_length_output() {
        let long: Vec<u8> = (0..10_000).map(|n| (n * 7 % 256) as u8).collect();

        for data in [&b""[..], &b"x"[..], &b"0123456789"[..], long.as_slice()] {
            let hex = digest(data).to_string();
            assert_eq!(hex.len(), 2 * DIGEST_LEN);
            assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn deterministic() {
        let data = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(digest(data), digest(data));
    }

    #[test]
    fn accumulators_below_modulus() {
        let data: Vec<u8> = (0..=255).collect();
        for window in data.windows(3) {
            assert!(digest(window).as_bytes().iter().all(|&b| u32::from(b) < MODULUS));
        }
    }

    #[test]
    fn hash_values_matches_digest() {
        assert_eq!(hash_values([97, 98, 99]), Ok(digest(b"abc")));
        assert_eq!(hash_values(Vec::<u8>::new()), Ok(digest(b"")));
    }

    #[test]
    fn hash_values_rejects_out_of_range() {
        assert_eq!(
            hash_values([0, 255, 256]),
            Err(HashError::InvalidByteValue {
                index: 2,
                value: 256
            })
        );

        assert_eq!(
            hash_values([-1i32]),
            Err(HashError::InvalidByteValue {
                index: 0,
                value: -1
            })
        );
    }
}
