//! Verification of fetched files against a known SHA-2 checksum.
//!
//! The IMT digest is only a fingerprint. When the caller knows the
//! SHA-256 or SHA-512 of the file, the body can be checked while it is
//! hashed, so a corrupted or replaced file is never fingerprinted.

use std::{
    fmt,
    io::{self, Read},
};

use sha2::Digest as _;

use crate::hex::{self, HexString};

/// Algorithm to verify a fetched file.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum ChecksumAlgorithm {
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    fn name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }

    /// Size, in bytes, of a checksum for this algorithm.
    fn output_size(self) -> usize {
        match self {
            ChecksumAlgorithm::Sha256 => <sha2::Sha256 as digest::OutputSizeUser>::output_size(),
            ChecksumAlgorithm::Sha512 => <sha2::Sha512 as digest::OutputSizeUser>::output_size(),
        }
    }
}

/// Expected checksum of a fetched file, parsed from `algorithm:hex`.
///
/// # Examples
///
/// ```
/// # use imt_hash::checksum::*;
/// let checksum: Checksum = "sha256:BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
///     .parse()
///     .unwrap();
///
/// assert_eq!(checksum.algorithm(), ChecksumAlgorithm::Sha256);
/// assert_eq!(checksum.expected()[..2], [0xba, 0x78]);
///
/// // Always printed in lowercase.
/// assert_eq!(
///     checksum.to_string(),
///     "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Checksum {
    algorithm: ChecksumAlgorithm,
    expected: Vec<u8>,
}

/// Errors from the checksum parser.
#[derive(thiserror::Error, Debug)]
pub enum ChecksumError {
    #[error("Invalid checksum algorithm.")]
    InvalidAlgorithm,

    #[error("Invalid checksum value.")]
    InvalidValue,
}

impl Checksum {
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Expected output of the algorithm.
    pub fn expected(&self) -> &[u8] {
        &self.expected
    }

    /// Return a `Read` instance that verifies the data from `reader`.
    ///
    /// The checksum is compared when `reader` reaches EOF. On mismatch,
    /// the read fails with an
    /// [`InvalidData`](::std::io::ErrorKind::InvalidData) error, so the
    /// caller never sees a clean end of the stream.
    pub fn wrap_reader<R: Read>(&self, reader: R) -> impl Read {
        let hasher = match self.algorithm {
            ChecksumAlgorithm::Sha256 => Hasher::Sha256(sha2::Sha256::new()),
            ChecksumAlgorithm::Sha512 => Hasher::Sha512(sha2::Sha512::new()),
        };

        VerifyingReader {
            checksum: self.clone(),
            hasher: Some(hasher),
            reader,
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm.name(), HexString(&self.expected))
    }
}

impl std::str::FromStr for Checksum {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, value) = match s.split_once(':') {
            Some(("sha256", value)) => (ChecksumAlgorithm::Sha256, value),
            Some(("sha512", value)) => (ChecksumAlgorithm::Sha512, value),
            _ => return Err(ChecksumError::InvalidAlgorithm),
        };

        match hex::decode(value) {
            Some(expected) if expected.len() == algorithm.output_size() => {
                Ok(Checksum {
                    algorithm,
                    expected,
                })
            }

            _ => Err(ChecksumError::InvalidValue),
        }
    }
}

impl TryFrom<String> for Checksum {
    type Error = ChecksumError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        source.parse()
    }
}

enum Hasher {
    Sha256(sha2::Sha256),
    Sha512(sha2::Sha512),
}

impl Hasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha512(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Hasher::Sha256(h) => h.finalize().to_vec(),
            Hasher::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

struct VerifyingReader<R> {
    checksum: Checksum,

    /// `None` once the data has been verified.
    hasher: Option<Hasher>,

    reader: R,
}

impl<R: Read> Read for VerifyingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;

        if n > 0 {
            if let Some(hasher) = &mut self.hasher {
                hasher.update(&buf[..n]);
            }
        } else if !buf.is_empty() {
            // EOF.
            self.verify()?;
        }

        Ok(n)
    }
}

impl<R> VerifyingReader<R> {
    fn verify(&mut self) -> io::Result<()> {
        let Some(hasher) = self.hasher.take() else {
            return Ok(());
        };

        let computed = hasher.finalize();
        if computed == self.checksum.expected {
            return Ok(());
        }

        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Checksum mismatch. Expected {}, got {}:{}.",
                self.checksum,
                self.checksum.algorithm.name(),
                HexString(&computed),
            ),
        ))
    }
}
