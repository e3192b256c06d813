use std::io::{self, Read};

use digest::{
    consts::U8, FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};

use super::ImtDigest;

/// Incremental interface to the IMT hash, compatible with the traits
/// from the [`digest`] crate.
///
/// Each position of the hash needs the final value of the previous one,
/// so the input is kept in memory until the hasher is finalized. Memory
/// usage grows with the input: hashing a 1 GiB download holds 1 GiB in
/// the buffer. [`buffered_len`](Self::buffered_len) reports the current
/// size, and [`Reset`] releases it.
///
/// # Examples
///
/// ```
/// use digest::Digest;
/// use imt_hash::ImtHasher;
///
/// let mut hasher = ImtHasher::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
///
/// assert_eq!(hasher.finalize()[..], imt_hash::digest(b"hello world").as_bytes()[..]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ImtHasher {
    buffer: Vec<u8>,
}

impl ImtHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes held in memory.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Compute the digest of the data received so far.
    pub fn finish(&self) -> ImtDigest {
        super::digest(&self.buffer)
    }
}

impl HashMarker for ImtHasher {}

impl OutputSizeUser for ImtHasher {
    type OutputSize = U8;
}

impl Update for ImtHasher {
    fn update(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }
}

impl FixedOutput for ImtHasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(self.finish().as_bytes());
    }
}

impl FixedOutputReset for ImtHasher {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(self.finish().as_bytes());
        Reset::reset(self);
    }
}

impl Reset for ImtHasher {
    fn reset(&mut self) {
        self.buffer = Vec::new();
    }
}

/// `Read` adapter to compute the IMT hash of all data read from `reader`.
pub struct HashingReader<R> {
    hasher: ImtHasher,
    reader: R,
}

impl<R> HashingReader<R> {
    pub fn new(reader: R) -> Self {
        HashingReader {
            hasher: ImtHasher::new(),
            reader,
        }
    }

    /// Digest of the data read so far.
    pub fn finish(&self) -> ImtDigest {
        self.hasher.finish()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}
