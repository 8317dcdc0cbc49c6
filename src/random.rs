//! Randomness sources for drawing hash-family parameters.
//!
//! Every hash family and sketch draws its random parameters exactly once, at
//! construction, from a [`RandomSource`] passed in by the caller. Two sources
//! are provided:
//!
//! - [`SystemRandom`]: a seeded or entropy-seeded `StdRng`.
//! - [`ByteStream`]: a replayed buffer of random bytes, typically a file of
//!   atmospheric noise downloaded from random.org, so that an experiment can be
//!   re-run against exactly the same randomness.
//!
//! There is no process-wide source. Each source is an owned value, so two call
//! sites can build independent hash families without coordinating.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};

/// Supplier of uniform integers and single bits.
pub trait RandomSource {
    /// A uniform 32-bit integer.
    fn next_u32(&mut self) -> Result<u32>;

    /// A uniform 64-bit integer.
    fn next_u64(&mut self) -> Result<u64>;

    /// A single uniform bit.
    fn next_bit(&mut self) -> Result<bool>;
}

/// Live pseudo-random generator backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Seed from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible trials.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SystemRandom {
    fn next_u32(&mut self) -> Result<u32> {
        Ok(self.rng.next_u32())
    }

    fn next_u64(&mut self) -> Result<u64> {
        Ok(self.rng.next_u64())
    }

    fn next_bit(&mut self) -> Result<bool> {
        Ok(self.rng.gen::<bool>())
    }
}

/// A finite stream of pre-recorded random bytes.
///
/// Bytes are consumed from the end of the buffer. Integers are assembled
/// most-significant byte first. Bits are handed out one at a time from a
/// popped byte, least-significant bit first, so eight bits cost one byte.
#[derive(Debug, Clone)]
pub struct ByteStream {
    bytes: Vec<u8>,
    bit_byte: u8,
    bits_left: u8,
}

impl ByteStream {
    /// Read the whole file at `path` into a stream.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "opened random byte stream");
        Ok(Self::from_bytes(bytes))
    }

    /// Build a stream over an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            bit_byte: 0,
            bits_left: 0,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    /// End the stream's lifecycle, returning the number of unused bytes.
    pub fn close(self) -> usize {
        let unused = self.bytes.len();
        debug!(unused, "closed random byte stream");
        unused
    }

    fn take(&mut self, needed: usize) -> Result<u64> {
        if self.bytes.len() < needed {
            return Err(Error::RandomnessExhausted {
                needed,
                remaining: self.bytes.len(),
            });
        }
        let mut acc = 0u64;
        for _ in 0..needed {
            // Length was checked above.
            let b = self.bytes.pop().unwrap_or_default();
            acc = (acc << 8) | u64::from(b);
        }
        Ok(acc)
    }
}

impl RandomSource for ByteStream {
    fn next_u32(&mut self) -> Result<u32> {
        Ok(self.take(4)? as u32)
    }

    fn next_u64(&mut self) -> Result<u64> {
        self.take(8)
    }

    fn next_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            self.bit_byte = self.take(1)? as u8;
            self.bits_left = 8;
        }
        let bit = self.bit_byte & 1 == 1;
        self.bit_byte >>= 1;
        self.bits_left -= 1;
        Ok(bit)
    }
}
