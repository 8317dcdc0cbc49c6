//! General-purpose hashes behind the [`HashFamily`] seam.
//!
//! These are not universal families in the formal sense: a random seed (or
//! key) picks one function out of a fixed construction. They exist so that
//! benchmark runs can compare the algebraic families against hashes people
//! actually deploy.

use crate::error::Result;
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// xxHash32 over the key's little-endian bytes, with a random seed.
#[derive(Debug, Clone)]
pub struct Xxh32Hash {
    seed: u32,
}

impl Xxh32Hash {
    /// Draw a 32-bit seed.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            seed: rng.next_u32()?,
        })
    }
}

impl HashFamily for Xxh32Hash {
    fn evaluate(&self, x: u32) -> u32 {
        xxhash_rust::xxh32::xxh32(&x.to_le_bytes(), self.seed)
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::Xxh32)
    }
}

/// Keyed BLAKE3 over the key's little-endian bytes, truncated to 32 bits.
#[derive(Clone)]
pub struct Blake3Hash {
    key: [u8; 32],
}

impl Blake3Hash {
    /// Draw a 256-bit key.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut key = [0u8; 32];
        for chunk in key.chunks_exact_mut(8) {
            chunk.copy_from_slice(&rng.next_u64()?.to_le_bytes());
        }
        Ok(Self { key })
    }
}

impl HashFamily for Blake3Hash {
    fn evaluate(&self, x: u32) -> u32 {
        let out = blake3::keyed_hash(&self.key, &x.to_le_bytes());
        let b = out.as_bytes();
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::Blake3)
    }
}

impl std::fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake3Hash").finish_non_exhaustive()
    }
}
