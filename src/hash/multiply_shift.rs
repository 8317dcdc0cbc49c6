//! Multiply-shift hashing (Dietzfelbinger).

use crate::error::Result;
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// `h(x) = ((a * x + b) mod 2^64) >> 32` with random 64-bit `a`, `b`.
///
/// Pairwise independent only. The fastest family here and the weakest.
#[derive(Debug, Clone)]
pub struct MultiplyShift {
    a: u64,
    b: u64,
}

impl MultiplyShift {
    /// Draw `a` and `b` from `rng`.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let a = rng.next_u64()?;
        let b = rng.next_u64()?;
        Ok(Self { a, b })
    }
}

impl HashFamily for MultiplyShift {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        (self.a.wrapping_mul(u64::from(x)).wrapping_add(self.b) >> 32) as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::MultiplyShift)
    }
}
