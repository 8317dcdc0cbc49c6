//! One-permutation (k-partition) MinHash with densification.
//!
//! Classic MinHash needs `k` hash functions and `k` passes over the set. One
//! permutation hashing (Li, Owen & Zhang 2012) uses a single hash `h`: the
//! value `v = h(x)` is split into a bin `v mod k` and a rank `v div k`, and
//! each bin keeps its smallest rank.
//!
//! Small sets leave bins empty, which biases the estimator. Densification
//! (Shrivastava & Li 2014) fills every empty bin from a non-empty neighbour.
//! Each bin owns a random direction bit drawn once per sketcher:
//!
//! - bit 0: copy the nearest non-empty bin to the **left** (circularly),
//! - bit 1: copy the nearest non-empty bin to the **right** (circularly),
//!
//! and the copied rank is offset by `distance * T`, where
//! `T = u32::MAX / k + 1` is strictly above every genuine rank. Genuine and
//! synthesized values therefore never coincide, except through 32-bit
//! wrap-around at distances near `k`.
//!
//! ## Empty input
//!
//! With no element there is no bin to copy from. [`OnePermutationSketch::sketch`]
//! then returns `k` copies of [`EMPTY_BIN`] untouched. Two empty sets estimate
//! as identical; an empty set against a non-empty one estimates (almost
//! surely) 0.

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// Rank stored in a bin no element landed in.
pub const EMPTY_BIN: u32 = u32::MAX;

/// Configuration for [`OnePermutationSketch`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnePermutationConfig {
    /// Number of bins (signature length). Must be at least 2.
    pub k: usize,
    /// Hash family to draw from.
    pub hash: HashKind,
}

impl Default for OnePermutationConfig {
    fn default() -> Self {
        Self {
            k: 200,
            hash: HashKind::MixedTab,
        }
    }
}

/// k-partition MinHash sketcher.
///
/// Owns one hash function and one direction bit per bin. Every sketch made by
/// the same sketcher uses the same bits, which is what makes signatures from
/// different sets comparable.
#[derive(Debug)]
pub struct OnePermutationSketch<H = Box<dyn HashFamily>> {
    k: usize,
    hash: H,
    /// `true`: filled by the right-to-left sweep.
    fill_from_right: Vec<bool>,
}

impl OnePermutationSketch {
    /// Draw a hash function of `config.hash` and the densification bits.
    pub fn new<R: RandomSource + ?Sized>(
        config: &OnePermutationConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let hash = config.hash.build(rng)?;
        Self::with_hash(config.k, hash, rng)
    }
}

impl<H: HashFamily> OnePermutationSketch<H> {
    /// Build around an existing hash function; only the direction bits are drawn.
    pub fn with_hash<R: RandomSource + ?Sized>(k: usize, hash: H, rng: &mut R) -> Result<Self> {
        if k < 2 {
            return Err(Error::InvalidParam("k must be >= 2"));
        }
        if k > u32::MAX as usize {
            return Err(Error::InvalidParam("k must fit in 32 bits"));
        }
        let fill_from_right = (0..k)
            .map(|_| rng.next_bit())
            .collect::<Result<Vec<_>>>()?;
        debug!(k, hash = ?hash.kind(), "one-permutation sketcher ready");
        Ok(Self {
            k,
            hash,
            fill_from_right,
        })
    }

    /// Signature length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The hash function in use.
    pub fn hash(&self) -> &H {
        &self.hash
    }

    /// Smallest value strictly above every genuine rank.
    fn threshold(&self) -> u32 {
        u32::MAX / self.k as u32 + 1
    }

    /// Bin minima before densification. Empty bins hold [`EMPTY_BIN`].
    pub fn sketch_raw(&self, set: &[u32]) -> Vec<u32> {
        let k = self.k as u32;
        let mut bins = vec![EMPTY_BIN; self.k];
        for &x in set {
            let v = self.hash.evaluate(x);
            let bin = (v % k) as usize;
            let rank = v / k;
            if rank < bins[bin] {
                bins[bin] = rank;
            }
        }
        bins
    }

    /// Densified signature of length `k`.
    ///
    /// `set` is a collection of distinct element ids; order does not matter.
    pub fn sketch(&self, set: &[u32]) -> Vec<u32> {
        let mut bins = self.sketch_raw(set);
        self.densify(&mut bins);
        bins
    }

    /// Densified signature with every bin truncated to its low `b` bits.
    pub fn bbit_sketch(&self, set: &[u32], b: u32) -> Result<Vec<u32>> {
        if b == 0 || b > 32 {
            return Err(Error::InvalidParam("b must be in [1, 32]"));
        }
        let mask = if b == 32 { u32::MAX } else { (1u32 << b) - 1 };
        let mut bins = self.sketch(set);
        for v in &mut bins {
            *v &= mask;
        }
        Ok(bins)
    }

    /// Fraction of bins on which two signatures agree.
    pub fn estimate(&self, a: &[u32], b: &[u32]) -> Result<f64> {
        for sig in [a, b] {
            if sig.len() != self.k {
                return Err(Error::LengthMismatch {
                    expected: self.k,
                    got: sig.len(),
                });
            }
        }
        let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
        Ok(matches as f64 / self.k as f64)
    }

    fn densify(&self, bins: &mut [u32]) {
        let k = bins.len();
        let thr = self.threshold();
        let empty: Vec<bool> = bins.iter().map(|&v| v == EMPTY_BIN).collect();

        let (Some(first), Some(last)) = (
            empty.iter().position(|&e| !e),
            empty.iter().rposition(|&e| !e),
        ) else {
            warn!(k, "one-permutation sketch of an empty set; leaving all bins empty");
            return;
        };

        let fill =
            |neighbor: u32, distance: u32| neighbor.wrapping_add(distance.wrapping_mul(thr));
        let mut filled = 0usize;

        // Left-to-right: the priming position is `last`, seen at distance
        // (k - 1 - last) from the virtual bin just before index 0.
        let mut neighbor = bins[last];
        let mut run = (k - 1 - last) as u32;
        for i in 0..k {
            if !empty[i] {
                neighbor = bins[i];
                run = 0;
            } else {
                run += 1;
                if !self.fill_from_right[i] {
                    bins[i] = fill(neighbor, run);
                    filled += 1;
                }
            }
        }

        // Right-to-left, primed from `first` seen from the virtual bin at k.
        let mut neighbor = bins[first];
        let mut run = first as u32;
        for i in (0..k).rev() {
            if !empty[i] {
                neighbor = bins[i];
                run = 0;
            } else {
                run += 1;
                if self.fill_from_right[i] {
                    bins[i] = fill(neighbor, run);
                    filled += 1;
                }
            }
        }

        trace!(k, filled, "densified");
    }
}
