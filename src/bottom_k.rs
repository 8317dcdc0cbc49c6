//! Bottom-k MinHash for Jaccard similarity estimation.
//!
//! A bottom-k sketch keeps the `k` smallest hash values of a set under a
//! single hash function `h`. For two sets the `k` smallest values of the
//! union are recovered by merging the two sketches, and the fraction of those
//! present in both sketches estimates
//! \(J(A,B) = |A ∩ B| / |A ∪ B|\).
//!
//! Compared with k-function MinHash this costs one hash evaluation per
//! element; compared with one-permutation hashing it needs no densification
//! but has to maintain a heap.
//!
//! ## Small sets
//!
//! A set with fewer than `k` elements yields a shorter sketch holding all of
//! its hash values. Such sketches still compare (the merge runs out early),
//! but the estimate is divided by `k` and is therefore biased low.
//!
//! ## References
//!
//! - Cohen & Kaplan (2007). "Summarizing data using bottom-k sketches."
//! - Thorup (2013). "Bottom-k and priority sampling, set similarity and
//!   subset sums with minimal independence."

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// Configuration for [`BottomKSketch`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BottomKConfig {
    /// Number of smallest hash values retained.
    pub k: usize,
    /// Hash family to draw from.
    pub hash: HashKind,
}

impl Default for BottomKConfig {
    fn default() -> Self {
        Self {
            k: 200,
            hash: HashKind::MixedTab,
        }
    }
}

/// Bottom-k sketcher.
#[derive(Debug)]
pub struct BottomKSketch<H = Box<dyn HashFamily>> {
    k: usize,
    hash: H,
}

impl BottomKSketch {
    /// Draw a hash function of `config.hash`.
    pub fn new<R: RandomSource + ?Sized>(config: &BottomKConfig, rng: &mut R) -> Result<Self> {
        let hash = config.hash.build(rng)?;
        Self::with_hash(config.k, hash)
    }
}

impl<H: HashFamily> BottomKSketch<H> {
    /// Build around an existing hash function.
    pub fn with_hash(k: usize, hash: H) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidParam("k must be >= 1"));
        }
        debug!(k, hash = ?hash.kind(), "bottom-k sketcher ready");
        Ok(Self { k, hash })
    }

    /// Number of retained values.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The hash function in use.
    pub fn hash(&self) -> &H {
        &self.hash
    }

    /// The `k` smallest hash values of `set`, ascending.
    ///
    /// `set` should contain at least `k` distinct ids; see the module docs for
    /// what happens otherwise.
    pub fn sketch(&self, set: &[u32]) -> Vec<u32> {
        if set.len() < self.k {
            warn!(
                k = self.k,
                n = set.len(),
                "bottom-k sketch of a set smaller than k; estimates will be biased"
            );
        }

        let mut heap: BinaryHeap<u32> = BinaryHeap::with_capacity(self.k.min(set.len()));
        for &x in set {
            let v = self.hash.evaluate(x);
            if heap.len() < self.k {
                heap.push(v);
            } else if let Some(mut top) = heap.peek_mut() {
                if v < *top {
                    *top = v;
                }
            }
        }
        heap.into_sorted_vec()
    }

    /// Estimated Jaccard similarity of the sets behind two sketches.
    ///
    /// Merges the sketches in ascending order and counts values present in
    /// both among the first `k` steps of the merge.
    pub fn estimate(&self, a: &[u32], b: &[u32]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::LengthMismatch {
                expected: a.len(),
                got: b.len(),
            });
        }
        if a.len() > self.k {
            return Err(Error::LengthMismatch {
                expected: self.k,
                got: a.len(),
            });
        }

        let (mut i, mut j) = (0, 0);
        let mut shared = 0usize;
        let mut seen = 0usize;
        while i < a.len() && j < b.len() && seen < self.k {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
            seen += 1;
        }
        Ok(shared as f64 / self.k as f64)
    }
}
