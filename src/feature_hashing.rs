//! Feature hashing for inner-product estimation.
//!
//! Feature hashing (Weinberger et al., 2009) projects a sparse weighted vector
//! into `d` dimensions. Each feature id is sent to a bin by one hash function
//! and given a random sign by another:
//!
//! ```text
//! out[h1(id) mod d] += s(id) * value,    s(id) = 2 * (h2(id) mod 2) - 1
//! ```
//!
//! For pairwise-independent `h1`, `h2` the sketch's inner product is an
//! unbiased estimate of the original inner product; variance shrinks as `d`
//! grows. This is the same signed accumulation as a count sketch row.

use tracing::debug;

use crate::error::{Error, Result};
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// Configuration for [`FeatureHashing`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureHashingConfig {
    /// Output dimension.
    pub dim: usize,
    /// Hash family for both the bin and the sign function.
    pub hash: HashKind,
}

impl Default for FeatureHashingConfig {
    fn default() -> Self {
        Self {
            dim: 100,
            hash: HashKind::MixedTab,
        }
    }
}

/// Signed random projection of sparse vectors.
#[derive(Debug)]
pub struct FeatureHashing<H = Box<dyn HashFamily>> {
    dim: usize,
    bin_hash: H,
    sign_hash: H,
}

impl FeatureHashing {
    /// Draw two independent hash functions of `config.hash`.
    pub fn new<R: RandomSource + ?Sized>(
        config: &FeatureHashingConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let bin_hash = config.hash.build(rng)?;
        let sign_hash = config.hash.build(rng)?;
        Self::with_hashes(config.dim, bin_hash, sign_hash)
    }
}

impl<H: HashFamily> FeatureHashing<H> {
    /// Build from two caller-supplied hash functions.
    ///
    /// `bin_hash` and `sign_hash` must be independently drawn; reusing one
    /// function for both correlates bins with signs and biases the estimate.
    pub fn with_hashes(dim: usize, bin_hash: H, sign_hash: H) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidParam("dim must be >= 1"));
        }
        if dim > u32::MAX as usize {
            return Err(Error::InvalidParam("dim must fit in 32 bits"));
        }
        debug!(dim, hash = ?bin_hash.kind(), "feature hashing ready");
        Ok(Self {
            dim,
            bin_hash,
            sign_hash,
        })
    }

    /// Output dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Project a sparse `(id, value)` vector into `dim` dimensions.
    ///
    /// Ids are expected to be distinct; a repeated id simply accumulates.
    pub fn sketch(&self, vector: &[(u32, f64)]) -> Vec<f64> {
        let d = self.dim as u32;
        let mut out = vec![0.0; self.dim];
        for &(id, value) in vector {
            let bin = (self.bin_hash.evaluate(id) % d) as usize;
            if self.sign_hash.evaluate(id) % 2 == 1 {
                out[bin] += value;
            } else {
                out[bin] -= value;
            }
        }
        out
    }

    /// Inner product of two sketches.
    pub fn dotprod(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        for v in [a, b] {
            if v.len() != self.dim {
                return Err(Error::LengthMismatch {
                    expected: self.dim,
                    got: v.len(),
                });
            }
        }
        Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
    }

    /// Squared norm of a sketch, the estimate of the original squared norm.
    pub fn norm_squared(&self, v: &[f64]) -> Result<f64> {
        self.dotprod(v, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SystemRandom;
    use approx::assert_relative_eq;

    #[derive(Debug)]
    struct Identity;

    impl HashFamily for Identity {
        fn evaluate(&self, x: u32) -> u32 {
            x
        }
    }

    #[test]
    fn bins_and_signs_follow_the_hashes() {
        let fh = FeatureHashing::with_hashes(4, Identity, Identity).unwrap();
        // id 1: bin 1, odd -> +; id 2: bin 2, even -> -; id 5: bin 1, odd -> +.
        let v = fh.sketch(&[(1, 0.5), (2, 2.0), (5, 1.0)]);
        assert_eq!(v, vec![0.0, 1.5, -2.0, 0.0]);
    }

    #[test]
    fn collisions_with_opposite_signs_cancel() {
        let fh = FeatureHashing::with_hashes(2, Identity, Identity).unwrap();
        // ids 1 and 3 both land in bin 1 with sign +; id 0 and 2 in bin 0 with sign -.
        let v = fh.sketch(&[(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0)]);
        assert_eq!(v, vec![-2.0, 2.0]);
    }

    #[test]
    fn empty_vector_sketches_to_zero() {
        let mut rng = SystemRandom::seeded(31);
        let fh = FeatureHashing::new(&FeatureHashingConfig::default(), &mut rng).unwrap();
        let v = fh.sketch(&[]);
        assert_eq!(v.len(), 100);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn dotprod_is_plain_inner_product() {
        let fh = FeatureHashing::with_hashes(3, Identity, Identity).unwrap();
        let got = fh.dotprod(&[1.0, 2.0, 3.0], &[0.5, -1.0, 2.0]).unwrap();
        assert_relative_eq!(got, 4.5);
        assert_relative_eq!(fh.norm_squared(&[3.0, 4.0, 0.0]).unwrap(), 25.0);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let fh = FeatureHashing::with_hashes(3, Identity, Identity).unwrap();
        match fh.dotprod(&[1.0; 3], &[1.0; 4]) {
            Err(Error::LengthMismatch { expected: 3, got: 4 }) => {}
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            FeatureHashing::with_hashes(0, Identity, Identity),
            Err(Error::InvalidParam(_))
        ));
    }

    #[test]
    fn single_feature_norm_is_exact() {
        // One feature never collides, so the squared norm is preserved exactly.
        let mut rng = SystemRandom::seeded(32);
        let fh = FeatureHashing::new(&FeatureHashingConfig::default(), &mut rng).unwrap();
        let v = fh.sketch(&[(123_456, -3.0)]);
        assert_relative_eq!(fh.norm_squared(&v).unwrap(), 9.0);
    }
}
