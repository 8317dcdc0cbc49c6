//! Universal hash families over 32-bit keys.
//!
//! Every sketch in this crate is parameterised by a [`HashFamily`]: a function
//! `u32 -> u32` whose random parameters were drawn once, at construction, from
//! a [`RandomSource`]. The families differ in how much independence they
//! guarantee and how fast they evaluate:
//!
//! | Family | Independence | Cost |
//! |--------|--------------|------|
//! | [`MultiplyShift`] | 2-wise (universal) | one multiply |
//! | [`Poly2`] / [`Poly3`] | 2- / 3-wise | Mersenne-field Horner |
//! | [`Polynomial`] | k-wise, k chosen at runtime | k Horner steps |
//! | [`SimpleTab`] | 3-wise, plus Chernoff-style concentration | 4 lookups |
//! | [`TwistedTab`] | as simple, stronger min-wise behaviour | 4 lookups |
//! | [`MixedTab`] | as simple, good for one-permutation sketches | 8 lookups |
//!
//! [`Xxh32Hash`] and [`Blake3Hash`] plug general-purpose hashes into the same
//! interface for comparison runs.
//!
//! ## Initialization
//!
//! There is no "uninitialized" hash value. Each family exposes an `init`
//! constructor that draws its parameters and returns the ready value, so
//! evaluating before initializing cannot be expressed. For runtime selection,
//! [`HashKind::build`] returns a boxed trait object.
//!
//! ## References
//!
//! - Dietzfelbinger et al. (1997). "A reliable randomized algorithm for the
//!   closest-pair problem." (multiply-shift)
//! - Carter & Wegman (1979). "Universal classes of hash functions."
//! - Pătraşcu & Thorup (2012). "The power of simple tabulation hashing."
//! - Dahlgaard, Knudsen, Rotenberg & Thorup (2015). "Hashing for statistics
//!   over k-partitions." (mixed tabulation)

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::random::RandomSource;

mod external;
mod multiply_shift;
mod polynomial;
mod tabulation;

pub use external::{Blake3Hash, Xxh32Hash};
pub use multiply_shift::MultiplyShift;
pub use polynomial::{reduce, Poly2, Poly3, Polynomial, MERSENNE_61};
pub use tabulation::{MixedTab, SimpleTab, TwistedTab};

/// A hash function drawn from a universal family.
///
/// Implementations hold immutable random parameters; `evaluate` is a pure
/// function of its input.
pub trait HashFamily: fmt::Debug + Send + Sync {
    /// Hash a 32-bit key.
    fn evaluate(&self, x: u32) -> u32;

    /// Which built-in family this function was drawn from, if any.
    fn kind(&self) -> Option<HashKind> {
        None
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Box<H> {
    fn evaluate(&self, x: u32) -> u32 {
        (**self).evaluate(x)
    }

    fn kind(&self) -> Option<HashKind> {
        (**self).kind()
    }
}

impl<H: HashFamily + ?Sized> HashFamily for &H {
    fn evaluate(&self, x: u32) -> u32 {
        (**self).evaluate(x)
    }

    fn kind(&self) -> Option<HashKind> {
        (**self).kind()
    }
}

/// Runtime selector for a hash family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HashKind {
    /// Multiply-shift.
    MultiplyShift,
    /// Degree-1 polynomial, 2-independent.
    Poly2,
    /// Degree-2 polynomial, 3-independent.
    Poly3,
    /// Polynomial with `degree` coefficients, `degree`-independent.
    Polynomial {
        /// Number of coefficients (independence order).
        degree: u32,
    },
    /// Mixed tabulation.
    #[default]
    MixedTab,
    /// Simple tabulation.
    SimpleTab,
    /// Twisted tabulation.
    TwistedTab,
    /// Seeded xxHash32.
    Xxh32,
    /// Keyed BLAKE3.
    Blake3,
}

impl HashKind {
    /// Draw a fresh hash function of this kind.
    pub fn build<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Box<dyn HashFamily>> {
        debug!(kind = %self, "drawing hash function");
        Ok(match *self {
            HashKind::MultiplyShift => Box::new(MultiplyShift::init(rng)?),
            HashKind::Poly2 => Box::new(Poly2::init(rng)?),
            HashKind::Poly3 => Box::new(Poly3::init(rng)?),
            HashKind::Polynomial { degree } => Box::new(Polynomial::init_with_degree(degree, rng)?),
            HashKind::MixedTab => Box::new(MixedTab::init(rng)?),
            HashKind::SimpleTab => Box::new(SimpleTab::init(rng)?),
            HashKind::TwistedTab => Box::new(TwistedTab::init(rng)?),
            HashKind::Xxh32 => Box::new(Xxh32Hash::init(rng)?),
            HashKind::Blake3 => Box::new(Blake3Hash::init(rng)?),
        })
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKind::MultiplyShift => write!(f, "multiply-shift"),
            HashKind::Poly2 => write!(f, "poly2"),
            HashKind::Poly3 => write!(f, "poly3"),
            HashKind::Polynomial { degree } => write!(f, "poly:{degree}"),
            HashKind::MixedTab => write!(f, "mixed-tab"),
            HashKind::SimpleTab => write!(f, "simple-tab"),
            HashKind::TwistedTab => write!(f, "twisted-tab"),
            HashKind::Xxh32 => write!(f, "xxh32"),
            HashKind::Blake3 => write!(f, "blake3"),
        }
    }
}

impl FromStr for HashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let kind = match name.as_str() {
            "multiply-shift" | "multishift" => HashKind::MultiplyShift,
            "poly2" => HashKind::Poly2,
            "poly3" => HashKind::Poly3,
            "poly20" => HashKind::Polynomial { degree: 20 },
            "mixed-tab" | "mixedtab" => HashKind::MixedTab,
            "simple-tab" | "simpletab" => HashKind::SimpleTab,
            "twisted-tab" | "twisttab" => HashKind::TwistedTab,
            "xxh32" => HashKind::Xxh32,
            "blake3" => HashKind::Blake3,
            other => {
                let degree = other
                    .strip_prefix("poly:")
                    .and_then(|d| d.parse::<u32>().ok())
                    .filter(|&d| d > 0)
                    .ok_or_else(|| Error::UnknownHashKind(s.to_string()))?;
                HashKind::Polynomial { degree }
            }
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ByteStream, SystemRandom};

    const ALL: [HashKind; 9] = [
        HashKind::MultiplyShift,
        HashKind::Poly2,
        HashKind::Poly3,
        HashKind::Polynomial { degree: 20 },
        HashKind::MixedTab,
        HashKind::SimpleTab,
        HashKind::TwistedTab,
        HashKind::Xxh32,
        HashKind::Blake3,
    ];

    #[test]
    fn kind_names_round_trip() {
        for kind in ALL {
            let parsed: HashKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            "poly20".parse::<HashKind>().unwrap(),
            HashKind::Polynomial { degree: 20 }
        );
        assert_eq!(" Mixed-Tab ".parse::<HashKind>().unwrap(), HashKind::MixedTab);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            "sha1".parse::<HashKind>(),
            Err(Error::UnknownHashKind(_))
        ));
        assert!("poly:0".parse::<HashKind>().is_err());
        assert!("poly:x".parse::<HashKind>().is_err());
    }

    #[test]
    fn built_hash_reports_its_kind_and_is_pure() {
        let mut rng = SystemRandom::seeded(11);
        for kind in ALL {
            let h = kind.build(&mut rng).unwrap();
            assert_eq!(h.kind(), Some(kind));
            for x in [0u32, 1, 42, 0xDEAD_BEEF, u32::MAX] {
                assert_eq!(h.evaluate(x), h.evaluate(x));
            }
        }
    }

    #[test]
    fn independent_draws_differ() {
        let mut rng = SystemRandom::seeded(12);
        for kind in ALL {
            let a = kind.build(&mut rng).unwrap();
            let b = kind.build(&mut rng).unwrap();
            let differing = (0..64u32)
                .filter(|&x| a.evaluate(x) != b.evaluate(x))
                .count();
            assert!(differing > 48, "{kind}: only {differing}/64 outputs differ");
        }
    }

    #[test]
    fn default_kind_is_mixed_tabulation() {
        assert_eq!(HashKind::default(), HashKind::MixedTab);
    }

    #[test]
    fn short_byte_stream_fails_construction() {
        // Ten bytes cover the first bootstrap coefficient but not the second.
        let mut rng = ByteStream::from_bytes(vec![0; 10]);
        match HashKind::MixedTab.build(&mut rng) {
            Err(Error::RandomnessExhausted { needed, remaining }) => {
                assert_eq!((needed, remaining), (8, 2));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }

        let mut rng = ByteStream::from_bytes(vec![0; 12]);
        assert!(matches!(
            HashKind::MultiplyShift.build(&mut rng),
            Err(Error::RandomnessExhausted { .. })
        ));
    }
}
