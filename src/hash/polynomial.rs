//! Polynomial hashing over the Mersenne field `GF(2^61 - 1)`.
//!
//! A random polynomial of degree `k - 1` with coefficients in `[0, p)` is a
//! `k`-independent hash family (Carter & Wegman). Reduction modulo the
//! Mersenne prime `p = 2^61 - 1` needs no division: since `2^61 ≡ 1 (mod p)`,
//! `s ≡ (s & p) + (s >> 61)`.

use crate::error::{Error, Result};
use crate::hash::{HashFamily, HashKind};
use crate::random::RandomSource;

/// The Mersenne prime `2^61 - 1`.
pub const MERSENNE_61: u64 = (1 << 61) - 1;

const P: u128 = MERSENNE_61 as u128;

/// One Mersenne fold. Congruent to `s` mod p but not necessarily below p.
#[inline(always)]
fn fold(s: u128) -> u128 {
    (s & P) + (s >> 61)
}

/// Reduce any `s` to its canonical residue in `[0, 2^61 - 1)`.
///
/// Two folds bring any `u128` below `2p`; a single conditional subtraction
/// finishes the job (a value equal to `p` would otherwise survive the folds).
#[inline]
pub fn reduce(s: u128) -> u64 {
    let mut r = fold(fold(s));
    if r >= P {
        r -= P;
    }
    r as u64
}

/// Draw a coefficient uniformly from `[0, p)` by rejection.
fn draw_coefficient<R: RandomSource + ?Sized>(rng: &mut R) -> Result<u64> {
    loop {
        let c = rng.next_u64()? >> 3;
        if c < MERSENNE_61 {
            return Ok(c);
        }
    }
}

/// Degree-1 polynomial `a*x + b`, 2-independent.
#[derive(Debug, Clone)]
pub struct Poly2 {
    a: u64,
    b: u64,
}

impl Poly2 {
    /// Draw both coefficients from `rng`.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            a: draw_coefficient(rng)?,
            b: draw_coefficient(rng)?,
        })
    }
}

impl HashFamily for Poly2 {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        let h = u128::from(self.a) * u128::from(x) + u128::from(self.b);
        reduce(h) as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::Poly2)
    }
}

/// Degree-2 polynomial `(a*x + b)*x + c`, 3-independent.
#[derive(Debug, Clone)]
pub struct Poly3 {
    a: u64,
    b: u64,
    c: u64,
}

impl Poly3 {
    /// Draw all three coefficients from `rng`.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            a: draw_coefficient(rng)?,
            b: draw_coefficient(rng)?,
            c: draw_coefficient(rng)?,
        })
    }
}

impl HashFamily for Poly3 {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        let x = u128::from(x);
        let h = fold(u128::from(self.a) * x + u128::from(self.b));
        reduce(h * x + u128::from(self.c)) as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::Poly3)
    }
}

/// Polynomial with a runtime number of coefficients.
///
/// With `degree` coefficients the family is `degree`-independent. Evaluation
/// uses Horner's rule with a fold after every step, which keeps the running
/// value below `2^62` so `h * x + c` always fits in 128 bits.
#[derive(Debug, Clone)]
pub struct Polynomial {
    coefficients: Vec<u64>,
}

impl Polynomial {
    /// 2-independent polynomial (two coefficients).
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::init_with_degree(2, rng)
    }

    /// `degree`-independent polynomial. `degree` must be at least 1.
    pub fn init_with_degree<R: RandomSource + ?Sized>(degree: u32, rng: &mut R) -> Result<Self> {
        if degree == 0 {
            return Err(Error::InvalidParam("polynomial degree must be >= 1"));
        }
        let coefficients = (0..degree)
            .map(|_| draw_coefficient(rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { coefficients })
    }

    /// Number of coefficients, i.e. the independence order.
    pub fn degree(&self) -> u32 {
        self.coefficients.len() as u32
    }

    /// Evaluate to the full canonical field element (61 bits).
    #[inline]
    pub fn evaluate_field(&self, x: u32) -> u64 {
        let x = u128::from(x);
        let mut h = 0u128;
        for &c in self.coefficients.iter().rev() {
            h = fold(h * x + u128::from(c));
        }
        reduce(h)
    }
}

impl HashFamily for Polynomial {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        self.evaluate_field(x) as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::Polynomial {
            degree: self.degree(),
        })
    }
}
