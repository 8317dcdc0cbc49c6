//! Tabulation hashing: byte-indexed random tables combined with XOR.
//!
//! A 32-bit key is split into four bytes, least-significant first; byte `i`
//! indexes table `i`. The tables are filled by a degree-20 polynomial
//! evaluated on consecutive integers `0, 1, 2, ...`, which is 20-independent
//! and therefore indistinguishable from truly random entries for these sizes.
//!
//! - [`SimpleTab`]: XOR of four lookups (Zobrist / Pătraşcu-Thorup).
//! - [`TwistedTab`]: the last byte is "twisted" by the running hash before it
//!   is looked up.
//! - [`MixedTab`]: simple tabulation over 64-bit entries, then the upper 32
//!   bits are used as four derived characters for a second round of lookups.

use crate::error::Result;
use crate::hash::{HashFamily, HashKind, Polynomial};
use crate::random::RandomSource;

const CHARS: usize = 4;
const TABLE: usize = 256;
const BOOTSTRAP_DEGREE: u32 = 20;

/// Consecutive-integer generator over a degree-20 polynomial.
struct TableFiller {
    h: Polynomial,
    x: u32,
}

impl TableFiller {
    fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            h: Polynomial::init_with_degree(BOOTSTRAP_DEGREE, rng)?,
            x: 0,
        })
    }

    fn next_u32(&mut self) -> u32 {
        let v = self.h.evaluate(self.x);
        self.x += 1;
        v
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        (hi << 32) | u64::from(self.next_u32())
    }
}

#[inline(always)]
fn byte(x: u32, i: usize) -> usize {
    ((x >> (8 * i)) & 0xFF) as usize
}

/// Simple tabulation with 32-bit entries.
#[derive(Clone)]
pub struct SimpleTab {
    tables: Box<[[u32; TABLE]; CHARS]>,
}

impl SimpleTab {
    /// Fill the four tables.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut filler = TableFiller::new(rng)?;
        let mut tables = Box::new([[0u32; TABLE]; CHARS]);
        for table in tables.iter_mut() {
            for entry in table.iter_mut() {
                *entry = filler.next_u32();
            }
        }
        Ok(Self { tables })
    }
}

impl HashFamily for SimpleTab {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        let mut h = 0u32;
        for (i, table) in self.tables.iter().enumerate() {
            h ^= table[byte(x, i)];
        }
        h
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::SimpleTab)
    }
}

impl std::fmt::Debug for SimpleTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleTab").finish_non_exhaustive()
    }
}

/// Twisted tabulation with 64-bit entries.
#[derive(Clone)]
pub struct TwistedTab {
    tables: Box<[[u64; TABLE]; CHARS]>,
}

impl TwistedTab {
    /// Fill the four tables.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut filler = TableFiller::new(rng)?;
        let mut tables = Box::new([[0u64; TABLE]; CHARS]);
        for table in tables.iter_mut() {
            for entry in table.iter_mut() {
                *entry = filler.next_u64();
            }
        }
        Ok(Self { tables })
    }
}

impl HashFamily for TwistedTab {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        let mut h = 0u64;
        for i in 0..CHARS - 1 {
            h ^= self.tables[i][byte(x, i)];
        }
        let twist = (h >> 32) as u32;
        h ^= self.tables[CHARS - 1][byte(x ^ (twist << 24), CHARS - 1)];
        h as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::TwistedTab)
    }
}

impl std::fmt::Debug for TwistedTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwistedTab").finish_non_exhaustive()
    }
}

/// Mixed tabulation: four input characters plus four derived characters.
#[derive(Clone)]
pub struct MixedTab {
    base: Box<[[u64; TABLE]; CHARS]>,
    derived: Box<[[u32; TABLE]; CHARS]>,
}

impl MixedTab {
    /// Fill the base and derived tables.
    ///
    /// Entries are drawn interleaved per (table, byte): two words for the
    /// base entry, then one for the derived entry.
    pub fn init<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut filler = TableFiller::new(rng)?;
        let mut base = Box::new([[0u64; TABLE]; CHARS]);
        let mut derived = Box::new([[0u32; TABLE]; CHARS]);
        for i in 0..CHARS {
            for j in 0..TABLE {
                base[i][j] = filler.next_u64();
                derived[i][j] = filler.next_u32();
            }
        }
        Ok(Self { base, derived })
    }
}

impl HashFamily for MixedTab {
    #[inline]
    fn evaluate(&self, x: u32) -> u32 {
        let mut h = 0u64;
        for (i, table) in self.base.iter().enumerate() {
            h ^= table[byte(x, i)];
        }
        let drv = (h >> 32) as u32;
        for (i, table) in self.derived.iter().enumerate() {
            h ^= u64::from(table[byte(drv, i)]);
        }
        h as u32
    }

    fn kind(&self) -> Option<HashKind> {
        Some(HashKind::MixedTab)
    }
}

impl std::fmt::Debug for MixedTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixedTab").finish_non_exhaustive()
    }
}
