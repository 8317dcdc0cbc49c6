//! `simsketch`: universal hash families and similarity sketches.
//!
//! This crate is for **measuring how hash-function choice affects similarity
//! estimation**. It provides:
//! - hash families with known independence guarantees (multiply-shift,
//!   Mersenne-prime polynomials, simple/twisted/mixed tabulation)
//! - one-permutation MinHash with densification (Jaccard)
//! - bottom-k MinHash (Jaccard)
//! - feature hashing (inner products)
//!
//! Scope here is *primitives*: draw a hash, sketch a set or sparse vector,
//! compare two sketches. Dataset generation, trial loops and result storage
//! belong in the calling crate.
//!
//! # Example
//!
//! ```rust
//! use simsketch::{OnePermutationConfig, OnePermutationSketch, SystemRandom};
//!
//! let mut rng = SystemRandom::seeded(7);
//! let sketcher = OnePermutationSketch::new(&OnePermutationConfig::default(), &mut rng).unwrap();
//!
//! let a: Vec<u32> = (0..1000).collect();
//! let b: Vec<u32> = (500..1500).collect();
//! let j = sketcher
//!     .estimate(&sketcher.sketch(&a), &sketcher.sketch(&b))
//!     .unwrap();
//! assert!(j > 0.2 && j < 0.5); // true Jaccard is 1/3
//! ```
//!
//! # Input contract
//!
//! Sets are slices of distinct `u32` ids in ascending order; weighted vectors
//! are `(id, value)` slices with distinct ascending ids. The sketches do not
//! sort or deduplicate.
//!
//! # Concurrency
//!
//! Everything is synchronous. Hash functions and sketchers are immutable after
//! construction and `Send + Sync`, so independent trials can run on separate
//! threads, each drawing its own parameters from its own [`RandomSource`].

#![warn(missing_docs)]

pub mod bottom_k;
pub mod error;
pub mod exact;
pub mod feature_hashing;
pub mod hash;
pub mod one_permutation;
pub mod random;

pub use bottom_k::{BottomKConfig, BottomKSketch};
pub use error::{Error, Result};
pub use feature_hashing::{FeatureHashing, FeatureHashingConfig};
pub use hash::{HashFamily, HashKind};
pub use one_permutation::{OnePermutationConfig, OnePermutationSketch, EMPTY_BIN};
pub use random::{ByteStream, RandomSource, SystemRandom};
