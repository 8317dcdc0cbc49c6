//! Error types for simsketch.

/// Errors raised by hash-family construction and sketch estimation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter is out of range or inconsistent.
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),
    /// A signature or vector does not have the length the sketch produces.
    #[error("length mismatch (expected {expected}, got {got})")]
    LengthMismatch {
        /// Length the sketch was configured for.
        expected: usize,
        /// Length actually provided.
        got: usize,
    },
    /// A replayed byte stream ran out while drawing random parameters.
    #[error("randomness exhausted (needed {needed} bytes, {remaining} remaining)")]
    RandomnessExhausted {
        /// Bytes requested by the draw.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },
    /// Reading a random byte file failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// A hash family name could not be parsed.
    #[error("unknown hash kind: {0:?}")]
    UnknownHashKind(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
