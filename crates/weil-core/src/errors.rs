//! Core Error Types

use thiserror::Error;

/// Errors from the precision and prime-generation foundation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Working precision outside the accepted range
    #[error("Invalid precision: {digits} digits (must be 1..=10000)")]
    InvalidPrecision { digits: u32 },

    /// The heuristic sieve bound held fewer primes than requested
    #[error("Insufficient primes: requested {requested}, sieve up to {bound} found only {found}")]
    InsufficientPrimes {
        requested: usize,
        found: usize,
        bound: u64,
    },

    /// A decimal string failed to parse as an arbitrary-precision float
    #[error("Invalid number: {text:?}")]
    InvalidNumber { text: String },
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
