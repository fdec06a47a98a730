//! Prime Generation
//!
//! Sieve of Eratosthenes behind a `first_primes(n)` front door, with a
//! heuristically sized bound and a pre-computed cache for the small
//! requests that dominate tests and demos.
//!
//! The bound heuristic max(15000, 20n) virtually guarantees at least n
//! primes below it; if it ever does not, the contract violation is
//! reported as `InsufficientPrimes` rather than silently returning a
//! short list.

use crate::constants::{SIEVE_MIN_BOUND, SIEVE_PRIME_FACTOR, SMALL_PRIMES};
use crate::errors::{CoreError, CoreResult};
use tracing::debug;

/// Sieve bound for a request of n primes: max(15000, 20n).
pub fn sieve_bound(n: usize) -> u64 {
    SIEVE_MIN_BOUND.max(SIEVE_PRIME_FACTOR.saturating_mul(n as u64))
}

/// All primes up to and including `bound`, strictly ascending.
pub fn sieve_upto(bound: u64) -> Vec<u64> {
    if bound < 2 {
        return Vec::new();
    }
    let limit = bound as usize;
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2usize;
    while i * i <= limit {
        if is_prime[i] {
            let mut j = i * i;
            while j <= limit {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i as u64)
        .collect()
}

/// The first `n` primes, strictly ascending with no duplicates.
///
/// Small requests are served from `SMALL_PRIMES` without sieving.
///
/// # Errors
/// `InsufficientPrimes` if the heuristic bound holds fewer than `n`
/// primes. With the default heuristic this does not trigger for any
/// realistic n; the error exists so the contract violation is loud if
/// the heuristic is ever tightened.
pub fn first_primes(n: usize) -> CoreResult<Vec<u64>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if n <= SMALL_PRIMES.len() {
        return Ok(SMALL_PRIMES[..n].to_vec());
    }
    first_primes_with_bound(n, sieve_bound(n))
}

/// The first `n` primes found by sieving up to an explicit `bound`.
///
/// # Errors
/// `InsufficientPrimes` if the sieve up to `bound` holds fewer than
/// `n` primes.
pub fn first_primes_with_bound(n: usize, bound: u64) -> CoreResult<Vec<u64>> {
    let primes = sieve_upto(bound);
    debug!(requested = n, bound, found = primes.len(), "sieved primes");

    if primes.len() < n {
        return Err(CoreError::InsufficientPrimes {
            requested: n,
            found: primes.len(),
            bound,
        });
    }
    let mut primes = primes;
    primes.truncate(n);
    Ok(primes)
}
