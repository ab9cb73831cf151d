//! Prime listing on top of the sift buffer.
//!
//! A sift only knows about odd candidates starting at 3; this module maps
//! limits to buffer lengths and collects surviving indices back into
//! prime values (with 2 hardcoded).

use crate::sift::{sift, Sift};

/// Value represented by sieve index `index`.
#[inline]
pub fn candidate(index: usize) -> u64 {
    2 * index as u64 + 3
}

/// Buffer length covering every odd candidate in `3..=limit`.
#[inline]
pub fn sieve_len(limit: u64) -> usize {
    if limit < 3 { return 0; }
    ((limit - 1) / 2) as usize
}

/// Prime-counting upper bound for pre-allocation.
/// Overestimates π(n) by ~15%, so the result vector never reallocates.
#[inline]
pub fn prime_count_upper(limit: u64) -> usize {
    if limit < 10 { return 4; }
    let nf = limit as f64;
    (nf / nf.ln() * 1.15) as usize + 1
}

/// All primes up to and including `limit`, using the fastest variant.
pub fn primes_up_to(limit: u64) -> Vec<u64> {
    primes_up_to_with(limit, sift)
}

/// All primes up to and including `limit`, sifted by `variant`.
pub fn primes_up_to_with(limit: u64, variant: Sift) -> Vec<u64> {
    if limit < 2 { return vec![]; }

    let mut sieve = vec![0u32; sieve_len(limit)];
    variant(&mut sieve);

    let mut r = Vec::with_capacity(prime_count_upper(limit));
    r.push(2);
    r.extend(
        sieve.iter()
            .enumerate()
            .filter(|&(_, &flag)| flag != 0)
            .map(|(i, _)| candidate(i)),
    );
    r
}
