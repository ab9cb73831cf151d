//! Odd-only Sieve of Eratosthenes over a caller-owned flag buffer.
//!
//! Index `i` stands for the odd candidate `2i + 3`. After a sift every
//! prime candidate holds `1` and every composite holds `0`. The buffer is
//! fully rewritten, so its previous contents never leak into the result.
//!
//! The three variants walk the same candidates and strike the same
//! multiples; they only differ in how much arithmetic the outer loop does
//! to find the next factor and the index of its square:
//!
//! - `sift_0`: both recomputed from `i` every step
//! - `sift_1`: square index reuses the fresh factor, one multiplication
//! - `sift_2`: both carried, strength-reduced to additions

/// A sift variant, as stored in [`VARIANTS`].
pub type Sift = fn(&mut [u32]);

/// Every variant, slowest first.
pub const VARIANTS: [(&str, Sift); 3] = [
    ("sift_0", sift_0),
    ("sift_1", sift_1),
    ("sift_2", sift_2),
];

const PRIME: u32 = 1;
const COMPOSITE: u32 = 0;

/// Clear `sieve[0]` and every `factor`-th flag after it.
///
/// Empty slices are left alone.
///
/// # Panics
///
/// Panics if `factor` is zero.
#[inline]
pub fn mark_sieve(sieve: &mut [u32], factor: usize) {
    assert!(factor != 0, "mark_sieve: factor must be nonzero");
    for flag in sieve.iter_mut().step_by(factor) {
        *flag = COMPOSITE;
    }
}

/// Naive variant: factor and square index derived from `i` each pass.
pub fn sift_0(sieve: &mut [u32]) {
    let n = sieve.len();
    sieve.fill(PRIME);

    let mut i = 0;
    let mut index_square = 3;
    // index_square == 2i² + 6i + 3, the index of (2i + 3)²
    while index_square < n {
        if sieve[i] != COMPOSITE {
            mark_sieve(&mut sieve[index_square..], i + i + 3);
        }
        i += 1;
        index_square = 2 * i * (i + 3) + 3;
    }
}

/// Square index computed from the fresh factor: `3 + i * (factor + 3)`
/// needs one multiplication instead of two.
pub fn sift_1(sieve: &mut [u32]) {
    let n = sieve.len();
    sieve.fill(PRIME);

    let mut i = 0;
    let mut index_square = 3;
    let mut factor = 3;
    while index_square < n {
        if sieve[i] != COMPOSITE {
            mark_sieve(&mut sieve[index_square..], factor);
        }
        i += 1;
        factor = i + i + 3;
        index_square = 3 + i * (factor + 3);
    }
}

/// Strength-reduced variant: no multiplication in the outer loop.
pub fn sift_2(sieve: &mut [u32]) {
    let n = sieve.len();
    sieve.fill(PRIME);

    let mut i = 0;
    let mut index_square = 3;
    let mut factor = 3;
    while index_square < n {
        if sieve[i] != COMPOSITE {
            mark_sieve(&mut sieve[index_square..], factor);
        }
        i += 1;
        // (2i+5)² index minus (2i+3)² index == (2i+3) + (2i+5)
        index_square += factor;
        factor += 2;
        index_square += factor;
    }
}

/// The fastest variant.
#[inline]
pub fn sift(sieve: &mut [u32]) {
    sift_2(sieve)
}
