//! Odd-only Sieve of Eratosthenes, written three ways.
//!
//! `sift_0`, `sift_1` and `sift_2` fill the same flag buffer with the same
//! pattern; each one does less arithmetic per outer step than the last.
//!
//! ```rust
//! let mut sieve = [0u32; 165];
//! sift::sift_0(&mut sieve);
//! assert_ne!(sieve[0], 0); // 3 is prime
//! assert_eq!(sieve[3], 0); // 9 is not
//!
//! assert_eq!(sift::primes_up_to(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
//! ```

pub mod primes;
pub mod sift;

pub use primes::{candidate, prime_count_upper, primes_up_to, primes_up_to_with, sieve_len};
pub use sift::{mark_sieve, sift, sift_0, sift_1, sift_2, Sift, VARIANTS};
