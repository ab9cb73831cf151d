//! Sift benchmark harness.
//!
//! Times `sift_0`, `sift_1` and `sift_2` sifting a preallocated flag buffer
//! in place, next to the `primes` and `primal` crates, and checks that
//! everything agrees before reporting.
//!
//! Usage: cargo run --release -- [--limit N]... [--iterations COUNT]

use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{bail, ensure, Result};
use clap::Parser;
use sift::{primes_up_to_with, sieve_len, Sift, VARIANTS};

#[derive(Parser)]
#[command(about = "Benchmark the three sift variants against primes and primal")]
struct Config {
    /// Upper bound to sieve up to (repeatable)
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "N",
        default_values_t = [10_000u64, 100_000, 1_000_000]
    )]
    limits: Vec<u64>,
    /// Timed runs per implementation
    #[arg(short = 'n', long, value_name = "COUNT", default_value = "25")]
    iterations: usize,
    /// Skip the `primes` crate iterator above this limit (it is slow)
    #[arg(long, value_name = "N", default_value = "1000000")]
    skip_primes_crate_above: u64,
}

impl Config {
    fn runs_primes_crate(&self, limit: u64) -> bool {
        limit <= self.skip_primes_crate_above
    }
}

/// Wall-clock samples for one implementation at one limit.
struct Timing {
    name: &'static str,
    samples: Vec<Duration>,
}

impl Timing {
    /// Run `f` once untimed, then `iterations` timed times.
    fn measure(name: &'static str, iterations: usize, mut f: impl FnMut()) -> Self {
        f();
        let samples = (0..iterations)
            .map(|_| {
                let start = Instant::now();
                f();
                start.elapsed()
            })
            .collect();
        Self { name, samples }
    }

    fn best(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or_default()
    }

    fn median(&self) -> Duration {
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();
        sorted.get(sorted.len() / 2).copied().unwrap_or_default()
    }
}

/// Time `variant` rewriting the same buffer over and over.
fn time_sift(name: &'static str, variant: Sift, sieve: &mut [u32], iterations: usize) -> Timing {
    Timing::measure(name, iterations, || {
        variant(sieve);
        black_box(&*sieve);
    })
}

fn primes_crate_count(limit: u64) -> usize {
    use primes::{PrimeSet, Sieve};
    Sieve::new().iter().take_while(|&p| p <= limit).count()
}

fn primal_count(limit: u64) -> usize {
    if limit < 2 {
        return 0;
    }
    let limit = limit as usize;
    primal::Sieve::new(limit).prime_pi(limit)
}

/// Every variant must leave a bit-identical buffer, not just the same count.
fn check_buffers_agree(limit: u64) -> Result<()> {
    let len = sieve_len(limit);
    let (ref_name, ref_variant) = VARIANTS[0];
    let mut reference = vec![0u32; len];
    ref_variant(&mut reference);

    let mut sieve = vec![0u32; len];
    for (name, variant) in &VARIANTS[1..] {
        variant(&mut sieve);
        if let Some(i) = sieve.iter().zip(&reference).position(|(a, b)| a != b) {
            bail!("n={}: {} and {} differ at index {}", limit, ref_name, name, i);
        }
    }
    Ok(())
}

/// Prime counts from each variant and competitor; all must match.
fn check_counts_agree(config: &Config, limit: u64) -> Result<usize> {
    let expected = primal_count(limit);
    for (name, variant) in VARIANTS {
        let got = primes_up_to_with(limit, variant).len();
        ensure!(got == expected, "n={}: {} counts {} primes, primal counts {}", limit, name, got, expected);
    }
    if config.runs_primes_crate(limit) {
        let got = primes_crate_count(limit);
        ensure!(got == expected, "n={}: primes crate counts {}, primal counts {}", limit, got, expected);
    }
    Ok(expected)
}

fn run_limit(config: &Config, limit: u64) -> Result<()> {
    let iterations = config.iterations;
    check_buffers_agree(limit)?;
    let count = check_counts_agree(config, limit)?;

    let mut sieve = vec![0u32; sieve_len(limit)];
    println!("n = {}: π(n) = {}, {} flags, {} bytes of sieve",
        limit, count, sieve.len(), std::mem::size_of_val(sieve.as_slice()));

    let mut timings: Vec<Timing> = VARIANTS
        .into_iter()
        .map(|(name, variant)| time_sift(name, variant, &mut sieve, iterations))
        .collect();

    if config.runs_primes_crate(limit) {
        timings.push(Timing::measure("primes crate", iterations, || {
            black_box(primes_crate_count(black_box(limit)));
        }));
    } else {
        println!("  primes crate skipped above {}", config.skip_primes_crate_above);
    }
    timings.push(Timing::measure("primal", iterations, || {
        black_box(primal::Sieve::new(black_box(limit as usize)));
    }));

    let baseline = timings[0].median().as_nanos().max(1) as f64;
    for t in &timings {
        let speedup = baseline / t.median().as_nanos().max(1) as f64;
        println!("  {:<14} best {:>12}  median {:>12}  {:>6.2}x vs sift_0",
            t.name, format!("{:?}", t.best()), format!("{:?}", t.median()), speedup);
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    ensure!(config.iterations > 0, "--iterations must be at least 1");

    println!("Sift benchmark, {} runs per implementation\n", config.iterations);
    for &limit in &config.limits {
        run_limit(&config, limit)?;
    }
    println!("✓ all implementations agree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::parse_from(["sift-bench"]);
        assert_eq!(config.limits, vec![10_000, 100_000, 1_000_000]);
        assert_eq!(config.iterations, 25);
        assert_eq!(config.skip_primes_crate_above, 1_000_000);

        let config = Config::parse_from(["sift-bench", "-l", "500", "-l", "900", "-n", "3"]);
        assert_eq!(config.limits, vec![500, 900]);
        assert_eq!(config.iterations, 3);
    }

    #[test]
    fn test_primes_crate_threshold() {
        let config = Config::parse_from(["sift-bench"]);
        assert!(config.runs_primes_crate(1_000_000));
        assert!(!config.runs_primes_crate(1_000_001));

        let config = Config::parse_from(["sift-bench", "--skip-primes-crate-above", "500"]);
        assert_eq!(config.skip_primes_crate_above, 500);
        assert!(config.runs_primes_crate(500));
        assert!(!config.runs_primes_crate(501));
    }

    #[test]
    fn test_competitor_counts() {
        for n in [0u64, 1, 2, 3, 10, 1_000, 50_000] {
            let expected = primes_up_to_with(n, sift::sift_2).len();
            assert_eq!(primal_count(n), expected, "n={}", n);
            assert_eq!(primes_crate_count(n), expected, "n={}", n);
        }
    }

    #[test]
    fn test_counts_agree_with_skip() {
        // Above the threshold only primal and the variants are compared.
        let config = Config::parse_from(["sift-bench", "--skip-primes-crate-above", "100"]);
        assert_eq!(check_counts_agree(&config, 1_000).unwrap(), 168);
        assert_eq!(check_counts_agree(&config, 100).unwrap(), 25);
    }

    #[test]
    fn test_buffers_agree() {
        for n in [0u64, 2, 3, 331, 100_000] {
            assert!(check_buffers_agree(n).is_ok(), "n={}", n);
        }
    }

    #[test]
    fn test_time_sift() {
        let mut sieve = vec![0u32; sieve_len(331)];
        let t = time_sift("sift_1", sift::sift_1, &mut sieve, 5);
        assert_eq!(t.samples.len(), 5);
        assert!(t.best() <= t.median());
        assert_ne!(sieve[0], 0);
        assert_eq!(sieve[3], 0);
    }
}
