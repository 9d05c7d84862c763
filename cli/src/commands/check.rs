use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, error, info};
use ui512::{Backend, Engine, U512, BITS, WORDS};

use crate::logging::init_tracing;

/// Maximum number of failures printed before giving up on the listing
const MAX_REPORTED_FAILURES: usize = 20;

/// Runs the engine's division and bitwise properties over random inputs
#[derive(Parser)]
#[command(author, about, long_about = None, version)]
pub struct Ui512Check {
    /// Number of random cases
    #[clap(short = 'n', long, default_value_t = 10_000)]
    pub iterations: usize,

    /// Base seed; case `i` uses `seed + i`
    #[clap(short = 's', long, default_value_t = 0)]
    pub seed: u64,

    /// Backends to check (comma separated); all of them by default
    #[clap(short = 'b', long, env = "UI512_BACKEND", value_delimiter = ',')]
    pub backend: Vec<Backend>,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level")]
    pub verbose: u8,
}

impl Ui512Check {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);

        let backends = if self.backend.is_empty() { Backend::ALL.to_vec() } else { self.backend.clone() };
        let names: Vec<&str> = backends.iter().map(|b| b.name()).collect();
        info!("Checking {} cases on {}", self.iterations, names.join(", "));

        let start = Instant::now();
        let failures: Vec<String> = (0..self.iterations)
            .into_par_iter()
            .flat_map_iter(|i| check_case(self.seed.wrapping_add(i as u64), &backends))
            .collect();

        info!("Checked {} cases in {:.2?}", self.iterations, start.elapsed());

        if !failures.is_empty() {
            for failure in failures.iter().take(MAX_REPORTED_FAILURES) {
                error!("{failure}");
            }
            bail!("{} check(s) failed", failures.len());
        }

        println!("{}", "All checks passed".green().bold());
        Ok(())
    }
}

/// Random value whose significant width is itself random
fn random_u512(rng: &mut StdRng) -> U512 {
    let mut words: [u64; WORDS] = rng.gen();
    let len = rng.gen_range(0..=WORDS);
    words[len..].iter_mut().for_each(|w| *w = 0);
    U512::from_words(words)
}

/// Runs every property for one seeded case on every backend, returning the failures
fn check_case(seed: u64, backends: &[Backend]) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = random_u512(&mut rng);
    let b = random_u512(&mut rng);
    let word = rng.gen::<u64>() >> rng.gen_range(0..64);
    let k = rng.gen_range(0..BITS);

    let mut failures = Vec::new();
    let mut fail = |backend: Backend, what: &str| {
        failures.push(format!("seed {seed} on {backend}: {what} (a = {a:#x}, b = {b:#x})"));
    };

    let mut reference = None;
    for &backend in backends {
        let engine = Engine::new(backend);

        // Division identity, or DivideByZero for a zero divisor
        let result = engine.div_rem(&a, &b);
        match &result {
            Ok((q, r)) => {
                let (lo, hi) = q.widening_mul(&b);
                let (sum, carry) = lo.overflowing_add(r);
                if !hi.is_zero() || carry || sum != a {
                    fail(backend, "a != q·b + r");
                }
                if r >= &b {
                    fail(backend, "remainder is not below the divisor");
                }
            }
            Err(_) if b.is_zero() => {}
            Err(err) => fail(backend, &format!("unexpected error {err}")),
        }

        // Backends must agree bit for bit
        let expected = reference.get_or_insert_with(|| result.clone());
        if *expected != result {
            fail(backend, "result differs from the first backend");
        }

        // Single-word divisors give the same answer on both paths
        match (engine.div_rem(&a, &U512::from_u64(word)), engine.div_rem_u64(&a, word)) {
            (Ok((q, r)), Ok((short_q, short_r))) => {
                if q != short_q || r != U512::from_u64(short_r) {
                    fail(backend, "single-word division paths disagree");
                }
            }
            (Err(_), Err(_)) if word == 0 => {}
            _ => fail(backend, "single-word division paths disagree on errors"),
        }

        // Division by 2^k is a right shift, the remainder the low k bits
        let expected = (engine.shr(&a, k), engine.shr(&engine.shl(&a, BITS - k), BITS - k));
        if engine.div_rem(&a, &engine.shl(&U512::ONE, k)).ok() != Some(expected) {
            fail(backend, &format!("division by 2^{k} is not a shift"));
        }

        if !engine.xor(&a, &a).is_zero()
            || !engine.and(&a, &engine.not(&a)).is_zero()
            || engine.or(&a, &engine.not(&a)) != U512::MAX
        {
            fail(backend, "bitwise involutions");
        }
    }

    debug!(seed, failures = failures.len(), "Case checked");
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_pass_on_all_backends() {
        for seed in 0..200 {
            assert_eq!(check_case(seed, &Backend::ALL), Vec::<String>::new());
        }
    }

    #[test]
    fn test_case_generation_is_reproducible() {
        let mut first = StdRng::seed_from_u64(9);
        let mut second = StdRng::seed_from_u64(9);
        assert_eq!(random_u512(&mut first), random_u512(&mut second));
    }
}
