//! Sieve of Eratosthenes over `2..=n`
//!
//! Candidates run up to `floor(sqrt(n))`. Every candidate produces one
//! `checking` step; every prime candidate then produces one `marking` step per
//! multiple from `i * i` through `n`. Multiples that a smaller prime already
//! crossed out are still visited and flagged as such.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{SieveSnapshot, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

/// Count Primes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeSieve {
    pub n: i64,
}

/// Largest `r` with `r * r <= n`
pub(crate) fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while u128::from(r) * u128::from(r) > u128::from(n) {
        r -= 1;
    }
    while u128::from(r + 1) * u128::from(r + 1) <= u128::from(n) {
        r += 1;
    }
    r
}

/// Steps any sieve over `n` needs at minimum: every candidate check, the
/// multiples of 2, and the summary
fn minimum_steps(n: u64) -> u64 {
    let checks = isqrt(n).saturating_sub(1);
    let evens = if n >= 4 { n / 2 - 1 } else { 0 };
    checks.saturating_add(evens).saturating_add(1)
}

impl StepGenerator for PrimeSieve {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::PrimeSieve
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let n = u64::try_from(self.n)
            .map_err(|_| GeneratorError::invalid(format!("n must be non-negative, got {}", self.n)))?;

        let minimum = minimum_steps(n);
        recorder.ensure_budget(usize::try_from(minimum).unwrap_or(usize::MAX))?;
        // The budget check bounds n to roughly twice the step limit.
        let n = n as usize;

        let mut composite = vec![false; n + 1];
        let snapshot = |composite: &[bool], candidate, marking, newly_marked, primes: Vec<usize>| {
            Snapshot::Sieve(SieveSnapshot {
                n,
                candidate,
                marking,
                newly_marked,
                composite: composite.to_vec(),
                primes,
            })
        };

        for i in 2..=isqrt(n as u64) as usize {
            let prime = !composite[i];
            recorder.record(
                StepKind::Checking,
                snapshot(&composite, Some(i), None, false, Vec::new()),
                if prime {
                    format!("{i} is not crossed out, so it is prime. Cross out its multiples from {}.", i * i)
                } else {
                    format!("{i} is already crossed out; skip it.")
                },
            )?;
            if !prime {
                continue;
            }

            for j in (i * i..=n).step_by(i) {
                let newly_marked = !composite[j];
                composite[j] = true;
                recorder.record(
                    StepKind::Marking,
                    snapshot(&composite, Some(i), Some(j), newly_marked, Vec::new()),
                    if newly_marked {
                        format!("Cross out {j} = {i} x {}.", j / i)
                    } else {
                        format!("{j} = {i} x {} was already crossed out.", j / i)
                    },
                )?;
            }
        }

        let primes: Vec<usize> = (2..=n).filter(|k| !composite[*k]).collect();
        let narration = if primes.is_empty() {
            format!("There are no primes up to {n}.")
        } else {
            format!("{} primes up to {n}: {:?}.", primes.len(), primes)
        };
        recorder.record(StepKind::Done, snapshot(&composite, None, None, false, primes), narration)?;
        Ok(())
    }
}
