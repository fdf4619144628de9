//! Random search under constraints.
//!
//! Each guess is a random code consistent with every answer so far. Sampling
//! is bounded; when it runs dry the full space is filtered instead.

use rand::{Rng, RngCore};

use mastermind_kernel::code::{all_codes, is_consistent};
use mastermind_kernel::{Code, Oracle, Strategy, StrategyError};

use super::DEFAULT_SPACE_LIMIT;

#[derive(Debug, Clone)]
pub struct RandomSearch {
    /// Random draws tried before falling back to enumeration
    max_samples: usize,
    space_limit: u128,
}

impl RandomSearch {
    pub fn new(max_samples: usize, space_limit: u128) -> Self {
        Self {
            max_samples,
            space_limit,
        }
    }

    fn next_guess(&self, oracle: &Oracle<'_>, rng: &mut dyn RngCore) -> Result<Code, StrategyError> {
        let config = oracle.configuration();
        let history = oracle.history();

        for _ in 0..self.max_samples {
            let candidate = Code::random(config, rng);
            if is_consistent(&candidate, history) {
                return Ok(candidate);
            }
        }

        let consistent: Vec<Code> = all_codes(config, self.space_limit)?
            .into_iter()
            .filter(|c| is_consistent(c, history))
            .collect();
        if consistent.is_empty() {
            return Err(StrategyError::Internal(
                "no consistent code left to sample".to_string(),
            ));
        }
        let pick = rng.random_range(0..consistent.len());
        Ok(consistent[pick].clone())
    }
}

impl Default for RandomSearch {
    fn default() -> Self {
        Self::new(10_000, DEFAULT_SPACE_LIMIT)
    }
}

impl Strategy for RandomSearch {
    fn name(&self) -> &str {
        "random_search"
    }

    fn solve(&self, oracle: &mut Oracle<'_>, rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        loop {
            let guess = self.next_guess(oracle, rng)?;
            if oracle.guess(&guess)?.is_win(oracle.code_length()) {
                return Ok(oracle.guesses());
            }
        }
    }
}
