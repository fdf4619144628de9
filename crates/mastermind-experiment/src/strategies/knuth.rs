//! Knuth's minimax strategy.
//!
//! Keeps the set of codes still consistent with every answer and, at each
//! step, plays the code (from the whole space) whose worst-case answer leaves
//! the fewest candidates. Ties prefer codes that could still win, then the
//! lexicographically smallest.

use rand::RngCore;

use mastermind_kernel::code::{all_codes, worst_case_partition};
use mastermind_kernel::{Code, Oracle, Strategy, StrategyError};

use super::DEFAULT_SPACE_LIMIT;

/// Worst-case minimax solver. Deterministic: `rng` is not used.
#[derive(Debug, Clone)]
pub struct Knuth {
    space_limit: u128,
}

impl Knuth {
    pub fn new(space_limit: u128) -> Self {
        Self { space_limit }
    }
}

impl Default for Knuth {
    fn default() -> Self {
        Self::new(DEFAULT_SPACE_LIMIT)
    }
}

impl Strategy for Knuth {
    fn name(&self) -> &str {
        "knuth"
    }

    fn solve(&self, oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        let all = all_codes(oracle.configuration(), self.space_limit)?;
        let mut candidates = all.clone();
        let mut guess = Code::opening(oracle.configuration());

        loop {
            let feedback = oracle.guess(&guess)?;
            if feedback.is_win(oracle.code_length()) {
                return Ok(oracle.guesses());
            }

            candidates.retain(|c| guess.score(c) == feedback);
            guess = match candidates.as_slice() {
                [] => {
                    return Err(StrategyError::Internal(
                        "no candidate codes remain consistent".to_string(),
                    ));
                }
                [only] => only.clone(),
                _ => minimax_guess(&all, &candidates),
            };
        }
    }
}

/// The code minimising the largest feedback class over `candidates`.
///
/// `candidates` must be sorted (it is a filtered copy of the ordered space).
fn minimax_guess(all: &[Code], candidates: &[Code]) -> Code {
    let mut best: Option<(usize, bool, &Code)> = None;
    for code in all {
        let worst = worst_case_partition(code, candidates);
        let outsider = candidates.binary_search(code).is_err();
        let better = match best {
            None => true,
            Some((best_worst, best_outsider, _)) => (worst, outsider) < (best_worst, best_outsider),
        };
        if better {
            best = Some((worst, outsider, code));
        }
    }
    // `all` is never empty: every configuration has at least two codes.
    best.map(|(_, _, code)| code.clone())
        .unwrap_or_else(|| candidates[0].clone())
}
