//! Entropy-maximising strategy.
//!
//! Every guess is drawn from the codes still consistent with the answers, and
//! is the one whose answer is expected to carry the most information (Shannon
//! entropy of the feedback partition it induces on that set).

use rand::RngCore;

use mastermind_kernel::code::{all_codes, partition_entropy};
use mastermind_kernel::{Code, Oracle, Strategy, StrategyError};

use super::DEFAULT_SPACE_LIMIT;

/// How the first guess is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    /// Maximise entropy from the very first guess
    Maximize,
    /// Play the fixed two-colour opening, maximise afterwards
    Fixed,
}

#[derive(Debug, Clone)]
pub struct EntropyMaximizer {
    opening: Opening,
    space_limit: u128,
}

impl EntropyMaximizer {
    pub fn new(opening: Opening, space_limit: u128) -> Self {
        Self {
            opening,
            space_limit,
        }
    }

    /// Maximise on every step.
    pub fn all_steps() -> Self {
        Self::new(Opening::Maximize, DEFAULT_SPACE_LIMIT)
    }

    /// Maximise on every step except the first.
    pub fn minus_one() -> Self {
        Self::new(Opening::Fixed, DEFAULT_SPACE_LIMIT)
    }
}

impl Strategy for EntropyMaximizer {
    fn name(&self) -> &str {
        match self.opening {
            Opening::Maximize => "entropy-all",
            Opening::Fixed => "entropy-minusone",
        }
    }

    fn solve(&self, oracle: &mut Oracle<'_>, _rng: &mut dyn RngCore) -> Result<usize, StrategyError> {
        let mut candidates = all_codes(oracle.configuration(), self.space_limit)?;

        loop {
            let guess = if oracle.guesses() == 0 && self.opening == Opening::Fixed {
                Code::opening(oracle.configuration())
            } else {
                most_informative(&candidates).ok_or_else(|| {
                    StrategyError::Internal("no candidate codes remain consistent".to_string())
                })?
            };

            let feedback = oracle.guess(&guess)?;
            if feedback.is_win(oracle.code_length()) {
                return Ok(oracle.guesses());
            }
            candidates.retain(|c| guess.score(c) == feedback);
        }
    }
}

/// The candidate with the highest partition entropy; first one wins ties.
fn most_informative(candidates: &[Code]) -> Option<Code> {
    if let [only] = candidates {
        return Some(only.clone());
    }

    let mut best: Option<(&Code, f64)> = None;
    for code in candidates {
        let h = partition_entropy(code, candidates);
        if best.is_none_or(|(_, best_h)| h > best_h) {
            best = Some((code, h));
        }
    }
    best.map(|(code, _)| code.clone())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::solve_all;
    use super::*;

    #[test]
    fn test_all_steps_solves_every_code() {
        let counts = solve_all(&EntropyMaximizer::all_steps(), 4, 3, 10).unwrap();
        assert_eq!(counts.len(), 64);
        assert!(counts.iter().all(|&c| (1..=7).contains(&c)));
    }

    #[test]
    fn test_minus_one_opens_with_fixed_code() {
        let strategy = EntropyMaximizer::minus_one();
        let config = mastermind_kernel::Configuration::new(5, 4).unwrap();
        let secret = Code::new(vec![4, 3, 2, 1]);
        let mut oracle = Oracle::new(config, &secret, 10, false).unwrap();

        strategy.solve(&mut oracle, &mut rand::rng()).unwrap();
        assert_eq!(oracle.history()[0].guess, Code::new(vec![0, 0, 1, 1]));
    }

    #[test]
    fn test_names_distinguish_variants() {
        assert_eq!(EntropyMaximizer::all_steps().name(), "entropy-all");
        assert_eq!(EntropyMaximizer::minus_one().name(), "entropy-minusone");
    }

    #[test]
    fn test_most_informative_handles_singleton_and_empty() {
        let only = Code::new(vec![1, 2]);
        assert_eq!(most_informative(std::slice::from_ref(&only)), Some(only));
        assert_eq!(most_informative(&[]), None);
    }
}
