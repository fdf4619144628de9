//! The strategy contract every solver implements.

use rand::RngCore;

use crate::error::StrategyError;
use crate::oracle::Oracle;

/// A pluggable Mastermind solver.
///
/// Strategies are configured at construction (cooling schedule, population
/// size, ...) and then invoked any number of times through [`Strategy::solve`].
/// One call is one trial: the strategy submits guesses to the oracle until
/// the secret is identified and returns how many guesses it used.
///
/// The oracle carries the code length, alphabet size, secret and trace flag.
/// Tracing must never influence the guesses made. Stochastic strategies draw
/// all their randomness from `rng` so a seeded sweep is repeatable.
pub trait Strategy {
    /// Unique name, used as the result-table key and chart label.
    fn name(&self) -> &str;

    /// Identify the oracle's secret, returning the number of guesses used.
    fn solve(&self, oracle: &mut Oracle<'_>, rng: &mut dyn RngCore) -> Result<usize, StrategyError>;
}
