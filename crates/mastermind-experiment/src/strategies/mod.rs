//! Mastermind solvers benchmarked by the harness.
//!
//! - `knuth`: worst-case minimax over the full code space
//! - `random_search`: random codes consistent with the history
//! - `entropy`: most informative consistent code (all steps, or after a fixed opening)
//! - `annealing`: simulated annealing over Bernier inconsistency
//! - `genetic`: genetic algorithm over Bernier inconsistency
//!
//! The annealing and genetic solvers collect an eligible set of consistent
//! codes and let an [`Objective`] pick the guess from it.

pub mod annealing;
pub mod entropy;
pub mod genetic;
pub mod knuth;
pub mod random_search;

pub use annealing::SimulatedAnnealing;
pub use entropy::{EntropyMaximizer, Opening};
pub use genetic::GeneticAlgorithm;
pub use knuth::Knuth;
pub use random_search::RandomSearch;

use rand::{Rng, RngCore};

use mastermind_kernel::code::partition_entropy;
use mastermind_kernel::{Code, Configuration, Symbol};

/// Largest code space the exhaustive strategies will enumerate.
pub const DEFAULT_SPACE_LIMIT: u128 = 1 << 20;

/// Rule for choosing a guess among eligible (consistent) codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Plain Bernier consistency: the first eligible code found
    Bernier,
    /// The eligible code whose feedback partition of the set has the most entropy
    Entropy,
}

impl Objective {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bernier => "bernier",
            Self::Entropy => "entropy",
        }
    }

    /// Pick a guess from the eligible set, if any.
    pub fn select<'c>(&self, eligible: &'c [Code]) -> Option<&'c Code> {
        match self {
            Self::Bernier => eligible.first(),
            Self::Entropy => {
                let mut best: Option<(&Code, f64)> = None;
                for code in eligible {
                    let h = partition_entropy(code, eligible);
                    if best.is_none_or(|(_, best_h)| h > best_h) {
                        best = Some((code, h));
                    }
                }
                best.map(|(code, _)| code)
            }
        }
    }
}

/// A random neighbour: either one position recoloured or two positions swapped.
pub(crate) fn neighbor(code: &Code, configuration: &Configuration, rng: &mut dyn RngCore) -> Code {
    let mut symbols = code.symbols().to_vec();
    let length = symbols.len();

    if length >= 2 && rng.random_bool(0.25) {
        let a = rng.random_range(0..length);
        let b = rng.random_range(0..length);
        symbols.swap(a, b);
    } else {
        let pos = rng.random_range(0..length);
        symbols[pos] = other_symbol(symbols[pos], configuration, rng);
    }
    Code::new(symbols)
}

/// A uniformly random symbol different from `current`.
pub(crate) fn other_symbol(current: Symbol, configuration: &Configuration, rng: &mut dyn RngCore) -> Symbol {
    let mut s = rng.random_range(0..configuration.alphabet_size() - 1) as Symbol;
    if s >= current {
        s += 1;
    }
    s
}
