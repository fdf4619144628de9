//! Codes, feedback scoring and consistency checks.
//!
//! A code is a fixed-length sequence of symbols in `[0, alphabet_size)`.
//! Scoring follows the usual peg rules:
//! - black: same symbol in the same position
//! - white: shared symbol in a different position, each symbol counted at most
//!   as often as it appears in both codes

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::StrategyError;

/// A single code symbol.
pub type Symbol = u8;

/// Largest alphabet the scorer supports (symbol counts live on the stack).
pub const MAX_ALPHABET_SIZE: usize = 64;

/// An ordered sequence of symbols: a guess or a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<Symbol>);

impl Code {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Draw each position independently and uniformly from the alphabet.
    pub fn random<R: Rng + ?Sized>(configuration: &Configuration, rng: &mut R) -> Self {
        let alphabet = configuration.alphabet_size();
        Self(
            (0..configuration.code_length())
                .map(|_| rng.random_range(0..alphabet) as Symbol)
                .collect(),
        )
    }

    /// The classic two-colour opening (`0 0 1 1` for length 4).
    ///
    /// The first half of the positions take symbol 0, the rest symbol 1.
    pub fn opening(configuration: &Configuration) -> Self {
        let length = configuration.code_length();
        let half = length / 2;
        Self((0..length).map(|i| if i < half { 0 } else { 1 }).collect())
    }

    /// Decode a code from its index in lexicographic order.
    pub fn from_index(mut index: u128, configuration: &Configuration) -> Self {
        let alphabet = configuration.alphabet_size() as u128;
        let mut symbols = vec![0; configuration.code_length()];
        for slot in symbols.iter_mut().rev() {
            *slot = (index % alphabet) as Symbol;
            index /= alphabet;
        }
        Self(symbols)
    }

    /// Score this code as a guess against `secret`.
    pub fn score(&self, secret: &Code) -> Feedback {
        score(&self.0, &secret.0)
    }

    /// Whether this code fits the given configuration.
    pub fn fits(&self, configuration: &Configuration) -> bool {
        self.len() == configuration.code_length()
            && self
                .0
                .iter()
                .all(|&s| (s as usize) < configuration.alphabet_size())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "]")
    }
}

/// Peg feedback for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback {
    /// Right symbol, right position
    pub black: usize,
    /// Right symbol, wrong position
    pub white: usize,
}

impl Feedback {
    pub fn new(black: usize, white: usize) -> Self {
        Self { black, white }
    }

    /// All positions matched.
    pub fn is_win(&self, code_length: usize) -> bool {
        self.black == code_length
    }

    /// Dense index of this feedback, for partition counting.
    pub fn index(&self, code_length: usize) -> usize {
        self.black * (code_length + 1) + self.white
    }

    /// Number of dense indices needed for a given code length.
    pub fn slots(code_length: usize) -> usize {
        (code_length + 1) * (code_length + 1)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B{}W", self.black, self.white)
    }
}

/// Score a guess against a secret of the same length.
pub fn score(guess: &[Symbol], secret: &[Symbol]) -> Feedback {
    let mut unmatched_secret = [0u16; MAX_ALPHABET_SIZE];
    let mut black = 0;
    for (&g, &s) in guess.iter().zip(secret) {
        if g == s {
            black += 1;
        } else {
            unmatched_secret[s as usize] += 1;
        }
    }

    let mut white = 0;
    for (&g, &s) in guess.iter().zip(secret) {
        if g != s && unmatched_secret[g as usize] > 0 {
            unmatched_secret[g as usize] -= 1;
            white += 1;
        }
    }

    Feedback { black, white }
}

/// One completed guess and the feedback it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub guess: Code,
    pub feedback: Feedback,
}

/// Whether `candidate` could still be the secret given everything observed.
pub fn is_consistent(candidate: &Code, history: &[Turn]) -> bool {
    history
        .iter()
        .all(|turn| turn.guess.score(candidate) == turn.feedback)
}

/// Bernier inconsistency: total peg disagreement with the observed history.
///
/// Zero exactly when the candidate is consistent.
pub fn inconsistency(candidate: &Code, history: &[Turn]) -> usize {
    history
        .iter()
        .map(|turn| {
            let fb = turn.guess.score(candidate);
            fb.black.abs_diff(turn.feedback.black) + fb.white.abs_diff(turn.feedback.white)
        })
        .sum()
}

/// Enumerate every code of a configuration in lexicographic order.
///
/// Fails when the space holds more than `limit` codes.
pub fn all_codes(configuration: &Configuration, limit: u128) -> Result<Vec<Code>, StrategyError> {
    let size = configuration.search_space_size();
    if size > limit {
        return Err(StrategyError::SearchSpaceTooLarge { size, limit });
    }

    let alphabet = configuration.alphabet_size() as Symbol;
    let mut codes = Vec::with_capacity(size as usize);
    let mut current = vec![0 as Symbol; configuration.code_length()];
    loop {
        codes.push(Code(current.clone()));

        // Odometer increment from the last position.
        let mut pos = current.len();
        loop {
            if pos == 0 {
                return Ok(codes);
            }
            pos -= 1;
            current[pos] += 1;
            if current[pos] < alphabet {
                break;
            }
            current[pos] = 0;
        }
    }
}

/// Domain-safe `-p·log2(p)`, with `0·log(0)` taken as 0.
pub fn entropy_term(p: f64) -> f64 {
    if p <= 0.0 { 0.0 } else { -p * p.log2() }
}

/// Shannon entropy (bits) of the feedback partition `guess` induces on `pool`.
pub fn partition_entropy(guess: &Code, pool: &[Code]) -> f64 {
    if pool.is_empty() {
        return 0.0;
    }
    let length = guess.len();
    let mut counts = vec![0usize; Feedback::slots(length)];
    for candidate in pool {
        counts[guess.score(candidate).index(length)] += 1;
    }
    let total = pool.len() as f64;
    counts
        .iter()
        .map(|&c| entropy_term(c as f64 / total))
        .sum()
}

/// Size of the largest feedback class `guess` induces on `pool`.
pub fn worst_case_partition(guess: &Code, pool: &[Code]) -> usize {
    let length = guess.len();
    let mut counts = vec![0usize; Feedback::slots(length)];
    for candidate in pool {
        counts[guess.score(candidate).index(length)] += 1;
    }
    counts.into_iter().max().unwrap_or(0)
}
