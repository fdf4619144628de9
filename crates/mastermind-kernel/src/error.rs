//! Error types shared by the harness and the strategies.

use thiserror::Error;

/// Rejected sweep or game parameters.
///
/// Raised before any trial runs, so a malformed configuration never
/// produces a partial result table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alphabet size must be greater than 1, got {0}")]
    AlphabetTooSmall(usize),

    #[error("alphabet size {size} exceeds the supported maximum of {max}")]
    AlphabetTooLarge { size: usize, max: usize },

    #[error("code length must be at least 1")]
    EmptyCode,

    #[error("no alphabet sizes to sweep")]
    NoAlphabetSizes,

    #[error("no code lengths to sweep")]
    NoCodeLengths,

    #[error("trials per configuration must be at least 1")]
    NoTrials,

    #[error("max guesses per trial must be at least 1")]
    NoGuessBudget,

    #[error("strategy '{0}' is registered twice")]
    DuplicateStrategy(String),

    #[error("unknown strategy '{name}'. Valid: {valid}")]
    UnknownStrategy { name: String, valid: String },

    #[error("no strategies selected")]
    NoStrategies,
}

/// Failure raised from inside a strategy's solve call.
///
/// The trial runner never retries or wraps these: the first one aborts the
/// sweep and is reported to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("strategy did not identify the secret within {max_guesses} guesses")]
    NonConvergence { max_guesses: usize },

    #[error("invalid guess: {reason}")]
    InvalidGuess { reason: String },

    #[error("search space of {size} codes exceeds the limit of {limit}")]
    SearchSpaceTooLarge { size: u128, limit: u128 },

    #[error("strategy reported zero guesses")]
    NoGuesses,

    #[error("{0}")]
    Internal(String),
}
