//! The oracle: the only way a strategy learns about the secret.
//!
//! It scores guesses, records the history, enforces the guess ceiling and
//! emits per-guess tracing when asked to.

use tracing::info;

use crate::code::{Code, Feedback, Turn};
use crate::config::Configuration;
use crate::error::StrategyError;

/// Scores guesses against a secret for a single trial.
pub struct Oracle<'a> {
    configuration: Configuration,
    secret: &'a Code,
    max_guesses: usize,
    verbose: bool,
    history: Vec<Turn>,
}

impl<'a> Oracle<'a> {
    /// Create an oracle for one trial.
    ///
    /// The secret must fit the configuration.
    pub fn new(
        configuration: Configuration,
        secret: &'a Code,
        max_guesses: usize,
        verbose: bool,
    ) -> Result<Self, StrategyError> {
        if !secret.fits(&configuration) {
            return Err(StrategyError::InvalidGuess {
                reason: format!("secret {secret} does not fit configuration {configuration}"),
            });
        }
        Ok(Self {
            configuration,
            secret,
            max_guesses,
            verbose,
            history: Vec::new(),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn code_length(&self) -> usize {
        self.configuration.code_length()
    }

    pub fn alphabet_size(&self) -> usize {
        self.configuration.alphabet_size()
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    /// Guesses submitted so far.
    pub fn guesses(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Whether the last guess matched the secret.
    pub fn is_solved(&self) -> bool {
        self.history
            .last()
            .is_some_and(|turn| turn.feedback.is_win(self.code_length()))
    }

    /// Submit a guess and receive its feedback.
    ///
    /// Fails with [`StrategyError::NonConvergence`] when the guess would exceed
    /// the ceiling, and with [`StrategyError::InvalidGuess`] for a malformed code.
    pub fn guess(&mut self, code: &Code) -> Result<Feedback, StrategyError> {
        if !code.fits(&self.configuration) {
            return Err(StrategyError::InvalidGuess {
                reason: format!(
                    "{code} does not fit configuration {}",
                    self.configuration
                ),
            });
        }
        if self.history.len() >= self.max_guesses {
            return Err(StrategyError::NonConvergence {
                max_guesses: self.max_guesses,
            });
        }

        let feedback = code.score(self.secret);
        self.history.push(Turn {
            guess: code.clone(),
            feedback,
        });

        if self.verbose {
            info!(
                guess_number = self.history.len(),
                guess = %code,
                black = feedback.black,
                white = feedback.white,
                "Guess scored"
            );
        }

        Ok(feedback)
    }
}
