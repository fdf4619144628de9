//! Configuration types for a benchmark sweep.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::code::MAX_ALPHABET_SIZE;
use crate::error::ConfigError;

/// One (alphabet size, code length) pair under test.
///
/// Immutable once built; `new` rejects values no game could be played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub struct Configuration {
    alphabet_size: usize,
    code_length: usize,
}

impl Configuration {
    pub fn new(alphabet_size: usize, code_length: usize) -> Result<Self, ConfigError> {
        if alphabet_size <= 1 {
            return Err(ConfigError::AlphabetTooSmall(alphabet_size));
        }
        if alphabet_size > MAX_ALPHABET_SIZE {
            return Err(ConfigError::AlphabetTooLarge {
                size: alphabet_size,
                max: MAX_ALPHABET_SIZE,
            });
        }
        if code_length == 0 {
            return Err(ConfigError::EmptyCode);
        }
        Ok(Self {
            alphabet_size,
            code_length,
        })
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Number of distinct codes, saturating at `u128::MAX`.
    pub fn search_space_size(&self) -> u128 {
        (self.alphabet_size as u128)
            .checked_pow(self.code_length as u32)
            .unwrap_or(u128::MAX)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.alphabet_size, self.code_length)
    }
}

/// Serialized form of [`Configuration`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawConfiguration {
    alphabet_size: usize,
    code_length: usize,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        Configuration::new(raw.alphabet_size, raw.code_length)
    }
}

impl From<Configuration> for RawConfiguration {
    fn from(config: Configuration) -> Self {
        Self {
            alphabet_size: config.alphabet_size,
            code_length: config.code_length,
        }
    }
}

/// Top-level sweep configuration.
///
/// Passed by value into the sweep runner; nothing reads process-wide state.
/// Loaded from JSON at runtime and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Alphabet sizes to sweep (outer loop, in order)
    pub alphabet_sizes: Vec<usize>,

    /// Code lengths to sweep (inner loop, in order).
    /// Cost grows steeply with length; keep these small.
    pub code_lengths: Vec<usize>,

    /// Trials averaged per (strategy, configuration) pair
    pub trials: usize,

    /// Per-guess tracing inside strategies
    pub trace_guesses: bool,

    /// Print a summary line after each strategy at each configuration
    pub summary_stats: bool,

    /// Guess ceiling per trial; exceeding it is a non-convergence failure
    pub max_guesses: usize,

    /// Seed for the shared random source (None draws from the OS)
    pub seed: Option<u64>,

    /// Code length the comparison charts are drawn for
    pub plot_code_length: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            alphabet_sizes: (4..=10).collect(),
            code_lengths: vec![4],
            trials: 20,
            trace_guesses: false,
            summary_stats: true,
            max_guesses: 30,
            seed: None,
            plot_code_length: 4,
        }
    }
}

impl SweepConfig {
    /// Check every parameter before a sweep starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.max_guesses == 0 {
            return Err(ConfigError::NoGuessBudget);
        }
        crate::sweep::configurations(&self.alphabet_sizes, &self.code_lengths).map(|_| ())
    }

    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Failure reading a [`SweepConfig`] from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
