//! Results collection and output for strategy sweeps.
//!
//! Captures:
//! - Per-trial samples (guesses, wall-clock seconds)
//! - Per (strategy, configuration) mean and population standard deviation
//! - The ordered result table consumed by reporting and plotting

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mastermind_kernel::Configuration;

/// One trial of one strategy at one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialSample {
    /// Guesses needed to identify the secret (at least 1)
    pub guess_count: usize,
    /// Wall-clock time of the solve call
    pub elapsed_seconds: f64,
}

/// Summary of the N trials for one (strategy, configuration) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub configuration: Configuration,
    pub mean_guesses: f64,
    pub mean_runtime: f64,
    /// Population standard deviation of guess counts
    pub std_guesses: f64,
    /// Population standard deviation of runtimes
    pub std_runtime: f64,
}

impl AggregateStat {
    /// Reduce samples to means and population standard deviations.
    ///
    /// Returns `None` for an empty sample set.
    pub fn from_samples(configuration: Configuration, samples: &[TrialSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let guesses: Vec<f64> = samples.iter().map(|s| s.guess_count as f64).collect();
        let runtimes: Vec<f64> = samples.iter().map(|s| s.elapsed_seconds).collect();

        let mean_guesses = mean(&guesses);
        let mean_runtime = mean(&runtimes);
        Some(Self {
            configuration,
            mean_guesses,
            mean_runtime,
            std_guesses: population_std(&guesses, mean_guesses),
            std_runtime: population_std(&runtimes, mean_runtime),
        })
    }
}

impl fmt::Display for AggregateStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {:.3}, {:.6}, {:.3}, {:.6})",
            self.configuration,
            self.mean_guesses,
            self.mean_runtime,
            self.std_guesses,
            self.std_runtime
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation dividing by N, not N - 1.
fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// All aggregates produced by one strategy, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResults {
    pub strategy: String,
    pub stats: Vec<AggregateStat>,
}

/// Strategy name to ordered aggregates.
///
/// Strategies appear in first-insertion order and each list in the order its
/// configurations were swept. Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    entries: Vec<StrategyResults>,
}

impl ResultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one aggregate to a strategy's list.
    pub fn append(&mut self, strategy: &str, stat: AggregateStat) {
        match self.entries.iter_mut().find(|e| e.strategy == strategy) {
            Some(entry) => entry.stats.push(stat),
            None => self.entries.push(StrategyResults {
                strategy: strategy.to_string(),
                stats: vec![stat],
            }),
        }
    }

    /// Append every entry of `other`, in its order.
    pub fn extend(&mut self, other: ResultTable) {
        for entry in other.entries {
            for stat in entry.stats {
                self.append(&entry.strategy, stat);
            }
        }
    }

    pub fn get(&self, strategy: &str) -> Option<&[AggregateStat]> {
        self.entries
            .iter()
            .find(|e| e.strategy == strategy)
            .map(|e| e.stats.as_slice())
    }

    pub fn strategies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.strategy.as_str())
    }

    pub fn entries(&self) -> &[StrategyResults] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each strategy's aggregates restricted to one code length.
    ///
    /// Sweep order is kept as-is; nothing is sorted.
    pub fn series_for_code_length(&self, code_length: usize) -> Vec<(&str, Vec<&AggregateStat>)> {
        self.entries
            .iter()
            .map(|e| {
                let points = e
                    .stats
                    .iter()
                    .filter(|s| s.configuration.code_length() == code_length)
                    .collect();
                (e.strategy.as_str(), points)
            })
            .collect()
    }

    /// Save the table to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        Ok(())
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results from {}", path.display()))?;
        let table = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse results from {}", path.display()))?;
        Ok(table)
    }
}

impl fmt::Display for ResultTable {
    /// `strategy: [((alphabet, length), mean_guesses, mean_runtime, std_guesses, std_runtime), ...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}: [", entry.strategy)?;
            for (i, stat) in entry.stats.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{stat}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Format a duration in seconds for display.
pub fn format_seconds(seconds: f64) -> String {
    if seconds < 1e-3 {
        format!("{:.1}µs", seconds * 1e6)
    } else if seconds < 1.0 {
        format!("{:.1}ms", seconds * 1e3)
    } else if seconds < 60.0 {
        format!("{:.2}s", seconds)
    } else {
        format!("{:.1}m", seconds / 60.0)
    }
}
