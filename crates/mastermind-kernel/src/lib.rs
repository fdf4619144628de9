//! Mastermind Kernel: the game model and strategy contract for benchmarking.
//!
//! This crate defines what every solver and the benchmark harness agree on:
//! codes and peg scoring, the guess-counting oracle, the `Strategy` trait and
//! the sweep configuration.

pub mod code;
pub mod config;
pub mod error;
pub mod oracle;
pub mod strategy;
pub mod sweep;

pub use code::{Code, Feedback, Symbol, Turn};
pub use config::{ConfigLoadError, Configuration, SweepConfig};
pub use error::{ConfigError, StrategyError};
pub use oracle::Oracle;
pub use strategy::Strategy;
pub use sweep::configurations;
