//! Mastermind strategy benchmark.
//!
//! This crate runs the benchmark harness around the kernel's game rules:
//! - Sweeps (alphabet size, code length) configurations with one shared secret each
//! - Times N trials of every registered strategy and aggregates mean and std
//! - Reports progress on the console and plots per-code-length SVG charts

pub mod experiment;
pub mod generator;
pub mod plot;
pub mod registry;
pub mod report;
pub mod results;
pub mod strategies;
