//! Parameter sweep: the ordered grid of configurations under test.

use crate::config::Configuration;
use crate::error::ConfigError;

/// Cartesian product of alphabet sizes and code lengths.
///
/// Alphabet sizes form the outer loop and code lengths the inner loop; report
/// and chart ordering depend on this. Every pair is validated.
pub fn configurations(
    alphabet_sizes: &[usize],
    code_lengths: &[usize],
) -> Result<Vec<Configuration>, ConfigError> {
    if alphabet_sizes.is_empty() {
        return Err(ConfigError::NoAlphabetSizes);
    }
    if code_lengths.is_empty() {
        return Err(ConfigError::NoCodeLengths);
    }

    let mut grid = Vec::with_capacity(alphabet_sizes.len() * code_lengths.len());
    for &alphabet_size in alphabet_sizes {
        for &code_length in code_lengths {
            grid.push(Configuration::new(alphabet_size, code_length)?);
        }
    }
    Ok(grid)
}
