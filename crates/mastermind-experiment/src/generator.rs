//! Secret code generator.
//!
//! One secret is drawn per configuration and shared by every strategy and
//! every trial at that configuration.

use rand::RngCore;

use mastermind_kernel::{Code, Configuration};

/// Draw a secret: `code_length` independent uniform symbols.
///
/// Advances the shared random source.
pub fn generate_secret(configuration: &Configuration, rng: &mut dyn RngCore) -> Code {
    Code::random(configuration, rng)
}
