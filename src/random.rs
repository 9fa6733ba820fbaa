//! Random digit sources used to complete a PIN grid
//!
//! Filled cells become the user's actual PIN digits, so the default source
//! must be cryptographically secure.

use rand::Rng;
use rand::rngs::ThreadRng;

/// Produces decimal digits in `0..=9`
pub trait DigitSource {
    fn next_digit(&mut self) -> u8;
}

/// Uniform digits from the thread-local CSPRNG (ChaCha, seeded from the OS)
///
/// Each instance holds a handle to its own thread's generator, so fills on
/// different threads never share state.
#[derive(Debug, Clone, Default)]
pub struct SecureDigitSource {
    rng: ThreadRng,
}

impl SecureDigitSource {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl DigitSource for SecureDigitSource {
    fn next_digit(&mut self) -> u8 {
        // random_range rejection-samples, so no modulo bias
        self.rng.random_range(0..10)
    }
}
