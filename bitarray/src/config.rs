use crate::Error;
use std::num::NonZeroUsize;

/// Configuration for a [BitArray](crate::BitArray).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of words allocated at construction.
    ///
    /// Must be a power of two, so that every capacity reached by doubling is a power-of-two
    /// multiple of the word width.
    pub initial_words: NonZeroUsize,
}

impl Config {
    /// Checks that the configuration can produce a valid array.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.initial_words.is_power_of_two() {
            return Err(Error::InvalidArgument(
                "initial_words must be a power of two",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_words: NonZeroUsize::MIN,
        }
    }
}
