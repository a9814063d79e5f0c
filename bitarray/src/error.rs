use crate::allocator::AllocError;
use thiserror::Error;

/// Errors that can occur when interacting with a [BitArray](crate::BitArray).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("memory error: {0}")]
    Memory(#[from] AllocError),
}
