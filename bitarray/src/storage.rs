//! Growable word buffer.
//!
//! [Words] owns the backing storage of a [BitArray](crate::BitArray). Its only way to grow is
//! [Words::double], which extends the buffer to twice its length, zeroes exactly the added half,
//! and leaves existing words untouched. Storage is handed back to the allocator on drop.

use crate::{
    allocator::{AllocError, Allocator},
    word::Word,
};
use std::{mem, num::NonZeroUsize};
use tracing::{debug, warn};

/// Word storage obtained from an [Allocator].
pub struct Words<A: Allocator> {
    buf: Vec<Word>,
    allocator: A,
}

impl<A: Allocator> Words<A> {
    /// Allocates `len` zeroed words from `allocator`.
    ///
    /// Fails with [AllocError::LengthMismatch] if the allocator returns a buffer of any other
    /// length.
    pub fn new(allocator: A, len: NonZeroUsize) -> Result<Self, AllocError> {
        let len = len.get();
        let mut buf = allocator.allocate(len)?;
        if buf.len() != len {
            let returned = buf.len();
            allocator.release(buf);
            warn!(requested = len, returned, "allocator returned wrong length");
            return Err(AllocError::LengthMismatch {
                requested: len,
                returned,
            });
        }

        // Zero the buffer even if the allocator already did
        buf.fill(0);
        Ok(Self { buf, allocator })
    }

    /// Returns the number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if there are no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the words as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Word] {
        &self.buf
    }

    /// Returns the word at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Word {
        self.buf[index]
    }

    /// Replaces the word at `index` with `f` applied to it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn update(&mut self, index: usize, f: impl FnOnce(Word) -> Word) {
        let word = &mut self.buf[index];
        *word = f(*word);
    }

    /// Returns the allocator backing this buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Doubles the number of words, zeroing the new half.
    ///
    /// On failure the buffer is unchanged.
    pub fn double(&mut self) -> Result<(), AllocError> {
        let old = self.buf.len();
        let new = match old.checked_mul(2) {
            Some(new) => new,
            None => {
                warn!(words = old, "word count overflow");
                return Err(AllocError::CapacityOverflow);
            }
        };
        if let Err(err) = self.allocator.reallocate(&mut self.buf, new) {
            warn!(?err, words = old, "failed to grow storage");
            return Err(err);
        }

        // Zero the new half even if the allocator already did
        self.buf[old..].fill(0);
        debug!(old, new, "doubled storage");
        Ok(())
    }
}

impl<A: Allocator> Drop for Words<A> {
    fn drop(&mut self) {
        let buf = mem::take(&mut self.buf);
        self.allocator.release(buf);
    }
}
