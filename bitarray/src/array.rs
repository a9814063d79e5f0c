//! Bit array that grows on write.
//!
//! Bits are packed into [u64] words. Writing (set, clear, toggle, push) an index beyond the
//! current capacity doubles the storage until the index is addressable. Reading an index beyond
//! the current capacity returns `false` and never allocates.

use crate::{
    allocator::{AllocError, Allocator, Global},
    storage::Words,
    word::{self, Word, BITS_PER_WORD},
    Config, Error,
};
use core::fmt::{self, Formatter, Write as _};

/// Largest capacity (in bits) reachable by doubling a power-of-two capacity.
const MAX_CAPACITY: usize = 1 << (usize::BITS - 1);

/// A packed array of bits that doubles its storage when written out of range.
///
/// Mutation requires `&mut self`, so exclusive access is enforced by the borrow checker. There is
/// no internal synchronization.
pub struct BitArray<A: Allocator = Global> {
    /// Backing storage. Its length is always a power of two.
    words: Words<A>,
    /// Number of bits appended with [BitArray::push].
    len: usize,
}

impl BitArray<Global> {
    /// Creates an empty array with one word of storage from the process allocator.
    ///
    /// # Panics
    ///
    /// Panics if the initial word cannot be allocated. Use [BitArray::try_new] to handle the
    /// failure instead.
    pub fn new() -> Self {
        Self::try_new().expect("failed to allocate initial word")
    }

    /// Creates an empty array with one word of storage from the process allocator.
    pub fn try_new() -> Result<Self, Error> {
        Self::with_allocator(Global)
    }
}

impl Default for BitArray<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> BitArray<A> {
    /// Creates an empty array with one word of storage from `allocator`.
    pub fn with_allocator(allocator: A) -> Result<Self, Error> {
        Self::init(allocator, Config::default())
    }

    /// Creates an empty array with storage sized by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidArgument] if `cfg` is invalid and [Error::Memory] if the initial
    /// storage cannot be allocated.
    pub fn init(allocator: A, cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        let words = Words::new(allocator, cfg.initial_words)?;
        Ok(Self { words, len: 0 })
    }

    /// Releases the array's storage.
    ///
    /// Equivalent to dropping the array. The array is moved, so it cannot be used afterwards:
    ///
    /// ```compile_fail
    /// # use bitarray::BitArray;
    /// let bits = BitArray::new();
    /// bits.destroy();
    /// bits.get(0);
    /// ```
    pub fn destroy(self) {
        drop(self);
    }

    /// Returns the number of bits appended with [BitArray::push].
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no bits have been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bits backed by storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    /// Returns the backing words. Bit `i` is bit `i % 64` of word `i / 64`.
    #[inline]
    pub fn words(&self) -> &[Word] {
        self.words.as_slice()
    }

    /// Returns the allocator backing this array.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.words.allocator()
    }

    /// Gets the value of the bit at `index` (true if 1, false if 0).
    ///
    /// Returns false if `index` is beyond the capacity. Never allocates.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.capacity() {
            return false;
        }
        word::check(self.words.get(word::word_index(index)), word::bit_offset(index))
    }

    /// Sets the bit at `index` to 1, growing the storage if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::Memory] if the storage cannot grow to cover `index`. Doublings that
    /// succeeded before the failure are kept and no bit is changed.
    pub fn set(&mut self, index: usize) -> Result<(), Error> {
        self.grow_to(index)?;
        self.words
            .update(word::word_index(index), |w| word::set(w, word::bit_offset(index)));
        Ok(())
    }

    /// Sets the bit at `index` to 0.
    ///
    /// If `index` is beyond the capacity the bit already reads as 0; the storage is grown to
    /// cover it and left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [Error::Memory] if the storage cannot grow to cover `index`.
    pub fn clear(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.capacity() {
            return self.grow_to(index);
        }
        self.words
            .update(word::word_index(index), |w| word::clear(w, word::bit_offset(index)));
        Ok(())
    }

    /// Flips the bit at `index`, growing the storage if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::Memory] if the storage cannot grow to cover `index`.
    pub fn toggle(&mut self, index: usize) -> Result<(), Error> {
        self.grow_to(index)?;
        self.words
            .update(word::word_index(index), |w| word::toggle(w, word::bit_offset(index)));
        Ok(())
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Memory] if the storage cannot grow to cover `index`.
    #[inline]
    pub fn set_to(&mut self, index: usize, value: bool) -> Result<(), Error> {
        if value {
            self.set(index)
        } else {
            self.clear(index)
        }
    }

    /// Appends a bit at position [BitArray::len] and advances the length.
    ///
    /// # Errors
    ///
    /// Returns [Error::Memory] if the storage cannot grow. The length is unchanged on failure.
    pub fn push(&mut self, value: bool) -> Result<(), Error> {
        self.set_to(self.len, value)?;
        self.len += 1;
        Ok(())
    }

    /// Doubles the storage until `index` is addressable.
    fn grow_to(&mut self, index: usize) -> Result<(), Error> {
        if index >= MAX_CAPACITY {
            return Err(AllocError::CapacityOverflow.into());
        }
        // TODO: compute the final word count up front so the new region is zeroed once rather
        // than once per doubling.
        while index >= self.capacity() {
            self.words.double()?;
        }
        Ok(())
    }
}

impl<A: Allocator> fmt::Debug for BitArray<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // For large arrays, only show a preview
        const MAX_DISPLAY: usize = 64;
        const HALF_DISPLAY: usize = MAX_DISPLAY / 2;

        let write_bit = |formatter: &mut Formatter<'_>, index: usize| -> fmt::Result {
            formatter.write_char(if self.get(index) { '1' } else { '0' })
        };

        let capacity = self.capacity();
        write!(f, "BitArray[len={}, capacity={capacity}, ", self.len)?;
        if capacity <= MAX_DISPLAY {
            for i in 0..capacity {
                write_bit(f, i)?;
            }
        } else {
            for i in 0..HALF_DISPLAY {
                write_bit(f, i)?;
            }
            f.write_str("...")?;
            for i in (capacity - HALF_DISPLAY)..capacity {
                write_bit(f, i)?;
            }
        }
        f.write_str("]")
    }
}
