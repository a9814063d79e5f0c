//! Allocate, resize, and release word storage.
//!
//! [BitArray](crate::BitArray) never touches the process allocator directly. Every buffer it
//! owns is obtained from, resized by, and returned to an [Allocator], so callers can cap memory
//! ([Bounded]) or substitute their own strategy.

use crate::word::{Word, EMPTY_WORD};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use thiserror::Error;

/// Errors that can occur when obtaining word storage.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("allocator exhausted: {words} words")]
    Exhausted { words: usize },
    #[error("limit exceeded: requested {requested} words, {available} available")]
    LimitExceeded { requested: usize, available: usize },
    #[error("length mismatch: requested {requested} words, returned {returned}")]
    LengthMismatch { requested: usize, returned: usize },
}

/// Source of word storage.
///
/// Implementations must hand out zero-filled words and must leave a buffer untouched when a
/// [Allocator::reallocate] fails.
pub trait Allocator {
    /// Returns a buffer of exactly `words` zeroed words.
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError>;

    /// Resizes `buf` to `words` words, preserving the first `min(buf.len(), words)` words and
    /// zeroing any that are added.
    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError>;

    /// Returns `buf` to the allocator.
    fn release(&self, buf: Vec<Word>);
}

/// The process allocator, accessed fallibly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError> {
        let mut buf = Vec::new();
        self.reallocate(&mut buf, words)?;
        Ok(buf)
    }

    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError> {
        if words <= buf.len() {
            buf.truncate(words);
            return Ok(());
        }
        let additional = words - buf.len();
        buf.try_reserve_exact(additional)
            .map_err(|_| AllocError::Exhausted { words })?;
        buf.resize(words, EMPTY_WORD);
        Ok(())
    }

    fn release(&self, buf: Vec<Word>) {
        drop(buf);
    }
}

/// An [Allocator] that refuses to hold more than a fixed number of words at once.
///
/// Clones share the same budget, so one [Bounded] can cap several arrays together.
#[derive(Clone, Debug)]
pub struct Bounded<A: Allocator = Global> {
    inner: A,
    limit: usize,
    used: Arc<AtomicUsize>,
}

impl Bounded<Global> {
    /// Creates a budget of `limit` words backed by [Global].
    pub fn new(limit: usize) -> Self {
        Self::wrap(Global, limit)
    }
}

impl<A: Allocator> Bounded<A> {
    /// Creates a budget of `limit` words backed by `inner`.
    pub fn wrap(inner: A, limit: usize) -> Self {
        Self {
            inner,
            limit,
            used: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the maximum number of words that may be held at once.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of words currently held.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    /// Returns the number of words that may still be allocated.
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.used())
    }

    /// Reserves `requested` words from the budget.
    fn charge(&self, requested: usize) -> Result<(), AllocError> {
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                let total = used.checked_add(requested)?;
                (total <= self.limit).then_some(total)
            })
            .map(|_| ())
            .map_err(|used| AllocError::LimitExceeded {
                requested,
                available: self.limit.saturating_sub(used),
            })
    }

    /// Returns `words` words to the budget.
    fn refund(&self, words: usize) {
        self.used.fetch_sub(words, Ordering::AcqRel);
    }
}

impl<A: Allocator> Allocator for Bounded<A> {
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError> {
        self.charge(words)?;
        self.inner.allocate(words).inspect_err(|_| self.refund(words))
    }

    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError> {
        let current = buf.len();
        if words <= current {
            self.inner.reallocate(buf, words)?;
            self.refund(current - words);
            return Ok(());
        }
        let additional = words - current;
        self.charge(additional)?;
        self.inner
            .reallocate(buf, words)
            .inspect_err(|_| self.refund(additional))
    }

    fn release(&self, buf: Vec<Word>) {
        self.refund(buf.len());
        self.inner.release(buf);
    }
}
