//! Bit manipulation on a single storage word.
//!
//! Every function here takes a word by value and returns the updated word, so callers decide
//! where (and whether) the result is stored.

/// Type alias for the underlying storage word.
pub type Word = u64;

/// Number of bits in a [Word].
pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// Word with every bit set to 0.
pub const EMPTY_WORD: Word = 0;

/// Returns the index of the word holding bit `index`.
#[inline(always)]
pub const fn word_index(index: usize) -> usize {
    index / BITS_PER_WORD
}

/// Returns the position of bit `index` within its word.
#[inline(always)]
pub const fn bit_offset(index: usize) -> usize {
    index % BITS_PER_WORD
}

#[inline(always)]
const fn mask(offset: usize) -> Word {
    debug_assert!(offset < BITS_PER_WORD);
    1 << offset
}

/// Returns `word` with the bit at `offset` set to 1.
#[inline(always)]
pub const fn set(word: Word, offset: usize) -> Word {
    word | mask(offset)
}

/// Returns `word` with the bit at `offset` set to 0.
#[inline(always)]
pub const fn clear(word: Word, offset: usize) -> Word {
    word & !mask(offset)
}

/// Returns `word` with the bit at `offset` flipped.
#[inline(always)]
pub const fn toggle(word: Word, offset: usize) -> Word {
    word ^ mask(offset)
}

/// Returns true if the bit at `offset` is 1.
#[inline(always)]
pub const fn check(word: Word, offset: usize) -> bool {
    word & mask(offset) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, 0; "first bit")]
    #[test_case(63, 0, 63; "last bit of first word")]
    #[test_case(64, 1, 0; "first bit of second word")]
    #[test_case(200, 3, 8; "inside fourth word")]
    #[test_case(10_000, 156, 16; "far index")]
    fn test_addressing(index: usize, word: usize, offset: usize) {
        assert_eq!(word_index(index), word);
        assert_eq!(bit_offset(index), offset);
    }

    #[test]
    fn test_set_clear_toggle() {
        let mut word = EMPTY_WORD;
        word = set(word, 5);
        assert_eq!(word, 0b10_0000);
        assert!(check(word, 5));
        assert!(!check(word, 4));

        // Setting twice is idempotent
        assert_eq!(set(word, 5), word);

        word = clear(word, 5);
        assert_eq!(word, EMPTY_WORD);

        // Clearing an unset bit is a no-op
        assert_eq!(clear(word, 7), EMPTY_WORD);

        word = toggle(word, 63);
        assert_eq!(word, 1 << 63);
        word = toggle(word, 63);
        assert_eq!(word, EMPTY_WORD);
    }

    #[test]
    fn test_offsets_are_independent() {
        let mut word = EMPTY_WORD;
        for offset in (0..BITS_PER_WORD).step_by(3) {
            word = set(word, offset);
        }
        for offset in 0..BITS_PER_WORD {
            assert_eq!(check(word, offset), offset % 3 == 0, "offset {offset}");
        }
        assert_eq!(word.count_ones() as usize, BITS_PER_WORD.div_ceil(3));
    }
}
