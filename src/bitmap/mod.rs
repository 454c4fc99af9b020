//! Lock-free atomic bitmap over caller-owned words.
//!
//! A bitmap is a slice of atomic words; bit `i` lives in word `i / BITS` at
//! offset `i % BITS`. Nothing here allocates, locks, or retries: `get` is one
//! load, `set`/`clear` are one unconditional fetch-or/fetch-and, and the scans
//! in [`scan`] do one load per word touched.
//!
//! Every operation comes in two modes:
//! - **checked** (`get`, `set`, ...): indexes the slice normally and panics if
//!   the word is outside it. No other validation.
//! - **unchecked** (`get_unchecked`, ...): no bounds check at all. The caller
//!   guarantees every word touched is in range.
//!
//! The model tag decides the orderings; pass [`RC`](crate::model::RC) for the
//! default release consistency.

use num_traits::{One, Zero};

use crate::atomic::AtomicScalar;
use crate::model::{self, MemoryModel};

/// Bit scans: `first`, `next`, and the `SetBits` iterator.
pub mod scan;

pub use scan::{
    count_ones, first, first_unchecked, iter_set, next, next_unchecked, SetBits,
};

/// Width of the native bitmap word (`AtomicUsize`).
pub const BITMAP_WORD_BITS: u32 = usize::BITS;

/// Splits a bit index into (word index, offset within the word).
#[inline(always)]
pub(crate) fn locate<A: AtomicScalar>(i: usize) -> (usize, u32) {
    let word_bits = A::BITS as usize;
    // `BITS` is a power of two, so this folds to a shift and a mask.
    (i / word_bits, (i % word_bits) as u32)
}

/// Single-bit mask for `offset` within a word of type `A`.
///
/// `offset` must be below `A::BITS`.
#[inline(always)]
pub fn mask<A: AtomicScalar>(offset: u32) -> A::Value {
    A::Value::one() << offset as usize
}

/// Number of `word_bits`-wide words needed to hold `n_bits` bits.
#[inline]
pub const fn word_count_for(n_bits: usize, word_bits: u32) -> usize {
    n_bits.div_ceil(word_bits as usize)
}

/// Number of `A` words needed to hold `n_bits` bits.
#[inline]
pub fn word_count<A: AtomicScalar>(n_bits: usize) -> usize {
    word_count_for(n_bits, A::BITS)
}

#[inline(always)]
fn test_word<A: AtomicScalar, M: MemoryModel>(word: &A, offset: u32, m: M) -> bool {
    !(model::load(word, m) & mask::<A>(offset)).is_zero()
}

#[inline(always)]
fn set_word<A: AtomicScalar, M: MemoryModel>(word: &A, offset: u32, m: M) -> bool {
    let mask = mask::<A>(offset);
    !(model::fetch_or(word, mask, m) & mask).is_zero()
}

#[inline(always)]
fn clear_word<A: AtomicScalar, M: MemoryModel>(word: &A, offset: u32, m: M) -> bool {
    let mask = mask::<A>(offset);
    !(model::fetch_and(word, !mask, m) & mask).is_zero()
}

/// Returns whether bit `i` is set.
///
/// # Panics
/// Panics if `i / A::BITS >= bits.len()`.
#[inline]
pub fn get<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    test_word(&bits[w], b, m)
}

/// Sets bit `i`, returning its previous value.
///
/// # Panics
/// Panics if `i / A::BITS >= bits.len()`.
#[inline]
pub fn set<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    set_word(&bits[w], b, m)
}

/// Clears bit `i`, returning its previous value.
///
/// # Panics
/// Panics if `i / A::BITS >= bits.len()`.
#[inline]
pub fn clear<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    clear_word(&bits[w], b, m)
}

/// Unchecked [`get`].
///
/// # Safety
/// `i / A::BITS` must be less than `bits.len()`.
#[inline(always)]
pub unsafe fn get_unchecked<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    // SAFETY: caller guarantees the word index is in range.
    test_word(unsafe { bits.get_unchecked(w) }, b, m)
}

/// Unchecked [`set`].
///
/// # Safety
/// `i / A::BITS` must be less than `bits.len()`.
#[inline(always)]
pub unsafe fn set_unchecked<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    // SAFETY: caller guarantees the word index is in range.
    set_word(unsafe { bits.get_unchecked(w) }, b, m)
}

/// Unchecked [`clear`].
///
/// # Safety
/// `i / A::BITS` must be less than `bits.len()`.
#[inline(always)]
pub unsafe fn clear_unchecked<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, m: M) -> bool {
    let (w, b) = locate::<A>(i);
    // SAFETY: caller guarantees the word index is in range.
    clear_word(unsafe { bits.get_unchecked(w) }, b, m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize};

    #[test]
    fn locate_splits_index() {
        assert_eq!(locate::<AtomicU64>(0), (0, 0));
        assert_eq!(locate::<AtomicU64>(63), (0, 63));
        assert_eq!(locate::<AtomicU64>(64), (1, 0));
        assert_eq!(locate::<AtomicU8>(19), (2, 3));
    }

    #[test]
    fn mask_and_word_count() {
        assert_eq!(mask::<AtomicU8>(7), 0x80);
        assert_eq!(mask::<AtomicU64>(63), 1 << 63);
        assert_eq!(word_count::<AtomicU64>(0), 0);
        assert_eq!(word_count::<AtomicU64>(1), 1);
        assert_eq!(word_count::<AtomicU64>(64), 1);
        assert_eq!(word_count::<AtomicU64>(65), 2);
        assert_eq!(word_count::<AtomicUsize>(1), 1);
        assert_eq!(BITMAP_WORD_BITS, <AtomicUsize as AtomicScalar>::BITS);
    }
}
