use core::iter::FusedIterator;

use num_traits::{PrimInt, Zero};

use super::{get, get_unchecked, locate};
use crate::atomic::AtomicScalar;
use crate::model::{self, MemoryModel};

/// Smallest set bit strictly after `i` and strictly before `e`, reading words
/// through `word_at`. Saturates to `e`.
///
/// One load per word touched; empty words are skipped without testing bits.
#[inline(always)]
fn scan_from<'a, A, M, F>(word_at: F, mut i: usize, e: usize, m: M) -> usize
where
    A: AtomicScalar + 'a,
    M: MemoryModel,
    F: Fn(usize) -> &'a A,
{
    let word_bits = A::BITS as usize;
    loop {
        i = match i.checked_add(1) {
            Some(n) if n < e => n,
            _ => return e,
        };

        let (w, b) = locate::<A>(i);
        let rest = model::load(word_at(w), m).unsigned_shr(b);
        if !rest.is_zero() {
            let n = i + rest.trailing_zeros() as usize;
            return n.min(e);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(word = w, end = e, "skipping empty bitmap word");

        // Land on the word's last bit so the next increment starts the next word.
        i += word_bits - 1 - b as usize;
    }
}

/// Index of the smallest set bit in `(i, e)`, or `e` if there is none.
///
/// The result is always in `(i, e]` when `i < e`, and `e` otherwise, so it can
/// be used directly as a loop bound.
///
/// # Panics
/// Panics if a word the scan needs to read is outside `bits`. Callers keep
/// `e <= bits.len() * A::BITS` to avoid this.
#[inline]
pub fn next<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, e: usize, m: M) -> usize {
    scan_from(|w| &bits[w], i, e, m)
}

/// Unchecked [`next`].
///
/// # Safety
/// Every word holding a bit in `(i, e)` must be inside `bits`, which holds
/// whenever `e <= bits.len() * A::BITS`.
#[inline]
pub unsafe fn next_unchecked<A: AtomicScalar, M: MemoryModel>(
    bits: &[A],
    i: usize,
    e: usize,
    m: M,
) -> usize {
    // SAFETY: caller guarantees every scanned word index is in range.
    scan_from(|w| unsafe { bits.get_unchecked(w) }, i, e, m)
}

/// `i` if bit `i` is set, otherwise [`next`]`(bits, i, e)`. Returns `e` when
/// `i >= e` without reading anything.
///
/// # Panics
/// As for [`next`], and if bit `i`'s word is outside `bits`.
#[inline]
pub fn first<A: AtomicScalar, M: MemoryModel>(bits: &[A], i: usize, e: usize, m: M) -> usize {
    if i >= e {
        e
    } else if get(bits, i, m) {
        i
    } else {
        next(bits, i, e, m)
    }
}

/// Unchecked [`first`].
///
/// # Safety
/// Every word holding a bit in `[i, e)` must be inside `bits`.
#[inline]
pub unsafe fn first_unchecked<A: AtomicScalar, M: MemoryModel>(
    bits: &[A],
    i: usize,
    e: usize,
    m: M,
) -> usize {
    // SAFETY: forwarded caller contract; `i < e` is checked before reading.
    unsafe {
        if i >= e {
            e
        } else if get_unchecked(bits, i, m) {
            i
        } else {
            next_unchecked(bits, i, e, m)
        }
    }
}

/// Iterator over the set bits of `bits` in `[start, end)`, in increasing order.
///
/// Each step is one [`first`]/[`next`] call, so iteration is lock-free and
/// may observe bits set or cleared concurrently. It never yields an index
/// outside the range and never yields the same index twice.
#[derive(Clone, Debug)]
pub struct SetBits<'a, A, M> {
    bits: &'a [A],
    cursor: Cursor,
    end: usize,
    model: M,
}

#[derive(Clone, Copy, Debug)]
enum Cursor {
    Start(usize),
    After(usize),
    Done,
}

/// Iterates over the set bits of `bits` in `[start, end)`.
///
/// # Panics
/// The iterator panics as [`next`] does if `end` reaches past `bits`.
#[inline]
pub fn iter_set<A: AtomicScalar, M: MemoryModel>(
    bits: &[A],
    start: usize,
    end: usize,
    m: M,
) -> SetBits<'_, A, M> {
    SetBits {
        bits,
        cursor: Cursor::Start(start),
        end,
        model: m,
    }
}

impl<A: AtomicScalar, M: MemoryModel> Iterator for SetBits<'_, A, M> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let found = match self.cursor {
            Cursor::Start(i) => first(self.bits, i, self.end, self.model),
            Cursor::After(i) => next(self.bits, i, self.end, self.model),
            Cursor::Done => return None,
        };
        if found >= self.end {
            #[cfg(feature = "tracing")]
            tracing::trace!(end = self.end, "bitmap iteration exhausted");
            self.cursor = Cursor::Done;
            None
        } else {
            self.cursor = Cursor::After(found);
            Some(found)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.cursor {
            Cursor::Start(i) => self.end.saturating_sub(i),
            Cursor::After(i) => self.end.saturating_sub(i + 1),
            Cursor::Done => 0,
        };
        (0, Some(remaining))
    }
}

impl<A: AtomicScalar, M: MemoryModel> FusedIterator for SetBits<'_, A, M> {}

/// Number of set bits in `[start, end)`.
///
/// Not a snapshot: concurrent updates during the count may or may not be
/// reflected.
#[inline]
pub fn count_ones<A: AtomicScalar, M: MemoryModel>(
    bits: &[A],
    start: usize,
    end: usize,
    m: M,
) -> usize {
    iter_set(bits, start, end, m).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::set;
    use crate::model::RC;
    use core::sync::atomic::AtomicU8;

    #[test]
    fn scan_walks_across_empty_words() {
        let bits: Vec<AtomicU8> = (0..4).map(|_| AtomicU8::new(0)).collect();
        set(&bits, 30, RC);
        assert_eq!(next(&bits, 0, 32, RC), 30);
        assert_eq!(next(&bits, 30, 32, RC), 32);
        assert_eq!(next(&bits, 0, 30, RC), 30);
        assert_eq!(next(&bits, 0, 29, RC), 29);
    }

    #[test]
    fn scan_does_not_overflow_at_usize_max() {
        let bits: [AtomicU8; 0] = [];
        assert_eq!(next(&bits, usize::MAX, usize::MAX, RC), usize::MAX);
    }
}
