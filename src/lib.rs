//! # `atomic_ops` - Consistency-model atomics and a lock-free bitmap
//!
//! Portable atomic load/store/fetch-add/fetch-and/fetch-or parameterized by a
//! *named consistency model* instead of raw hardware orderings, and an atomic
//! bitmap built entirely on top of them.
//!
//! ## Architecture
//!
//! Three layers, each depending only on the one below:
//!
//! 1. **Ordering core** ([`atomic`]): the five operations with an explicit
//!    [`Ordering`], over any [`AtomicScalar`].
//! 2. **Consistency models** ([`model`]): the same five operations taking a
//!    zero-sized model tag ([`SC`], [`RC`], [`XC`], or an
//!    [`Unsynchronized`] tag). The tag resolves to a load, store, and
//!    read-modify-write ordering at compile time.
//! 3. **Bitmap** ([`bitmap`]): get/set/clear and first/next bit scans over a
//!    caller-owned `&[A]` of atomic words.
//!
//! There is no error type and no allocation. Preconditions (index in range,
//! no concurrent use of `Unsynchronized`) are caller contracts; safe functions
//! enforce the memory-safety part by panicking on out-of-range words, and the
//! `*_unchecked` functions leave it to the caller.
//!
//! ## Example
//!
//! ```rust
//! use core::sync::atomic::AtomicUsize;
//! use atomic_ops::{bitmap, RC};
//!
//! let words: Vec<AtomicUsize> = (0..bitmap::word_count::<AtomicUsize>(200))
//!     .map(|_| AtomicUsize::new(0))
//!     .collect();
//!
//! assert!(!bitmap::set(&words, 3, RC));
//! assert!(bitmap::set(&words, 3, RC));
//! bitmap::set(&words, 150, RC);
//!
//! assert_eq!(bitmap::first(&words, 0, 200, RC), 3);
//! assert_eq!(bitmap::next(&words, 3, 200, RC), 150);
//! assert_eq!(bitmap::next(&words, 150, 200, RC), 200);
//!
//! let set: Vec<usize> = bitmap::iter_set(&words, 0, 200, RC).collect();
//! assert_eq!(set, [3, 150]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod atomic;
pub mod bitmap;
pub mod model;

pub use atomic::{AtomicScalar, Ordering};
pub use bitmap::{SetBits, BITMAP_WORD_BITS};
pub use model::{
    ConsistencyModel, MemoryModel, ParseModelError, Relaxed, Release, Sequential, Unsynchronized,
    RC, SC, XC,
};

// Compile-time layout assertions: tags are free to pass around.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<Sequential>() == 0);
    assert!(mem::size_of::<Release>() == 0);
    assert!(mem::size_of::<Relaxed>() == 0);
    assert!(mem::size_of::<Unsynchronized>() == 0);

    assert!(BITMAP_WORD_BITS.is_power_of_two());
    assert!(BITMAP_WORD_BITS == usize::BITS);
};
