//! Ordering core: the five atomic primitives, each taking an explicit
//! hardware [`Ordering`].
//!
//! This is the leaf layer. It adds nothing on top of the native atomic
//! instructions; it only gives every integer atomic one shared, generic call
//! surface ([`AtomicScalar`]) so the layers above can be written once.
//!
//! Important:
//! - Orderings that are invalid for an operation class (`Release` for a load,
//!   `Acquire` for a store) are caller misuse. The std atomics panic on them.
//! - Nothing here retries or loops. Every call is one hardware instruction.

/// The five explicit-ordering primitives.
pub mod ordering;
/// The `AtomicScalar` trait and its implementations.
pub mod scalar;

pub use core::sync::atomic::Ordering;
pub use ordering::{fetch_add, fetch_and, fetch_or, load, store};
pub use scalar::AtomicScalar;
