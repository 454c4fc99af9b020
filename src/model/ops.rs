//! The ordering-core operations, parameterized by a [`MemoryModel`] tag.
//!
//! Each function branches on `M::MODEL`, an associated constant, so only one
//! arm survives monomorphization. Atomic models route to the ordering core
//! with the model's ordering for the operation class; [`Unsynchronized`]
//! performs a plain read, write, or read-compute-write.
//!
//! [`Unsynchronized`]: super::Unsynchronized

use num_traits::WrappingAdd;

use super::MemoryModel;
use crate::atomic::{self, AtomicScalar};

/// Reads `loc` under model `M`.
#[inline(always)]
pub fn load<A: AtomicScalar, M: MemoryModel>(loc: &A, _model: M) -> A::Value {
    if M::MODEL.is_atomic() {
        atomic::load(loc, M::MODEL.load_order())
    } else {
        // SAFETY: only the `Unsynchronized` tag reaches this arm, and its
        // constructor's caller vouched that no other thread touches `loc`.
        unsafe { loc.load_unsync() }
    }
}

/// Writes `value` to `loc` under model `M`.
#[inline(always)]
pub fn store<A: AtomicScalar, M: MemoryModel>(loc: &A, value: A::Value, _model: M) {
    if M::MODEL.is_atomic() {
        atomic::store(loc, value, M::MODEL.store_order());
    } else {
        // SAFETY: see `load`.
        unsafe { loc.store_unsync(value) }
    }
}

/// Adds `operand` to `loc` (wrapping) under model `M`, returning the previous value.
#[inline(always)]
pub fn fetch_add<A: AtomicScalar, M: MemoryModel>(loc: &A, operand: A::Value, _model: M) -> A::Value {
    if M::MODEL.is_atomic() {
        atomic::fetch_add(loc, operand, M::MODEL.rmw_order())
    } else {
        // SAFETY: see `load`.
        unsafe { read_modify_write(loc, |old| old.wrapping_add(&operand)) }
    }
}

/// ANDs `operand` into `loc` under model `M`, returning the previous value.
#[inline(always)]
pub fn fetch_and<A: AtomicScalar, M: MemoryModel>(loc: &A, operand: A::Value, _model: M) -> A::Value {
    if M::MODEL.is_atomic() {
        atomic::fetch_and(loc, operand, M::MODEL.rmw_order())
    } else {
        // SAFETY: see `load`.
        unsafe { read_modify_write(loc, |old| old & operand) }
    }
}

/// ORs `operand` into `loc` under model `M`, returning the previous value.
#[inline(always)]
pub fn fetch_or<A: AtomicScalar, M: MemoryModel>(loc: &A, operand: A::Value, _model: M) -> A::Value {
    if M::MODEL.is_atomic() {
        atomic::fetch_or(loc, operand, M::MODEL.rmw_order())
    } else {
        // SAFETY: see `load`.
        unsafe { read_modify_write(loc, |old| old | operand) }
    }
}

/// # Safety
/// No other thread may access `loc` during the call.
#[inline(always)]
unsafe fn read_modify_write<A, F>(loc: &A, f: F) -> A::Value
where
    A: AtomicScalar,
    F: FnOnce(A::Value) -> A::Value,
{
    // SAFETY: forwarded caller contract.
    unsafe {
        let old = loc.load_unsync();
        loc.store_unsync(f(old));
        old
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Unsynchronized, RC, SC, XC};
    use core::sync::atomic::{AtomicU32, AtomicU8};

    #[test]
    fn unsynchronized_is_plain_read_compute_write() {
        // SAFETY: `a` never leaves this thread.
        let unsync = unsafe { Unsynchronized::new() };
        let a = AtomicU8::new(250);
        assert_eq!(fetch_add(&a, 10, unsync), 250);
        assert_eq!(load(&a, unsync), 4);
        store(&a, 0b1010, unsync);
        assert_eq!(fetch_or(&a, 0b0101, unsync), 0b1010);
        assert_eq!(fetch_and(&a, 0b0011, unsync), 0b1111);
        assert_eq!(load(&a, unsync), 0b0011);
    }

    #[test]
    fn atomic_models_agree_single_threaded() {
        let a = AtomicU32::new(7);
        assert_eq!(fetch_add(&a, 3, SC), 7);
        assert_eq!(fetch_or(&a, 0x100, RC), 10);
        assert_eq!(fetch_and(&a, 0xff, XC), 0x10a);
        assert_eq!(load(&a, RC), 10);
    }
}
