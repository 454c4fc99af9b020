use core::sync::atomic::Ordering;

use super::AtomicScalar;

/// Atomically reads `loc`.
///
/// # Panics
/// Panics if `order` is `Release` or `AcqRel`.
#[inline(always)]
pub fn load<A: AtomicScalar>(loc: &A, order: Ordering) -> A::Value {
    loc.load(order)
}

/// Atomically writes `value` to `loc`.
///
/// # Panics
/// Panics if `order` is `Acquire` or `AcqRel`.
#[inline(always)]
pub fn store<A: AtomicScalar>(loc: &A, value: A::Value, order: Ordering) {
    loc.store(value, order);
}

/// Atomically adds `operand` to `loc` (wrapping), returning the previous value.
#[inline(always)]
pub fn fetch_add<A: AtomicScalar>(loc: &A, operand: A::Value, order: Ordering) -> A::Value {
    loc.fetch_add(operand, order)
}

/// Atomically ANDs `operand` into `loc`, returning the previous value.
#[inline(always)]
pub fn fetch_and<A: AtomicScalar>(loc: &A, operand: A::Value, order: Ordering) -> A::Value {
    loc.fetch_and(operand, order)
}

/// Atomically ORs `operand` into `loc`, returning the previous value.
#[inline(always)]
pub fn fetch_or<A: AtomicScalar>(loc: &A, operand: A::Value, order: Ordering) -> A::Value {
    loc.fetch_or(operand, order)
}
