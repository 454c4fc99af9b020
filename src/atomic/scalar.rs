use core::fmt::Debug;
use core::sync::atomic::Ordering;

use num_traits::{PrimInt, WrappingAdd};

/// A memory location of primitive integer type that supports the atomic
/// operations of the ordering core.
///
/// Implemented for every integer atomic in `core::sync::atomic` the target
/// supports (and for loom's atomics under `cfg(loom)`).
pub trait AtomicScalar: Sync {
    /// The plain integer stored in the location.
    type Value: PrimInt + WrappingAdd + Debug;

    /// Width of `Value` in bits.
    const BITS: u32;

    /// Atomic read.
    fn load(&self, order: Ordering) -> Self::Value;

    /// Atomic write.
    fn store(&self, value: Self::Value, order: Ordering);

    /// Wrapping add, returning the previous value.
    fn fetch_add(&self, value: Self::Value, order: Ordering) -> Self::Value;

    /// Bitwise AND, returning the previous value.
    fn fetch_and(&self, value: Self::Value, order: Ordering) -> Self::Value;

    /// Bitwise OR, returning the previous value.
    fn fetch_or(&self, value: Self::Value, order: Ordering) -> Self::Value;

    /// Plain, non-atomic read of the location.
    ///
    /// # Safety
    /// No other thread may access the location for the duration of the call.
    unsafe fn load_unsync(&self) -> Self::Value;

    /// Plain, non-atomic write of the location.
    ///
    /// # Safety
    /// No other thread may access the location for the duration of the call.
    unsafe fn store_unsync(&self, value: Self::Value);
}

macro_rules! impl_atomic_scalar {
    ($($(#[$cfg:meta])* $atomic:ty => $value:ty),* $(,)?) => {$(
        $(#[$cfg])*
        impl AtomicScalar for $atomic {
            type Value = $value;

            const BITS: u32 = <$value>::BITS;

            #[inline(always)]
            fn load(&self, order: Ordering) -> $value {
                <$atomic>::load(self, order)
            }

            #[inline(always)]
            fn store(&self, value: $value, order: Ordering) {
                <$atomic>::store(self, value, order);
            }

            #[inline(always)]
            fn fetch_add(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_add(self, value, order)
            }

            #[inline(always)]
            fn fetch_and(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_and(self, value, order)
            }

            #[inline(always)]
            fn fetch_or(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_or(self, value, order)
            }

            #[inline(always)]
            unsafe fn load_unsync(&self) -> $value {
                // SAFETY: the caller guarantees exclusive access, so this read
                // cannot race with any other access to the location.
                unsafe { self.as_ptr().read() }
            }

            #[inline(always)]
            unsafe fn store_unsync(&self, value: $value) {
                // SAFETY: as for `load_unsync`.
                unsafe { self.as_ptr().write(value) }
            }
        }
    )*};
}

impl_atomic_scalar! {
    #[cfg(target_has_atomic = "8")] core::sync::atomic::AtomicU8 => u8,
    #[cfg(target_has_atomic = "16")] core::sync::atomic::AtomicU16 => u16,
    #[cfg(target_has_atomic = "32")] core::sync::atomic::AtomicU32 => u32,
    #[cfg(target_has_atomic = "64")] core::sync::atomic::AtomicU64 => u64,
    #[cfg(target_has_atomic = "ptr")] core::sync::atomic::AtomicUsize => usize,
    #[cfg(target_has_atomic = "8")] core::sync::atomic::AtomicI8 => i8,
    #[cfg(target_has_atomic = "16")] core::sync::atomic::AtomicI16 => i16,
    #[cfg(target_has_atomic = "32")] core::sync::atomic::AtomicI32 => i32,
    #[cfg(target_has_atomic = "64")] core::sync::atomic::AtomicI64 => i64,
    #[cfg(target_has_atomic = "ptr")] core::sync::atomic::AtomicIsize => isize,
}

// Loom tracks every access it can see. It has no plain store through a shared
// reference, so `store_unsync` falls back to a relaxed store there.
#[cfg(loom)]
macro_rules! impl_loom_scalar {
    ($($atomic:ty => $value:ty),* $(,)?) => {$(
        impl AtomicScalar for $atomic {
            type Value = $value;

            const BITS: u32 = <$value>::BITS;

            fn load(&self, order: Ordering) -> $value {
                <$atomic>::load(self, order)
            }

            fn store(&self, value: $value, order: Ordering) {
                <$atomic>::store(self, value, order);
            }

            fn fetch_add(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_add(self, value, order)
            }

            fn fetch_and(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_and(self, value, order)
            }

            fn fetch_or(&self, value: $value, order: Ordering) -> $value {
                <$atomic>::fetch_or(self, value, order)
            }

            unsafe fn load_unsync(&self) -> $value {
                // SAFETY: forwarded caller contract.
                unsafe { <$atomic>::unsync_load(self) }
            }

            unsafe fn store_unsync(&self, value: $value) {
                <$atomic>::store(self, value, Ordering::Relaxed);
            }
        }
    )*};
}

#[cfg(loom)]
impl_loom_scalar! {
    loom::sync::atomic::AtomicU8 => u8,
    loom::sync::atomic::AtomicU16 => u16,
    loom::sync::atomic::AtomicU32 => u32,
    loom::sync::atomic::AtomicU64 => u64,
    loom::sync::atomic::AtomicUsize => usize,
}
