//! Consistency-model layer.
//!
//! A [`ConsistencyModel`] names a fixed triple of hardware orderings: one for
//! loads, one for stores, one for read-modify-writes. Operations in [`ops`]
//! take a zero-sized *tag* type implementing [`MemoryModel`] instead of a raw
//! [`Ordering`], so the model is resolved at compile time and the dispatch
//! costs nothing at runtime.
//!
//! | Model | load | store | read-modify-write |
//! |---|---|---|---|
//! | `SequentialConsistency` | `SeqCst` | `SeqCst` | `SeqCst` |
//! | `ReleaseConsistency` | `Acquire` | `Release` | `AcqRel` |
//! | `RelaxedConsistency` | `Relaxed` | `Relaxed` | `Relaxed` |
//! | `Unsynchronized` | plain read | plain write | plain read + write |
//!
//! `ReleaseConsistency` is the default: acquire-on-read/release-on-write lets
//! threads publish and observe single bits without paying for a global total
//! order.

use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;
use core::sync::atomic::Ordering;

use serde::{Deserialize, Serialize};

/// Model-parameterized load/store/fetch operations.
pub mod ops;

#[cfg(feature = "proptest")]
pub mod strategy;

pub use ops::{fetch_add, fetch_and, fetch_or, load, store};

/// One of the four named consistency models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyModel {
    /// Every access is `SeqCst`.
    SequentialConsistency,
    /// Acquire loads, release stores, acquire-release read-modify-writes.
    #[default]
    ReleaseConsistency,
    /// Every access is `Relaxed`.
    RelaxedConsistency,
    /// Plain, non-atomic accesses. Single-threaded or externally synchronized use only.
    Unsynchronized,
}

impl ConsistencyModel {
    /// All four models, strongest first.
    pub const ALL: [ConsistencyModel; 4] = [
        ConsistencyModel::SequentialConsistency,
        ConsistencyModel::ReleaseConsistency,
        ConsistencyModel::RelaxedConsistency,
        ConsistencyModel::Unsynchronized,
    ];

    /// Ordering used for loads.
    #[inline(always)]
    pub const fn load_order(self) -> Ordering {
        match self {
            ConsistencyModel::SequentialConsistency => Ordering::SeqCst,
            ConsistencyModel::ReleaseConsistency => Ordering::Acquire,
            ConsistencyModel::RelaxedConsistency | ConsistencyModel::Unsynchronized => {
                Ordering::Relaxed
            }
        }
    }

    /// Ordering used for stores.
    #[inline(always)]
    pub const fn store_order(self) -> Ordering {
        match self {
            ConsistencyModel::SequentialConsistency => Ordering::SeqCst,
            ConsistencyModel::ReleaseConsistency => Ordering::Release,
            ConsistencyModel::RelaxedConsistency | ConsistencyModel::Unsynchronized => {
                Ordering::Relaxed
            }
        }
    }

    /// Ordering used for read-modify-writes.
    #[inline(always)]
    pub const fn rmw_order(self) -> Ordering {
        match self {
            ConsistencyModel::SequentialConsistency => Ordering::SeqCst,
            ConsistencyModel::ReleaseConsistency => Ordering::AcqRel,
            ConsistencyModel::RelaxedConsistency | ConsistencyModel::Unsynchronized => {
                Ordering::Relaxed
            }
        }
    }

    /// Whether operations under this model issue atomic instructions.
    ///
    /// `false` only for [`ConsistencyModel::Unsynchronized`], whose reported
    /// orderings are `Relaxed`: the guarantee a plain access gives on a single
    /// thread.
    #[inline(always)]
    pub const fn is_atomic(self) -> bool {
        !matches!(self, ConsistencyModel::Unsynchronized)
    }

    /// The snake_case name, as used by `Display` and serde.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConsistencyModel::SequentialConsistency => "sequential_consistency",
            ConsistencyModel::ReleaseConsistency => "release_consistency",
            ConsistencyModel::RelaxedConsistency => "relaxed_consistency",
            ConsistencyModel::Unsynchronized => "unsynchronized",
        }
    }
}

impl fmt::Display for ConsistencyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no consistency model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModelError {
    input: String,
}

impl fmt::Display for ParseModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown consistency model `{}`", self.input)
    }
}

impl std::error::Error for ParseModelError {}

impl FromStr for ConsistencyModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential_consistency" | "seq_cst" | "sc" => Ok(ConsistencyModel::SequentialConsistency),
            "release_consistency" | "release" | "rc" => Ok(ConsistencyModel::ReleaseConsistency),
            "relaxed_consistency" | "relaxed" | "xc" => Ok(ConsistencyModel::RelaxedConsistency),
            "unsynchronized" | "unsync" => Ok(ConsistencyModel::Unsynchronized),
            _ => Err(ParseModelError {
                input: s.to_owned(),
            }),
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// A zero-sized tag selecting a [`ConsistencyModel`] at compile time.
///
/// Sealed: the four tag types below are the only implementors.
pub trait MemoryModel: private::Sealed + Copy {
    /// The model this tag selects.
    const MODEL: ConsistencyModel;

    /// Returns [`Self::MODEL`].
    #[inline(always)]
    fn model(self) -> ConsistencyModel {
        Self::MODEL
    }
}

/// Tag for [`ConsistencyModel::SequentialConsistency`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sequential;

/// Tag for [`ConsistencyModel::ReleaseConsistency`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Release;

/// Tag for [`ConsistencyModel::RelaxedConsistency`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Relaxed;

/// Tag for [`ConsistencyModel::Unsynchronized`].
///
/// Operations under this tag compile to plain loads and stores. The tag can
/// only be created with the `unsafe` [`Unsynchronized::new`], and is neither
/// `Send` nor `Sync`, so it stays on the thread that vouched for it.
#[derive(Clone, Copy, Debug)]
pub struct Unsynchronized {
    _not_send: PhantomData<*mut ()>,
}

impl Unsynchronized {
    /// Creates the tag.
    ///
    /// # Safety
    /// For as long as the tag (or any copy of it) is used, every location it
    /// is used with must not be accessed by any other thread, atomically or
    /// otherwise. Violating this is a data race.
    #[inline(always)]
    pub const unsafe fn new() -> Self {
        Self {
            _not_send: PhantomData,
        }
    }
}

/// [`Sequential`] tag value.
pub const SC: Sequential = Sequential;
/// [`Release`] tag value; the default model.
pub const RC: Release = Release;
/// [`Relaxed`] tag value.
pub const XC: Relaxed = Relaxed;

impl private::Sealed for Sequential {}
impl private::Sealed for Release {}
impl private::Sealed for Relaxed {}
impl private::Sealed for Unsynchronized {}

impl MemoryModel for Sequential {
    const MODEL: ConsistencyModel = ConsistencyModel::SequentialConsistency;
}

impl MemoryModel for Release {
    const MODEL: ConsistencyModel = ConsistencyModel::ReleaseConsistency;
}

impl MemoryModel for Relaxed {
    const MODEL: ConsistencyModel = ConsistencyModel::RelaxedConsistency;
}

impl MemoryModel for Unsynchronized {
    const MODEL: ConsistencyModel = ConsistencyModel::Unsynchronized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_table() {
        use ConsistencyModel as M;
        let table = [
            (M::SequentialConsistency, Ordering::SeqCst, Ordering::SeqCst, Ordering::SeqCst),
            (M::ReleaseConsistency, Ordering::Acquire, Ordering::Release, Ordering::AcqRel),
            (M::RelaxedConsistency, Ordering::Relaxed, Ordering::Relaxed, Ordering::Relaxed),
            (M::Unsynchronized, Ordering::Relaxed, Ordering::Relaxed, Ordering::Relaxed),
        ];
        for (model, load, store, rmw) in table {
            assert_eq!(model.load_order(), load, "{model}");
            assert_eq!(model.store_order(), store, "{model}");
            assert_eq!(model.rmw_order(), rmw, "{model}");
        }
    }

    #[test]
    fn only_unsynchronized_skips_atomics() {
        for model in ConsistencyModel::ALL {
            assert_eq!(model.is_atomic(), model != ConsistencyModel::Unsynchronized);
        }
    }

    #[test]
    fn tags_map_to_models() {
        assert_eq!(SC.model(), ConsistencyModel::SequentialConsistency);
        assert_eq!(RC.model(), ConsistencyModel::default());
        assert_eq!(XC.model(), ConsistencyModel::RelaxedConsistency);
        // SAFETY: the tag is never used with a location.
        let unsync = unsafe { Unsynchronized::new() };
        assert_eq!(unsync.model(), ConsistencyModel::Unsynchronized);
    }
}
