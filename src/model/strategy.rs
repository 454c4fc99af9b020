//! `proptest` strategies for downstream property tests.

use proptest::prelude::*;

use super::ConsistencyModel;

/// Any of the four models.
pub fn any_model() -> impl Strategy<Value = ConsistencyModel> {
    prop::sample::select(ConsistencyModel::ALL.to_vec())
}

/// Any model that issues atomic instructions, safe to use across threads.
pub fn any_atomic_model() -> impl Strategy<Value = ConsistencyModel> {
    any_model().prop_filter("atomic models only", |m| m.is_atomic())
}
