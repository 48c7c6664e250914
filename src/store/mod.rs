//! Persistence of aggregated counts between runs
//!
//! A [`CountStore`] maps package names to their [`crate::counts::CountData`] and is saved as a
//! single JSON document. Writers hold a [`StoreLockGuard`] across load, mutate and save so
//! every package keeps exactly one writer at a time.

mod count_store;
mod store_lock;

pub use count_store::CountStore;
pub use store_lock::{StoreLockGuard, acquire_store_lock};
