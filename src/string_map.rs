//! The operations both table strategies share.

use crate::error::Result;

/// A string-keyed map; implemented by [`OpenAddressingMap`] and
/// [`ChainedMap`] so callers can be written once against either strategy.
///
/// [`OpenAddressingMap`]: crate::OpenAddressingMap
/// [`ChainedMap`]: crate::ChainedMap
pub trait StringMap<V> {
    /// Insert or overwrite; returns the value previously stored under `key`.
    fn set(&mut self, key: &str, value: V) -> Result<Option<V>>;

    /// Fails with `KeyNotFound` when `key` has no live entry.
    fn get(&self, key: &str) -> Result<&V>;

    /// Non-failing lookup for existence checks.
    fn try_get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Result<&mut V>;

    /// Fails with `KeyNotFound` when `key` has no live entry.
    fn remove(&mut self, key: &str) -> Result<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
