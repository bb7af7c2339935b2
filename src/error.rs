//! Error kinds shared by both table strategies.

use thiserror::Error;

/// Failures reported by [`OpenAddressingMap`](crate::OpenAddressingMap) and
/// [`ChainedMap`](crate::ChainedMap).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The key has no live entry.
    #[error("key not found: {key:?}")]
    KeyNotFound {
        /// The key that was looked up
        key: String,
    },

    /// A full probe scan found neither an empty nor a matching slot.
    #[error("table full: probed all {capacity} slots")]
    TableFull {
        /// Slot count at the time of the failed probe
        capacity: usize,
    },

    /// The next resize step cannot be represented or allocated.
    #[error("cannot grow a {capacity}-slot table by a factor of {growth_factor}")]
    CapacityOverflow {
        /// Slot or bucket count before the attempted resize
        capacity: usize,
        /// Configured growth factor
        growth_factor: usize,
    },

    /// A `TableConfig` was rejected by validation.
    #[error("invalid table configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },
}

impl MapError {
    pub(crate) fn key_not_found(key: &str) -> Self {
        MapError::KeyNotFound {
            key: key.to_owned(),
        }
    }

    /// True for [`MapError::KeyNotFound`]; the usual "does this key exist"
    /// recovery path.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, MapError::KeyNotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MapError>;
