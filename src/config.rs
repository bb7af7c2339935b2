//! Per-instance resize policy.

use crate::error::{MapError, Result};

/// Starting slot/bucket count used by `new()`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
/// Resize when `(len + deleted + 1) / capacity` exceeds this.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.9;
/// New capacity is the old capacity times this.
pub const DEFAULT_GROWTH_FACTOR: usize = 3;

/// Capacity and resize policy for a table.
///
/// Built with the setters below and checked by [`TableConfig::validate`]
/// when a table is constructed from it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub growth_factor: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is clamped to 1.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    pub fn with_max_load_factor(mut self, load: f64) -> Self {
        self.max_load_factor = load;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(MapError::InvalidConfig {
                reason: "max_load_factor must be finite and positive",
            });
        }
        if self.growth_factor < 2 {
            return Err(MapError::InvalidConfig {
                reason: "growth_factor must be at least 2",
            });
        }
        Ok(())
    }

    /// Validated copy with the capacity clamp applied.
    pub(crate) fn checked(self) -> Result<Self> {
        self.validate()?;
        Ok(self.with_initial_capacity(self.initial_capacity))
    }

    /// Whether placing one more entry on top of `occupied` slots needs a
    /// resize first.
    #[inline]
    pub(crate) fn needs_resize(&self, occupied: usize, capacity: usize) -> bool {
        (occupied + 1) as f64 / capacity as f64 > self.max_load_factor
    }

    /// Allocate the next generation of a `capacity`-entry table, filled
    /// with `fill()`. Fails with `CapacityOverflow` when the grown size
    /// overflows `usize` or the allocator refuses it; the caller's table is
    /// untouched either way.
    pub(crate) fn grow_table<T>(
        &self,
        capacity: usize,
        fill: impl FnMut() -> T,
    ) -> Result<Vec<T>> {
        let overflow = || MapError::CapacityOverflow {
            capacity,
            growth_factor: self.growth_factor,
        };
        let grown = capacity
            .checked_mul(self.growth_factor)
            .ok_or_else(overflow)?;
        let mut table = Vec::new();
        table.try_reserve_exact(grown).map_err(|_| overflow())?;
        table.extend(std::iter::repeat_with(fill).take(grown));
        Ok(table)
    }
}
