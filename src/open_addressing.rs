//! OpenAddressingMap: linear probing over a flat slot array with lazy
//! (tombstone) deletion.
//!
//! Removal never shifts a probe chain; it turns the slot into a
//! tombstone that later probes step over. Tombstones count toward the
//! load ratio, so a table that churns keys eventually resizes, and the
//! resize drops every tombstone.

use crate::config::TableConfig;
use crate::error::{MapError, Result};
use crate::hasher::{KeyHasher, StringHasher};
use crate::string_map::StringMap;
use core::fmt;
use core::mem;

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
}

#[derive(Debug)]
enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    Tombstone,
}

impl<V> Slot<V> {
    fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied(e) => Some(&e.value),
            _ => None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(e) => Some(&mut e.value),
            _ => None,
        }
    }

    fn into_value(self) -> Option<V> {
        match self {
            Slot::Occupied(e) => Some(e.value),
            _ => None,
        }
    }
}

/// Outcome of a linear probe for one key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Probe {
    /// First never-occupied slot on the key's chain.
    Vacant(usize),
    /// Live entry holding the key.
    Found(usize),
    /// Every slot was scanned without reaching either of the above.
    Exhausted,
}

pub struct OpenAddressingMap<V, S = StringHasher> {
    hasher: S,
    config: TableConfig,
    slots: Vec<Slot<V>>,
    len: usize,
    deleted: usize, // tombstones currently in `slots`
}

impl<V> OpenAddressingMap<V> {
    /// Empty table with the default policy (8 slots, load 0.9, growth 3).
    pub fn new() -> Self {
        Self::with_hasher(StringHasher)
    }

    /// Empty table with `capacity` slots (0 is treated as 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(
            TableConfig::default().with_initial_capacity(capacity),
            StringHasher,
        )
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, StringHasher)
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> OpenAddressingMap<V, S>
where
    S: KeyHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        Ok(Self::from_parts(config.checked()?, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            slots: empty_slots(config.initial_capacity),
            config,
            len: 0,
            deleted: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of tombstoned slots.
    pub fn deleted(&self) -> usize {
        self.deleted
    }

    /// `(len + deleted) / capacity`: the share of slots no longer empty.
    ///
    /// This is the current fill. The resize check in `set` looks one entry
    /// ahead, at `(len + deleted + 1) / capacity`.
    pub fn occupancy(&self) -> f64 {
        (self.len + self.deleted) as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn probe(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let start = self.hasher.hash_key(key) as usize % capacity;
        for step in 0..capacity {
            let i = (start + step) % capacity;
            match &self.slots[i] {
                Slot::Empty => return Probe::Vacant(i),
                Slot::Occupied(e) if e.key == key => return Probe::Found(i),
                // Tombstones and other keys: keep walking the chain.
                _ => {}
            }
        }
        Probe::Exhausted
    }

    /// Insert `key`, overwriting any live entry for it, and return the
    /// previous value.
    ///
    /// Resizes first when `(len + deleted + 1) / capacity` would exceed the
    /// configured maximum load. Fails with `TableFull` only when the policy
    /// allows a load above 1.0 and the probe finds no usable slot, and with
    /// `CapacityOverflow` when a required resize cannot be sized or
    /// allocated (the table is left as it was).
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let key = key.into();
        if self
            .config
            .needs_resize(self.len + self.deleted, self.capacity())
        {
            self.resize()?;
        }
        self.insert_entry(Entry { key, value })
    }

    fn insert_entry(&mut self, entry: Entry<V>) -> Result<Option<V>> {
        match self.probe(&entry.key) {
            Probe::Found(i) => {
                let prev = mem::replace(&mut self.slots[i], Slot::Occupied(entry));
                Ok(prev.into_value())
            }
            Probe::Vacant(i) => {
                self.slots[i] = Slot::Occupied(entry);
                self.len += 1;
                Ok(None)
            }
            Probe::Exhausted => {
                log::trace!(
                    "open addressing: no slot for {:?} among {} slots ({} tombstones)",
                    entry.key,
                    self.capacity(),
                    self.deleted
                );
                Err(MapError::TableFull {
                    capacity: self.capacity(),
                })
            }
        }
    }

    /// Rebuild one growth step larger, re-inserting live entries in slot
    /// order.
    fn resize(&mut self) -> Result<()> {
        let fresh = self.config.grow_table(self.capacity(), || Slot::Empty)?;
        let capacity = fresh.len();
        let old = mem::replace(&mut self.slots, fresh);
        log::debug!(
            "open addressing: resizing {} -> {} slots ({} live, {} tombstones dropped)",
            old.len(),
            capacity,
            self.len,
            self.deleted
        );
        self.len = 0;
        self.deleted = 0;
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                self.insert_entry(entry)?;
            }
        }
        Ok(())
    }

    pub fn try_get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(i) => self.slots[i].value(),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn get(&self, key: &str) -> Result<&V> {
        self.try_get(key)
            .ok_or_else(|| MapError::key_not_found(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        let value = match self.probe(key) {
            Probe::Found(i) => self.slots[i].value_mut(),
            Probe::Vacant(_) | Probe::Exhausted => None,
        };
        value.ok_or_else(|| MapError::key_not_found(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Tombstone the slot holding `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Result<V> {
        let removed = match self.probe(key) {
            Probe::Found(i) => mem::replace(&mut self.slots[i], Slot::Tombstone).into_value(),
            Probe::Vacant(_) | Probe::Exhausted => None,
        };
        let value = removed.ok_or_else(|| MapError::key_not_found(key))?;
        self.len -= 1;
        self.deleted += 1;
        Ok(value)
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty)
        .take(capacity)
        .collect()
}

/// Iterator over live `(key, value)` pairs of an `OpenAddressingMap`.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|slot| match slot {
            Slot::Occupied(e) => Some((e.key.as_str(), &e.value)),
            _ => None,
        })
    }
}

impl<V, S> StringMap<V> for OpenAddressingMap<V, S>
where
    S: KeyHasher,
{
    fn set(&mut self, key: &str, value: V) -> Result<Option<V>> {
        OpenAddressingMap::set(self, key, value)
    }

    fn get(&self, key: &str) -> Result<&V> {
        OpenAddressingMap::get(self, key)
    }

    fn try_get(&self, key: &str) -> Option<&V> {
        OpenAddressingMap::try_get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        OpenAddressingMap::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Result<V> {
        OpenAddressingMap::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<V: fmt::Debug, S> fmt::Debug for OpenAddressingMap<V, S>
where
    S: KeyHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
