//! ChainedMap: separate chaining with singly linked buckets.
//!
//! Nodes live in a generational arena (`SlotMap`) and link to their
//! successor by arena key; each bucket stores the key of its chain head.
//! Removal unlinks the node, so there are no tombstones and the load
//! ratio is simply `len / capacity`.

use crate::config::TableConfig;
use crate::error::{MapError, Result};
use crate::hasher::{KeyHasher, StringHasher};
use crate::string_map::StringMap;
use core::fmt;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

pub struct ChainedMap<V, S = StringHasher> {
    hasher: S,
    config: TableConfig,
    buckets: Vec<Option<DefaultKey>>, // chain heads
    nodes: SlotMap<DefaultKey, Node<V>>,
}

impl<V> ChainedMap<V> {
    /// Empty table with the default policy (8 buckets, load 0.9, growth 3).
    pub fn new() -> Self {
        Self::with_hasher(StringHasher)
    }

    /// Empty table with `capacity` buckets (0 is treated as 1).
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

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> ChainedMap<V, S>
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
            buckets: vec![None; config.initial_capacity],
            config,
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of live entries; every fresh key counts, whether it opened a
    /// new bucket or joined an existing chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `len / capacity`: the current fill. The resize check in `set` looks
    /// one entry ahead, at `(len + 1) / capacity`.
    pub fn occupancy(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn bucket_for(hasher: &S, key: &str, capacity: usize) -> usize {
        hasher.hash_key(key) as usize % capacity
    }

    fn bucket_index(&self, key: &str) -> usize {
        Self::bucket_for(&self.hasher, key, self.capacity())
    }

    fn find_node(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.bucket_index(key)];
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    fn tail_of(&self, head: DefaultKey) -> DefaultKey {
        let mut cur = head;
        while let Some(next) = self.nodes.get(cur).and_then(|n| n.next) {
            cur = next;
        }
        cur
    }

    /// Append an already-allocated node to the end of `bucket`'s chain.
    fn link_tail(&mut self, k: DefaultKey, bucket: usize) {
        match self.buckets[bucket] {
            None => self.buckets[bucket] = Some(k),
            Some(head) => {
                let tail = self.tail_of(head);
                if let Some(t) = self.nodes.get_mut(tail) {
                    t.next = Some(k);
                }
            }
        }
    }

    /// Insert `key`, replacing the value of an existing node in place, and
    /// return the previous value.
    ///
    /// Resizes first when `(len + 1) / capacity` would exceed the configured
    /// maximum load. Chains have no length limit, so when the grown bucket
    /// array cannot be sized or allocated the entry joins the current
    /// buckets instead.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if self.config.needs_resize(self.len(), self.capacity()) {
            if let Err(e) = self.resize() {
                log::warn!("chained: {e}; keeping {} buckets", self.capacity());
            }
        }
        if let Some(k) = self.find_node(&key) {
            if let Some(node) = self.nodes.get_mut(k) {
                return Some(mem::replace(&mut node.value, value));
            }
        }
        let bucket = self.bucket_index(&key);
        let k = self.nodes.insert(Node {
            key,
            value,
            next: None,
        });
        self.link_tail(k, bucket);
        None
    }

    /// Rebuild one growth step larger by walking each old chain in bucket
    /// order and relinking its nodes onto the tails of their new buckets.
    fn resize(&mut self) -> Result<()> {
        let fresh = self.config.grow_table(self.capacity(), || None)?;
        let capacity = fresh.len();
        let old = mem::replace(&mut self.buckets, fresh);
        log::debug!(
            "chained: resizing {} -> {} buckets ({} live)",
            old.len(),
            capacity,
            self.len()
        );
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let Some(node) = self.nodes.get_mut(k) else {
                    break;
                };
                cur = node.next.take();
                let bucket = Self::bucket_for(&self.hasher, &node.key, capacity);
                self.link_tail(k, bucket);
            }
        }
        Ok(())
    }

    pub fn try_get(&self, key: &str) -> Option<&V> {
        self.find_node(key)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
    }

    /// Fails with `KeyNotFound` whether the bucket is empty or its chain
    /// simply lacks `key`.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.try_get(key)
            .ok_or_else(|| MapError::key_not_found(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        let node = match self.find_node(key) {
            Some(k) => self.nodes.get_mut(k),
            None => None,
        };
        node.map(|n| &mut n.value)
            .ok_or_else(|| MapError::key_not_found(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    /// Unlink the node holding `key` from its chain and return its value.
    pub fn remove(&mut self, key: &str) -> Result<V> {
        let bucket = self.bucket_index(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[bucket];
        while let Some(k) = cur {
            let Some(node) = self.nodes.get(k) else {
                break;
            };
            if node.key == key {
                let next = node.next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => {
                        if let Some(p) = self.nodes.get_mut(p) {
                            p.next = next;
                        }
                    }
                }
                return self
                    .nodes
                    .remove(k)
                    .map(|n| n.value)
                    .ok_or_else(|| MapError::key_not_found(key));
            }
            prev = Some(k);
            cur = node.next;
        }
        Err(MapError::key_not_found(key))
    }

    /// Live entries, bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cur: None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Length of the longest chain.
    pub fn max_chain_len(&self) -> usize {
        self.buckets
            .iter()
            .map(|head| {
                let mut n = 0;
                let mut cur = *head;
                while let Some(node) = cur.and_then(|k| self.nodes.get(k)) {
                    n += 1;
                    cur = node.next;
                }
                n
            })
            .max()
            .unwrap_or(0)
    }
}

/// Iterator over live `(key, value)` pairs of a `ChainedMap`.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes: &'a SlotMap<DefaultKey, Node<V>> = self.nodes;
        loop {
            if let Some(node) = self.cur.and_then(|k| nodes.get(k)) {
                self.cur = node.next;
                return Some((node.key.as_str(), &node.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }
}

impl<V, S> StringMap<V> for ChainedMap<V, S>
where
    S: KeyHasher,
{
    fn set(&mut self, key: &str, value: V) -> Result<Option<V>> {
        Ok(ChainedMap::set(self, key, value))
    }

    fn get(&self, key: &str) -> Result<&V> {
        ChainedMap::get(self, key)
    }

    fn try_get(&self, key: &str) -> Option<&V> {
        ChainedMap::try_get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        ChainedMap::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Result<V> {
        ChainedMap::remove(self, key)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<V: fmt::Debug, S> fmt::Debug for ChainedMap<V, S>
where
    S: KeyHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
