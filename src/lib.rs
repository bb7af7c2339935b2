//! strtable: string-keyed hash tables built from first principles, with
//! two collision-resolution strategies behind one contract.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: expose the mechanics of a hash table (slot indexing,
//!   collision resolution, resize policy, deletion) in two small,
//!   independently verifiable containers.
//! - Layers:
//!   - `StringHasher`: DJB2 over UTF-16 code units, wrapping at 32 bits.
//!     Both tables take any `KeyHasher`; this is the default.
//!   - `TableConfig`: initial capacity, maximum load factor (0.9) and
//!     growth factor (3), held per instance.
//!   - `OpenAddressingMap<V, S>`: flat slot array, linear probing,
//!     tombstone deletion.
//!   - `ChainedMap<V, S>`: bucket array of singly linked chains whose nodes
//!     live in a generational arena.
//!   - `StringMap<V>`: the shared `set`/`get`/`try_get`/`remove`/`len`
//!     contract; the `text` helpers are written against it.
//!
//! Resize policy
//! - Before every `set`, both tables compute
//!   `(len + tombstones + 1) / capacity` and, if it exceeds the maximum
//!   load, rebuild at `capacity * growth_factor` before placing the entry.
//!   A fresh table of 8 therefore holds seven entries and grows to 24 on
//!   the eighth.
//! - A rebuild re-inserts every live entry in storage order. Tombstones
//!   are dropped; chained nodes are relinked rather than reallocated.
//!
//! Deletion
//! - Open addressing marks the slot `Tombstone`. Probes step over
//!   tombstones, so later entries on the same chain stay reachable, and
//!   tombstones keep counting toward load until the next rebuild.
//! - Chaining unlinks the matching node from its bucket's list.
//!
//! Errors
//! - `MapError::KeyNotFound` from `get`/`get_mut`/`remove` when a key has
//!   no live entry, for both strategies.
//! - `MapError::TableFull` when an open-addressing insert scans every slot
//!   without finding an empty or matching one. The default policy cannot
//!   reach it; a policy that allows load above 1.0 can.
//! - `MapError::InvalidConfig` from constructors given a bad policy.
//!
//! Notes and non-goals
//! - Single-threaded. Mutation takes `&mut self`; sharing a table across
//!   threads needs an outer lock around the whole table.
//! - Keys are `String`s; no generic key types.
//! - Iteration order is storage order (slots, or buckets then chains) and
//!   changes across rebuilds.
//! - Resize events are logged at `debug` through the `log` facade; no
//!   logger is installed by the crate.

pub mod chained;
pub mod config;
pub mod error;
pub mod hasher;
mod map_proptest;
pub mod open_addressing;
pub mod string_map;
pub mod text;

// Public surface
pub use chained::ChainedMap;
pub use config::TableConfig;
pub use error::{MapError, Result};
pub use hasher::{KeyHasher, StringHasher};
pub use open_addressing::OpenAddressingMap;
pub use string_map::StringMap;
