// ChainedMap integration suite.
//
// The core invariants exercised:
// - Overwrite: `set` on an existing key replaces the node's value in place.
// - Accounting: every fresh key increments len, including appends to an
//   already-populated bucket.
// - Absence: missing bucket and missing node both fail with KeyNotFound.
// - Unlinking: remove detaches exactly the matching node.
use strtable::{ChainedMap, KeyHasher, MapError, TableConfig};

struct Buckets2;
impl KeyHasher for Buckets2 {
    // Even-length keys to bucket 0, odd-length keys to bucket 1 (mod 8).
    fn hash_key(&self, key: &str) -> u32 {
        (key.len() % 2) as u32
    }
}

// Test: the Middle-earth walkthrough (eleven sets, two overwrites).
// Assumes: default policy.
// Verifies: overwrites and final lookups; len counts all nine keys.
#[test]
fn middle_earth_walkthrough() {
    let mut m = ChainedMap::new();
    for (k, v) in [
        ("Hobbit", "Bilbo"),
        ("Hobbit", "Frodo"),
        ("Wizard", "Gandolf"),
        ("Human", "Aragon"),
        ("Elf", "Legolas"),
        ("Maiar", "The Necromancer"),
        ("Maiar", "Sauron"),
        ("RingBearer", "Gollum"),
        ("LadyOfLight", "Galadriel"),
        ("HalfElven", "Arwen"),
        ("Ent", "Treebeard"),
    ] {
        m.set(k, v);
    }
    assert_eq!(m.len(), 9);
    assert_eq!(m.capacity(), 24);
    assert_eq!(m.get("Maiar"), Ok(&"Sauron"));
    assert_eq!(m.get("Hobbit"), Ok(&"Frodo"));
}

// Test: bucket-then-chain iteration order.
// Assumes: the two-bucket hasher above.
// Verifies: bucket 0's chain comes first, each chain in insertion order.
#[test]
fn iteration_order_is_bucket_then_chain() {
    let mut m = ChainedMap::with_hasher(Buckets2);
    for k in ["abc", "ab", "a", "abcd"] {
        m.set(k, k.len());
    }
    assert_eq!(m.len(), 4);
    assert_eq!(m.max_chain_len(), 2);
    assert_eq!(m.keys().collect::<Vec<_>>(), ["ab", "abcd", "abc", "a"]);
}

// Test: KeyNotFound in both shapes of miss.
// Assumes: the two-bucket hasher; bucket 1 populated, bucket 0 empty.
// Verifies: empty bucket and populated-but-non-matching bucket both fail.
#[test]
fn misses_fail_uniformly() {
    let mut m = ChainedMap::with_hasher(Buckets2);
    m.set("odd", 1);
    assert!(matches!(m.get("even"), Err(MapError::KeyNotFound { .. })));
    assert!(matches!(m.get("xyz"), Err(MapError::KeyNotFound { .. })));
    assert!(matches!(m.remove("even"), Err(MapError::KeyNotFound { .. })));
    assert!(matches!(m.remove("xyz"), Err(MapError::KeyNotFound { .. })));
    assert_eq!(m.len(), 1);
}

// Test: remove/get/len contract.
// Verifies: len drops by exactly one, the key is gone, neighbors in the
// same chain are unaffected.
#[test]
fn remove_contract() {
    let mut m = ChainedMap::with_hasher(Buckets2);
    m.set("a", 1);
    m.set("b", 2);
    m.set("c", 3);
    let before = m.len();
    assert_eq!(m.remove("b"), Ok(2));
    assert_eq!(m.len(), before - 1);
    assert!(m.get("b").is_err());
    assert_eq!(m.get("a"), Ok(&1));
    assert_eq!(m.get("c"), Ok(&3));
}

// Test: growth sequence matches the open-addressing policy.
// Verifies: 8 -> 24 on the 8th fresh key, 24 -> 72 on the 22nd, and every
// pair survives both rebuilds.
#[test]
fn growth_sequence() {
    let mut m = ChainedMap::new();
    let mut capacities = Vec::new();
    for i in 0..30 {
        m.set(format!("key-{i}"), i);
        capacities.push(m.capacity());
    }
    assert_eq!(&capacities[..7], &[8; 7]);
    assert_eq!(capacities[7], 24);
    assert_eq!(capacities[20], 24);
    assert_eq!(capacities[21], 72);
    for i in 0..30 {
        assert_eq!(m.get(&format!("key-{i}")), Ok(&i));
    }
}

// Test: chaining tolerates load above 1.0 when configured.
// Verifies: a single bucket holds many entries without resizing.
#[test]
fn overloaded_single_bucket() {
    let config = TableConfig::new()
        .with_initial_capacity(1)
        .with_max_load_factor(100.0);
    let mut m = ChainedMap::with_config(config).unwrap();
    for i in 0..50 {
        m.set(i.to_string(), i);
    }
    assert_eq!(m.capacity(), 1);
    assert_eq!(m.max_chain_len(), 50);
    assert_eq!(m.get("49"), Ok(&49));
}
