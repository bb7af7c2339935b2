#![cfg(test)]

// Property tests for both table strategies kept inside the crate so they
// can reach the load/tombstone accessors alongside the shared contract.

use crate::chained::ChainedMap;
use crate::error::MapError;
use crate::hasher::KeyHasher;
use crate::open_addressing::OpenAddressingMap;
use crate::string_map::StringMap;
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeSet;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Remove(usize),
    Mutate(usize, i32),
    TryGet(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let probe_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            1 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => prop_oneof![probe_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::TryGet),
        ];
        proptest::collection::vec(op, 1..150).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives `sut` and a hashbrown model through the same operations.
// Invariants exercised after every step:
// - `get` returns the most recent `set` value; absent keys fail with KeyNotFound.
// - `remove` returns the stored value and the key is then absent; `len` drops by 1.
// - `try_get` agrees with `get`; `len`/`is_empty` match the model.
// - `load_ok` holds (the table never sits above its maximum load).
fn run_state_machine<M, F>(
    mut sut: M,
    pool: &[String],
    ops: Vec<OpI>,
    load_ok: F,
) -> Result<(), TestCaseError>
where
    M: StringMap<i32>,
    F: Fn(&M) -> bool,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let prev = sut.set(k, v).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                match model.get(k) {
                    Some(v) => prop_assert_eq!(sut.get(k), Ok(v)),
                    None => prop_assert!(sut.get(k).unwrap_err().is_key_not_found()),
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                match model.remove(k) {
                    Some(v) => {
                        prop_assert_eq!(sut.remove(k), Ok(v));
                        prop_assert_eq!(sut.len(), before - 1);
                        prop_assert!(sut.get(k).is_err());
                    }
                    None => {
                        let err = sut.remove(k).unwrap_err();
                        prop_assert!(
                            matches!(err, MapError::KeyNotFound { .. }),
                            "unexpected error {:?}",
                            err
                        );
                        prop_assert_eq!(sut.len(), before);
                    }
                }
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Ok(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (Err(e), None) => prop_assert!(e.is_key_not_found()),
                    (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::TryGet(s) => {
                prop_assert_eq!(sut.try_get(&s), model.get(&s));
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(load_ok(&sut), "table above its maximum load");
    }

    // Every surviving key still resolves after however many rebuilds ran.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Ok(v));
    }
    Ok(())
}

#[derive(Copy, Clone, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn hash_key(&self, _key: &str) -> u32 {
        0
    }
}

fn open_load_ok<S: KeyHasher>(m: &OpenAddressingMap<i32, S>) -> bool {
    m.occupancy() <= m.config().max_load_factor
}

fn chained_load_ok<S: KeyHasher>(m: &ChainedMap<i32, S>) -> bool {
    m.occupancy() <= m.config().max_load_factor
}

// Property: state-machine equivalence against hashbrown::HashMap for both
// strategies, with the default DJB2 hasher.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_open_addressing_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(OpenAddressingMap::new(), &pool, ops, open_load_ok)?;
    }

    #[test]
    fn prop_chained_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedMap::new(), &pool, ops, chained_load_ok)?;
    }
}

// Property: the same invariants under worst-case collisions (constant
// hasher). Every key shares one probe chain / one bucket, which stresses
// tombstone skipping and mid-chain unlinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_open_addressing_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(OpenAddressingMap::with_hasher(ConstHasher), &pool, ops, open_load_ok)?;
    }

    #[test]
    fn prop_chained_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedMap::with_hasher(ConstHasher), &pool, ops, chained_load_ok)?;
    }
}

// Property: iteration yields each live key exactly once, and the
// open-addressing counters satisfy `len + deleted <= capacity`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_iteration_matches_live_keys(
        keys in proptest::collection::vec("[a-z]{1,4}", 0..60),
        removals in proptest::collection::vec(any::<prop::sample::Index>(), 0..30),
    ) {
        let mut open = OpenAddressingMap::new();
        let mut chained = ChainedMap::new();
        let mut live: BTreeSet<String> = BTreeSet::new();
        for (i, k) in keys.iter().enumerate() {
            open.set(k.as_str(), i as i32).unwrap();
            chained.set(k.as_str(), i as i32);
            live.insert(k.clone());
        }
        if !keys.is_empty() {
            for ix in removals {
                let k = ix.get(&keys);
                let expected = live.remove(k);
                prop_assert_eq!(open.remove(k).is_ok(), expected);
                prop_assert_eq!(chained.remove(k).is_ok(), expected);
            }
        }

        let open_keys: Vec<&str> = open.keys().collect();
        let chained_keys: Vec<&str> = chained.keys().collect();
        prop_assert_eq!(open_keys.len(), live.len());
        prop_assert_eq!(chained_keys.len(), live.len());
        let open_set: BTreeSet<String> = open_keys.into_iter().map(String::from).collect();
        let chained_set: BTreeSet<String> = chained_keys.into_iter().map(String::from).collect();
        prop_assert_eq!(&open_set, &live);
        prop_assert_eq!(&chained_set, &live);
        prop_assert!(open.len() + open.deleted() <= open.capacity());
    }
}
