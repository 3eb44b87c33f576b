#![cfg(test)]

// Property tests for HashIndex kept inside the crate so they can use the
// test-only slot inspection helpers.

use crate::hash_index::{Cursor, HashIndex, InsertError};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hasher;

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
    Drain,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Drain),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Every live key must be findable by probing from its home slot without
// crossing an empty slot.
fn assert_probe_invariant<S: BuildHasher>(sut: &HashIndex<i32, S>) -> Result<(), TestCaseError> {
    for key in sut.keys() {
        let home = (sut.hasher().hash_one(key) % sut.capacity() as u64) as usize;
        let at = sut.slot_of(key).expect("live key has a slot");
        let mut i = home;
        while i != at {
            prop_assert!(sut.is_occupied(i), "empty slot {} between home {} and {}", i, home, at);
            i = (i + 1) % sut.capacity();
        }
    }
    Ok(())
}

fn run<S: BuildHasher>(
    mut sut: HashIndex<i32, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Set(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                let before = sut.len();
                match sut.set(k.as_str(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "set must fail on duplicate");
                        prop_assert_eq!(sut.len(), before + 1);
                        model.insert(k.clone(), v);
                        prop_assert!(sut.load_factor() <= 0.8);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(sut.len(), before);
                        prop_assert_eq!(sut.get(k), model.get(k));
                    }
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                let got = sut.remove(k);
                let expected = model.remove(k);
                prop_assert_eq!(got, expected);
                let delta = usize::from(expected.is_some());
                prop_assert_eq!(sut.len(), before - delta);
                prop_assert!(sut.get(k).is_none());
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            Op::Iterate => {
                let mut cursor = Cursor::new();
                let mut seen = BTreeSet::new();
                while let Some((k, v)) = sut.iterate(&mut cursor) {
                    prop_assert!(seen.insert(k.to_string()), "key yielded twice");
                    prop_assert_eq!(Some(v), model.get(k));
                }
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(seen, m_keys);
            }
            Op::Drain => {
                // Restart the cursor after every removal, the way recursive
                // directory deletion consumes an index.
                let mut cursor = Cursor::new();
                loop {
                    cursor.reset();
                    let key = match sut.iterate(&mut cursor) {
                        Some((k, _)) => k.to_string(),
                        None => break,
                    };
                    prop_assert!(sut.remove(&key).is_some());
                    model.remove(&key);
                }
                prop_assert!(model.is_empty());
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
        assert_probe_invariant(&sut)?;
    }
    Ok(())
}

#[derive(Clone, Default)]
struct FixedBuildHasher(u64);
struct FixedHasher(u64);
impl BuildHasher for FixedBuildHasher {
    type Hasher = FixedHasher;
    fn build_hasher(&self) -> Self::Hasher {
        FixedHasher(self.0)
    }
}
impl Hasher for FixedHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        self.0
    }
}

// Coarse hasher: few distinct home slots, so chains interleave and wrap.
#[derive(Clone, Default)]
struct FirstByteBuildHasher;
struct FirstByteHasher(Option<u64>);
impl BuildHasher for FirstByteBuildHasher {
    type Hasher = FirstByteHasher;
    fn build_hasher(&self) -> Self::Hasher {
        FirstByteHasher(None)
    }
}
impl Hasher for FirstByteHasher {
    fn write(&mut self, bytes: &[u8]) {
        if self.0.is_none() {
            self.0 = bytes.first().map(|&b| u64::from(b) * 7);
        }
    }
    fn finish(&self) -> u64 {
        self.0.unwrap_or(0)
    }
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - duplicate keys are rejected without changing size or value;
// - `remove` returns the model's value and shrinks size by exactly one;
// - cursor iteration yields every live key exactly once;
// - load factor stays <= 0.8 after every successful set;
// - every live key is probe-reachable from its home slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(HashIndex::new(), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(HashIndex::with_hasher(FixedBuildHasher(0)), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_wrapping((pool, ops) in arb_scenario()) {
        // Home slot is the last slot of the initial table.
        run(HashIndex::with_hasher(FixedBuildHasher(31)), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_clustered((pool, ops) in arb_scenario()) {
        run(HashIndex::with_hasher(FirstByteBuildHasher), pool, ops)?;
    }
}
