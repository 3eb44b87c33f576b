//! HashIndex: string-keyed open-addressing table with linear probing and
//! backward-shift deletion.
//!
//! Every entry stores the 64-bit hash of its key, computed once on insert.
//! Placement, resize and shift-deletion all derive the home slot from that
//! stored hash, so the hasher is only consulted for keys coming from callers.

use crate::hash::MurmurState;
use core::hash::BuildHasher;
use core::mem;

/// Slot count of a freshly constructed index.
pub const INITIAL_CAPACITY: usize = 32;

// Load factor 0.8 expressed as a ratio to stay in integer arithmetic.
const LOAD_NUM: usize = 4;
const LOAD_DEN: usize = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("key already present in index")]
    DuplicateKey,
}

#[derive(Clone, Debug)]
struct Entry<V> {
    key: String,
    value: V,
    hash: u64,
}

/// External resumable scan position for [`HashIndex::iterate`].
///
/// A cursor holds only a physical slot number, so it stays valid (if not
/// meaningful) across mutations of the index it scans. Resetting it restarts
/// the scan at slot 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor(usize);

impl Cursor {
    pub const fn new() -> Self {
        Cursor(0)
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn position(&self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub struct HashIndex<V, S = MurmurState> {
    hasher: S,
    slots: Vec<Option<Entry<V>>>,
    size: usize,
}

impl<V> HashIndex<V> {
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, MurmurState::default())
    }
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: core::fmt::Debug, S: BuildHasher> core::fmt::Debug for HashIndex<V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over live entries in physical slot order.
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .flatten()
            .next()
            .map(|e| (e.key.as_str(), &e.value))
    }
}

impl<V, S> HashIndex<V, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, hasher)
    }

    /// A zero capacity is bumped to one slot; probing needs at least one.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(1);
        Self {
            hasher,
            slots: empty_slots(capacity),
            size: 0,
        }
    }

    fn make_hash(&self, key: &str) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    fn next_slot(&self, i: usize) -> usize {
        (i + 1) % self.slots.len()
    }

    /// Probe from the key's home slot; returns the slot holding `key` or the
    /// first empty slot on its probe sequence.
    fn find_slot(&self, key: &str, hash: u64) -> usize {
        let mut idx = self.home(hash);
        while let Some(e) = &self.slots[idx] {
            if e.hash == hash && e.key == key {
                break;
            }
            idx = self.next_slot(idx);
        }
        idx
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let idx = self.find_slot(key, self.make_hash(key));
        self.slots[idx].as_ref().map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.find_slot(key, self.make_hash(key));
        self.slots[idx].as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert `key -> value` only if `key` is absent. This is not an upsert:
    /// on a duplicate the index is left untouched and `value` is dropped.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<(), InsertError> {
        let key = key.into();
        let hash = self.make_hash(&key);
        if self.slots[self.find_slot(&key, hash)].is_some() {
            return Err(InsertError::DuplicateKey);
        }
        if exceeds_load(self.size + 1, self.slots.len()) {
            self.resize(self.slots.len() * 2);
        }
        self.place(Entry { key, value, hash });
        Ok(())
    }

    // Caller guarantees the key is absent and a free slot exists.
    fn place(&mut self, entry: Entry<V>) {
        let idx = self.find_slot(&entry.key, entry.hash);
        debug_assert!(self.slots[idx].is_none());
        self.slots[idx] = Some(entry);
        self.size += 1;
    }

    /// Reallocate to `new_capacity` slots and reinsert every live entry in
    /// old physical slot order. Capacities too small for the current entries
    /// are doubled until the load factor holds.
    pub fn resize(&mut self, new_capacity: usize) {
        let mut capacity = new_capacity.max(1);
        while exceeds_load(self.size, capacity) {
            capacity *= 2;
        }
        log::trace!(
            "hash index resize: {} -> {} slots ({} live)",
            self.slots.len(),
            capacity,
            self.size
        );
        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.size = 0;
        for entry in old.into_iter().flatten() {
            self.place(entry);
        }
    }

    /// Remove `key` and return its value; absent keys are a no-op.
    ///
    /// Entries following the freed slot are shifted back into the hole when
    /// their home slot lies cyclically outside `(hole, j]`, which keeps every
    /// remaining probe sequence unbroken without tombstones.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.find_slot(key, self.make_hash(key));
        let removed = self.slots[idx].take()?;

        let mut hole = idx;
        let mut next = self.next_slot(idx);
        loop {
            let base = match &self.slots[next] {
                Some(e) => self.home(e.hash),
                None => break,
            };
            if shifts_into(hole, next, base) {
                log::trace!("hash index shift: slot {} -> {}", next, hole);
                self.slots[hole] = self.slots[next].take();
                hole = next;
            }
            next = self.next_slot(next);
        }
        self.size -= 1;
        Some(removed.value)
    }

    /// Return the next live entry at or after the cursor and advance the
    /// cursor past it. `None` once the scan reaches the last slot.
    pub fn iterate(&self, cursor: &mut Cursor) -> Option<(&str, &V)> {
        let start = cursor.0;
        for (i, slot) in self.slots.iter().enumerate().skip(start) {
            if let Some(e) = slot {
                cursor.0 = i + 1;
                return Some((e.key.as_str(), &e.value));
            }
        }
        cursor.0 = self.slots.len().max(start);
        None
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    #[cfg(test)]
    pub(crate) fn slot_of(&self, key: &str) -> Option<usize> {
        let idx = self.find_slot(key, self.make_hash(key));
        self.slots[idx].as_ref().map(|_| idx)
    }

    #[cfg(test)]
    pub(crate) fn is_occupied(&self, slot: usize) -> bool {
        self.slots[slot].is_some()
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Option<Entry<V>>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

#[inline]
fn exceeds_load(size: usize, capacity: usize) -> bool {
    size * LOAD_DEN > capacity * LOAD_NUM
}

/// Whether the entry at slot `j` with home slot `base` may move into the hole
/// at `hole` and still be found by probing from `base`.
#[inline]
fn shifts_into(hole: usize, j: usize, base: usize) -> bool {
    if j > hole {
        base <= hole || base > j
    } else {
        base <= hole && base > j
    }
}
