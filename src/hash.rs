//! Deterministic MurmurHash64A-style hasher used as the default index hasher.
//!
//! The classic MurmurHash64A folds the key length into the seed before mixing
//! any data, which requires knowing the length up front. `Hasher::write` may be
//! called several times per key (`str` writes its bytes and then a terminator
//! byte), so this variant consumes 8-byte blocks as they arrive and folds the
//! total length in at finalization. Mixing constants and the final avalanche
//! are unchanged.

use core::hash::{BuildHasher, Hasher};

const M: u64 = 0xc6a4_a793_5bd1_e995;
const R: u32 = 47;

/// Seed used by `MurmurState::default()`.
pub const DEFAULT_SEED: u64 = 1_023_724_138;

/// Streaming 64-bit Murmur hasher.
#[derive(Clone, Debug)]
pub struct MurmurHasher {
    h: u64,
    tail: u64,
    tail_len: u32,
    len: u64,
}

impl MurmurHasher {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            h: seed,
            tail: 0,
            tail_len: 0,
            len: 0,
        }
    }

    #[inline]
    fn mix_block(&mut self, block: u64) {
        let mut k = block.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        self.h ^= k;
        self.h = self.h.wrapping_mul(M);
    }
}

impl Default for MurmurHasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl Hasher for MurmurHasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut rest = bytes;

        // Top up a partial block left by a previous write.
        while self.tail_len != 0 && !rest.is_empty() {
            self.tail |= u64::from(rest[0]) << (8 * self.tail_len);
            self.tail_len += 1;
            rest = &rest[1..];
            if self.tail_len == 8 {
                let block = self.tail;
                self.mix_block(block);
                self.tail = 0;
                self.tail_len = 0;
            }
        }

        let mut chunks = rest.chunks_exact(8);
        for chunk in &mut chunks {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            self.mix_block(u64::from_le_bytes(buf));
        }
        for (i, &b) in chunks.remainder().iter().enumerate() {
            self.tail |= u64::from(b) << (8 * i);
        }
        self.tail_len += chunks.remainder().len() as u32;

        self.len = self.len.wrapping_add(bytes.len() as u64);
    }

    fn finish(&self) -> u64 {
        let mut h = self.h ^ self.len.wrapping_mul(M);
        if self.tail_len > 0 {
            h ^= self.tail;
            h = h.wrapping_mul(M);
        }
        h ^= h >> R;
        h = h.wrapping_mul(M);
        h ^= h >> R;
        h
    }
}

/// `BuildHasher` producing seeded `MurmurHasher`s. Two states with the same
/// seed always agree, across processes and runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MurmurState {
    seed: u64,
}

impl MurmurState {
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for MurmurState {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl BuildHasher for MurmurState {
    type Hasher = MurmurHasher;

    fn build_hasher(&self) -> MurmurHasher {
        MurmurHasher::with_seed(self.seed)
    }
}
