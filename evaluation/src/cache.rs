//! Process-wide cache of static evaluations keyed by Zobrist hash.

use ahash::RandomState;
use dashmap::DashMap;

/// Shared between all searcher threads. `DashMap`'s sharded locking keeps
/// concurrent probes cheap. Entries never expire during a game; the whole
/// map is dropped on `ucinewgame`.
pub struct EvalCache {
    scores: DashMap<u64, i16, RandomState>,
}

impl EvalCache {
    pub fn new() -> Self {
        Self {
            scores: DashMap::with_hasher(RandomState::new()),
        }
    }

    #[inline]
    pub fn get(&self, hash: u64) -> Option<i16> {
        self.scores.get(&hash).map(|score| *score)
    }

    #[inline]
    pub fn insert(&self, hash: u64, score: i16) {
        self.scores.insert(hash, score);
    }

    pub fn clear(&self) {
        self.scores.clear();
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        Self::new()
    }
}
