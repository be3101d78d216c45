//! Memoises engine results by the content of the event record, so that an unchanged snapshot is
//! not re-evaluated.

use std::collections::hash_map::Entry;
use std::ops::{Add, AddAssign};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::engine::{Engine, EventPicks};
use crate::feed::EventRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}
impl CacheStats {
    pub fn lookups(&self) -> usize {
        self.hits + self.misses
    }
}

impl Add<bool> for CacheStats {
    type Output = CacheStats;

    fn add(mut self, cache_hit: bool) -> Self::Output {
        self += cache_hit;
        self
    }
}

impl Add for CacheStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<bool> for CacheStats {
    fn add_assign(&mut self, cache_hit: bool) {
        if cache_hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.misses += rhs.misses;
    }
}

type Bytes = Vec<u8>;

#[derive(Debug)]
pub struct CachingEngine {
    engine: Engine,
    cache: FxHashMap<Bytes, EventPicks>,
    stats: CacheStats,
}
impl CachingEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            cache: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Evaluates `record`, or returns the result of an earlier evaluation of an identical record.
    pub fn evaluate(&mut self, record: &EventRecord) -> Result<&EventPicks, serde_json::Error> {
        let encoded = serde_json::to_vec(record)?;
        let (event_picks, cache_hit) = match self.cache.entry(encoded) {
            Entry::Occupied(entry) => (entry.into_mut(), true),
            Entry::Vacant(entry) => (entry.insert(self.engine.evaluate(record)), false),
        };
        trace!("event {}: cache hit {cache_hit}", record.id);
        self.stats += cache_hit;
        Ok(event_picks)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl From<Engine> for CachingEngine {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}
