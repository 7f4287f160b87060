//! Cache Module
//!
//! Bounded least-recently-used cache of sector contents.
//!
//! ## Structure
//! Entries live in an arena of slots addressed by stable indices. Recency
//! is a doubly linked list threaded through the slots with explicit
//! `lru`/`mru` head indices; promotion and eviction relink indices only,
//! data never moves. At most one entry exists per sector id and the live
//! entry count never exceeds the capacity.
//!
//! The cache exchanges data by copy: sector buffers are copied in on
//! insert and copied out by the caller on lookup, so cached data never
//! aliases file-table or transport buffers.

use crate::geometry::{SectorBuf, SectorId};

/// Cumulative hit/miss counters for the lookup and insert paths
///
/// Observability only; no behavioral effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found the sector
    pub get_hits: u64,

    /// Lookups that missed
    pub get_misses: u64,

    /// Inserts that overwrote an existing entry in place
    pub put_hits: u64,

    /// Inserts that added a new entry (evicting if at capacity)
    pub put_misses: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "get hits: {}, get misses: {}, put updates: {}, put inserts: {}",
            self.get_hits, self.get_misses, self.put_hits, self.put_misses
        )
    }
}

/// One arena slot holding a cached sector
struct Slot {
    /// Sector this slot caches
    id: SectorId,

    /// Copy of the sector contents
    data: Box<SectorBuf>,

    /// Arena index of the next-less-recently-used slot
    prev: Option<usize>,

    /// Arena index of the next-more-recently-used slot
    next: Option<usize>,
}

/// Bounded LRU cache keyed by sector id
pub struct SectorCache {
    /// Slot arena; indices into it are stable for a slot's lifetime
    slots: Vec<Slot>,

    /// Indices of vacated slots available for reuse
    free: Vec<usize>,

    /// Least-recently-used end of the recency list
    lru: Option<usize>,

    /// Most-recently-used end of the recency list
    mru: Option<usize>,

    /// Maximum number of live entries
    capacity: usize,

    /// Hit/miss counters
    stats: CacheStats,
}

impl SectorCache {
    /// Create a cache bounded to `capacity` sector-sized lines
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            lru: None,
            mru: None,
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Look up a sector, promoting it to most-recently-used on a hit
    pub fn lookup(&mut self, id: SectorId) -> Option<&SectorBuf> {
        match self.find(id) {
            Some(index) => {
                self.stats.get_hits += 1;
                self.promote(index);
                Some(&self.slots[index].data)
            }
            None => {
                self.stats.get_misses += 1;
                None
            }
        }
    }

    /// Insert or refresh a sector's cached contents
    ///
    /// An existing entry is overwritten in place and promoted. A new
    /// entry evicts the least-recently-used one first when the cache is
    /// at capacity.
    pub fn insert(&mut self, id: SectorId, data: &SectorBuf) {
        if let Some(index) = self.find(id) {
            self.stats.put_hits += 1;
            self.slots[index].data.copy_from_slice(data);
            self.promote(index);
            return;
        }

        self.stats.put_misses += 1;
        if self.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = Slot {
            id,
            data: Box::new(*data),
            prev: self.mru,
            next: None,
        };
        let index = match self.free.pop() {
            Some(vacant) => {
                self.slots[vacant] = slot;
                vacant
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.attach_mru(index);
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cumulative hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // =========================================================================
    // Recency list maintenance
    // =========================================================================

    /// Linear scan of the live slots for a sector id
    fn find(&self, id: SectorId) -> Option<usize> {
        let mut cursor = self.lru;
        while let Some(index) = cursor {
            if self.slots[index].id == id {
                return Some(index);
            }
            cursor = self.slots[index].next;
        }
        None
    }

    /// Unlink a slot from wherever it sits in the recency list
    fn detach(&mut self, index: usize) {
        let (prev, next) = (self.slots[index].prev, self.slots[index].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.lru = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.mru = prev,
        }
        self.slots[index].prev = None;
        self.slots[index].next = None;
    }

    /// Link a detached slot at the most-recently-used end
    fn attach_mru(&mut self, index: usize) {
        self.slots[index].prev = self.mru;
        self.slots[index].next = None;
        match self.mru {
            Some(m) => self.slots[m].next = Some(index),
            None => self.lru = Some(index),
        }
        self.mru = Some(index);
    }

    /// Move a slot to the most-recently-used end
    fn promote(&mut self, index: usize) {
        if self.mru == Some(index) {
            return;
        }
        self.detach(index);
        self.attach_mru(index);
    }

    /// Drop the least-recently-used entry, returning its slot to the arena
    fn evict_lru(&mut self) {
        if let Some(index) = self.lru {
            tracing::trace!(id = %self.slots[index].id, "Evicting LRU sector");
            self.detach(index);
            self.free.push(index);
        }
    }
}
