//! Cache Tests
//!
//! Tests for the LRU sector cache: eviction order, promotion,
//! in-place overwrite, and counter accounting.

use sectorfs::cache::SectorCache;
use sectorfs::geometry::{SectorBuf, SectorId, SECTOR_SIZE};

fn sector_filled(byte: u8) -> SectorBuf {
    [byte; SECTOR_SIZE]
}

// =============================================================================
// LRU Discipline Tests
// =============================================================================

#[test]
fn test_lookup_empty_misses() {
    let mut cache = SectorCache::new(4);
    assert!(cache.lookup(SectorId::new(0, 0)).is_none());
    assert_eq!(cache.stats().get_misses, 1);
}

#[test]
fn test_insert_then_lookup() {
    let mut cache = SectorCache::new(4);
    let id = SectorId::new(1, 2);
    cache.insert(id, &sector_filled(0xAB));

    let data = cache.lookup(id).expect("sector should be cached");
    assert!(data.iter().all(|&b| b == 0xAB));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_promotion_changes_eviction_victim() {
    // Capacity 2: insert A, insert B, touch A, insert C.
    // B is now least recently used and must be the one evicted.
    let mut cache = SectorCache::new(2);
    let a = SectorId::new(0, 0);
    let b = SectorId::new(0, 1);
    let c = SectorId::new(0, 2);

    cache.insert(a, &sector_filled(0xAA));
    cache.insert(b, &sector_filled(0xBB));
    assert!(cache.lookup(a).is_some());

    cache.insert(c, &sector_filled(0xCC));
    assert_eq!(cache.len(), 2);

    assert!(cache.lookup(b).is_none());
    assert!(cache.lookup(a).is_some());
    assert!(cache.lookup(c).is_some());
}

#[test]
fn test_eviction_is_strict_recency() {
    let mut cache = SectorCache::new(3);
    for sector in 0..3u16 {
        cache.insert(SectorId::new(0, sector), &sector_filled(sector as u8));
    }

    // Inserting a fourth entry evicts the oldest untouched one
    cache.insert(SectorId::new(0, 3), &sector_filled(3));
    assert!(cache.lookup(SectorId::new(0, 0)).is_none());
    assert!(cache.lookup(SectorId::new(0, 1)).is_some());
}

#[test]
fn test_capacity_bound_holds_under_churn() {
    let mut cache = SectorCache::new(8);
    for track in 0..4u32 {
        for sector in 0..16u16 {
            cache.insert(SectorId::new(track, sector), &sector_filled(sector as u8));
            assert!(cache.len() <= 8);
        }
    }
    assert_eq!(cache.len(), 8);
}

#[test]
fn test_overwrite_in_place_promotes() {
    let mut cache = SectorCache::new(2);
    let a = SectorId::new(2, 0);
    let b = SectorId::new(2, 1);

    cache.insert(a, &sector_filled(0x01));
    cache.insert(b, &sector_filled(0x02));

    // Re-inserting A overwrites its data and makes it most recent
    cache.insert(a, &sector_filled(0x03));
    assert_eq!(cache.len(), 2);

    cache.insert(SectorId::new(2, 2), &sector_filled(0x04));
    assert!(cache.lookup(b).is_none());

    let data = cache.lookup(a).expect("A should have survived");
    assert!(data.iter().all(|&b| b == 0x03));
}

#[test]
fn test_one_entry_per_sector_id() {
    let mut cache = SectorCache::new(4);
    let id = SectorId::new(5, 5);
    cache.insert(id, &sector_filled(1));
    cache.insert(id, &sector_filled(2));
    cache.insert(id, &sector_filled(3));
    assert_eq!(cache.len(), 1);
}

// =============================================================================
// Counter Tests
// =============================================================================

#[test]
fn test_counters_track_both_paths() {
    let mut cache = SectorCache::new(2);
    let id = SectorId::new(0, 0);

    cache.lookup(id); // miss
    cache.insert(id, &sector_filled(0)); // new entry
    cache.lookup(id); // hit
    cache.insert(id, &sector_filled(1)); // in-place overwrite
    cache.lookup(SectorId::new(0, 1)); // miss

    let stats = cache.stats();
    assert_eq!(stats.get_hits, 1);
    assert_eq!(stats.get_misses, 2);
    assert_eq!(stats.put_hits, 1);
    assert_eq!(stats.put_misses, 1);
}

#[test]
fn test_counters_have_no_behavioral_effect() {
    let mut cache = SectorCache::new(2);
    let id = SectorId::new(3, 3);
    cache.insert(id, &sector_filled(9));

    // Repeated misses elsewhere must not disturb the cached entry
    for sector in 10..20u16 {
        cache.lookup(SectorId::new(9, sector));
    }
    assert!(cache.lookup(id).is_some());
}
