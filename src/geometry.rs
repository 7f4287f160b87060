//! Disk geometry
//!
//! Fixed parameters of the remote disk and the linear sector addressing
//! shared by the allocator, the file table, and the cache.

/// Size of one sector in bytes, the minimum transfer granularity
pub const SECTOR_SIZE: usize = 1024;

/// Number of tracks on the disk
pub const TRACK_COUNT: u32 = 64;

/// Number of sectors per track
pub const SECTORS_PER_TRACK: u16 = 64;

/// A buffer holding exactly one sector of data
pub type SectorBuf = [u8; SECTOR_SIZE];

/// Linearized address of one (track, sector) storage unit
///
/// Every component that names a sector uses this single scheme, so two
/// distinct (track, sector) pairs can never alias each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectorId(u32);

impl SectorId {
    /// Build an id from disk coordinates
    pub fn new(track: u32, sector: u16) -> Self {
        SectorId(track * SECTORS_PER_TRACK as u32 + sector as u32)
    }

    /// The track component
    pub fn track(self) -> u32 {
        self.0 / SECTORS_PER_TRACK as u32
    }

    /// The sector-within-track component
    pub fn sector(self) -> u16 {
        (self.0 % SECTORS_PER_TRACK as u32) as u16
    }

    /// The raw linear index
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}/s{}", self.track(), self.sector())
    }
}
