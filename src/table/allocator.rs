//! Sector allocator
//!
//! Occupancy bitmap over the full (track, sector) domain with a
//! deterministic first-fit allocation policy.

use crate::error::{Result, SectorFsError};
use crate::geometry::{SectorId, SECTORS_PER_TRACK, TRACK_COUNT};

/// Per-(track, sector) occupancy table
///
/// Cells are marked used at allocation time and never cleared.
pub struct SectorBitmap {
    /// Flat row-major occupancy bits, one per sector on the disk
    used: Vec<bool>,

    /// Running count of allocated sectors
    used_count: u32,
}

impl SectorBitmap {
    /// Create a bitmap with every sector free
    pub fn new() -> Self {
        Self {
            used: vec![false; TRACK_COUNT as usize * SECTORS_PER_TRACK as usize],
            used_count: 0,
        }
    }

    /// Allocate the first free sector in row-major order
    ///
    /// Scans tracks in ascending order and sectors in ascending order
    /// within each track, so allocation order is fully deterministic:
    /// lowest track first, then lowest sector.
    pub fn allocate(&mut self) -> Result<SectorId> {
        let index = self
            .used
            .iter()
            .position(|&in_use| !in_use)
            .ok_or(SectorFsError::NoSpace)?;

        self.used[index] = true;
        self.used_count += 1;

        let id = SectorId::new(
            index as u32 / SECTORS_PER_TRACK as u32,
            (index as u32 % SECTORS_PER_TRACK as u32) as u16,
        );
        tracing::trace!(%id, used = self.used_count, "Allocated sector");
        Ok(id)
    }

    /// Number of sectors allocated so far
    pub fn used_count(&self) -> u32 {
        self.used_count
    }

    /// Whether a given sector is marked used
    pub fn is_used(&self, id: SectorId) -> bool {
        self.used
            .get(id.index() as usize)
            .copied()
            .unwrap_or(false)
    }
}

impl Default for SectorBitmap {
    fn default() -> Self {
        Self::new()
    }
}
