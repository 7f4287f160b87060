//! File table
//!
//! Growable table of file entries indexed by handle. A handle, once
//! issued, keeps its meaning for the life of the session; closing a
//! file retains its path, sector list, and length so a later open of
//! the same path reuses the slot.

use crate::error::{Result, SectorFsError};
use crate::geometry::SectorId;

/// Caller-visible identifier for an open file, indexing into the table
pub type Handle = usize;

/// One file's bookkeeping record
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// File path, set once at first open
    path: String,

    /// Allocated sectors in file order, append-only
    sectors: Vec<SectorId>,

    /// Logical length in bytes
    len: u64,

    /// Current read/write position, 0 <= pos <= len
    pos: u64,

    /// Open/closed state
    open: bool,
}

impl FileEntry {
    fn new(path: String) -> Self {
        Self {
            path,
            sectors: Vec::new(),
            len: 0,
            pos: 0,
            open: true,
        }
    }

    /// File path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Logical length in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the file holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current position
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Whether the file is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of sectors allocated to this file
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }
}

/// Table of all files ever opened in this session
pub struct FileTable {
    entries: Vec<FileEntry>,
}

impl FileTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Open a file by path
    ///
    /// An open entry with the same path is rejected. A closed entry with
    /// the same path is reopened in place: position resets to zero while
    /// its sector list and length survive. An unknown path gets a fresh
    /// entry at the end of the table.
    pub fn open(&mut self, path: &str) -> Result<Handle> {
        for (handle, entry) in self.entries.iter_mut().enumerate() {
            if entry.path == path {
                if entry.open {
                    return Err(SectorFsError::AlreadyOpen(path.to_string()));
                }
                entry.pos = 0;
                entry.open = true;
                tracing::debug!(handle, path, "Reopened file");
                return Ok(handle);
            }
        }

        self.entries.push(FileEntry::new(path.to_string()));
        let handle = self.entries.len() - 1;
        tracing::debug!(handle, path, "Opened new file");
        Ok(handle)
    }

    /// Close an open file
    ///
    /// Resets the position and marks the entry closed; path, sector list,
    /// and length are all retained for a later reopen.
    pub fn close(&mut self, handle: Handle) -> Result<()> {
        let entry = self
            .entries
            .get_mut(handle)
            .ok_or(SectorFsError::InvalidHandle(handle))?;
        if !entry.open {
            return Err(SectorFsError::NotOpen(handle));
        }
        entry.pos = 0;
        entry.open = false;
        tracing::debug!(handle, path = %entry.path, "Closed file");
        Ok(())
    }

    /// Look up an entry, requiring it to be open
    pub fn entry(&self, handle: Handle) -> Result<&FileEntry> {
        let entry = self
            .entries
            .get(handle)
            .ok_or(SectorFsError::InvalidHandle(handle))?;
        if !entry.open {
            return Err(SectorFsError::NotOpen(handle));
        }
        Ok(entry)
    }

    /// The sector holding the given file-order sector index
    pub fn sector_at(&self, handle: Handle, index: usize) -> Result<SectorId> {
        let entry = self.entry(handle)?;
        entry.sectors.get(index).copied().ok_or_else(|| {
            SectorFsError::Protocol(format!(
                "File {} has no sector at index {}",
                entry.path, index
            ))
        })
    }

    /// Append a newly allocated sector to the entry's list
    pub fn push_sector(&mut self, handle: Handle, id: SectorId) -> Result<()> {
        self.entry_mut(handle)?.sectors.push(id);
        Ok(())
    }

    /// Advance the position after a completed read/write iteration
    pub fn advance(&mut self, handle: Handle, bytes: u64) -> Result<()> {
        self.entry_mut(handle)?.pos += bytes;
        Ok(())
    }

    /// Grow the logical length if the write reached past it
    pub fn extend_len(&mut self, handle: Handle, end: u64) -> Result<()> {
        let entry = self.entry_mut(handle)?;
        if end > entry.len {
            entry.len = end;
        }
        Ok(())
    }

    /// Set the position directly; used by seek after validation
    pub fn set_pos(&mut self, handle: Handle, pos: u64) -> Result<()> {
        self.entry_mut(handle)?.pos = pos;
        Ok(())
    }

    /// Number of entries ever created
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no file has ever been opened
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, handle: Handle) -> Result<&mut FileEntry> {
        let entry = self
            .entries
            .get_mut(handle)
            .ok_or(SectorFsError::InvalidHandle(handle))?;
        if !entry.open {
            return Err(SectorFsError::NotOpen(handle));
        }
        Ok(entry)
    }
}

impl Default for FileTable {
    fn default() -> Self {
        Self::new()
    }
}
