//! Driver Module
//!
//! The session object that coordinates all components.
//!
//! ## Responsibilities
//! - Translate byte-range reads/writes into fixed-size sector operations
//! - Consult the cache before the network, populate it after misses
//! - Allocate sectors on demand as writes extend a file
//! - Drive mount/unmount over the transport
//!
//! ## Concurrency Model
//! Fully synchronous and single-threaded: every exchange blocks until the
//! server's reply (and any payload) has arrived, and exactly one request is
//! in flight at a time. The protocol carries no request identifiers, so the
//! reply-matches-request guarantee depends on that strict sequencing. None
//! of the internal state carries a lock; one logical caller must drive a
//! session at a time.
//!
//! ## Failure Model
//! Multi-sector reads and writes are best-effort, not atomic: a transport
//! failure aborts the call, but bytes transferred by earlier iterations
//! stay transferred and the position reflects the completed iterations.
//! Nothing is retried; retry policy belongs to the caller.

use crate::cache::{CacheStats, SectorCache};
use crate::config::Config;
use crate::error::Result;
use crate::geometry::{SectorBuf, SectorId, SECTOR_SIZE};
use crate::network::Transport;
use crate::table::{FileTable, Handle, SectorBitmap};

/// A driver session against one storage server
///
/// Owns the file table, the sector bitmap, the cache, and the connection;
/// independent sessions are fully isolated from each other.
pub struct Driver {
    config: Config,

    /// Connection to the storage server
    transport: Transport,

    /// Per-file sector/length/position bookkeeping
    table: FileTable,

    /// Sector occupancy for on-demand allocation
    bitmap: SectorBitmap,

    /// LRU cache of sector contents
    cache: SectorCache,
}

impl Driver {
    /// Create an unmounted driver session
    pub fn new(config: Config) -> Self {
        let transport = Transport::new(config.server_addr.clone(), config.server_port);
        let cache = SectorCache::new(config.cache_lines);
        Self {
            config,
            transport,
            table: FileTable::new(),
            bitmap: SectorBitmap::new(),
            cache,
        }
    }

    // =========================================================================
    // Mount / Unmount
    // =========================================================================

    /// Mount the remote disk
    ///
    /// Establishes the connection, then issues the MOUNT exchange.
    pub fn mount(&mut self) -> Result<()> {
        self.transport.connect()?;
        self.transport.mount()?;
        tracing::debug!("Mounted remote disk");
        Ok(())
    }

    /// Unmount the remote disk
    ///
    /// Issues the UMOUNT exchange, then tears down the connection.
    pub fn unmount(&mut self) -> Result<()> {
        self.transport.unmount()?;
        self.transport.close()?;
        tracing::debug!("Unmounted remote disk");
        Ok(())
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// Open a file by path, creating an entry on first open
    pub fn open(&mut self, path: &str) -> Result<Handle> {
        self.table.open(path)
    }

    /// Close an open file; its sectors and length persist for reopen
    pub fn close(&mut self, handle: Handle) -> Result<()> {
        self.table.close(handle)
    }

    /// Seek to an absolute offset within the file
    ///
    /// Seeking to exactly the file length is allowed (append position).
    pub fn seek(&mut self, handle: Handle, offset: u64) -> Result<()> {
        let entry = self.table.entry(handle)?;
        if offset > entry.len() {
            return Err(crate::SectorFsError::SeekPastEnd {
                offset,
                len: entry.len(),
            });
        }
        self.table.set_pos(handle, offset)
    }

    /// Read up to `buf.len()` bytes at the current position
    ///
    /// The count is clamped to the bytes remaining before end of file.
    /// The position advances per completed sector iteration, so on a
    /// mid-call transport failure it reflects the bytes already copied.
    pub fn read(&mut self, handle: Handle, buf: &mut [u8]) -> Result<usize> {
        let entry = self.table.entry(handle)?;
        let remaining_in_file = entry.len() - entry.pos();
        let count = (buf.len() as u64).min(remaining_in_file) as usize;

        let mut copied = 0usize;
        while copied < count {
            let pos = self.table.entry(handle)?.pos();
            let sector_index = (pos / SECTOR_SIZE as u64) as usize;
            let offset = (pos % SECTOR_SIZE as u64) as usize;
            let chunk = (SECTOR_SIZE - offset).min(count - copied);
            let id = self.table.sector_at(handle, sector_index)?;

            if let Some(data) = self.cache.lookup(id) {
                buf[copied..copied + chunk].copy_from_slice(&data[offset..offset + chunk]);
            } else {
                let sector = self.fetch_sector(id)?;
                buf[copied..copied + chunk].copy_from_slice(&sector[offset..offset + chunk]);
                self.cache.insert(id, &sector);
            }

            self.table.advance(handle, chunk as u64)?;
            copied += chunk;
        }

        Ok(count)
    }

    /// Write `buf` at the current position, allocating sectors on demand
    ///
    /// Each sector touched goes through a read-modify-write against the
    /// remote copy; the cache is refreshed with the new contents after the
    /// sector write succeeds. The file length grows when the write reaches
    /// past it. Like [`read`](Driver::read), partially completed calls are
    /// not rolled back.
    pub fn write(&mut self, handle: Handle, buf: &[u8]) -> Result<usize> {
        self.table.entry(handle)?;
        let count = buf.len();

        let mut written = 0usize;
        while written < count {
            let entry = self.table.entry(handle)?;
            let pos = entry.pos();
            let sector_index = (pos / SECTOR_SIZE as u64) as usize;

            // Crossing past the allocated tail needs a fresh sector first
            if sector_index >= entry.sector_count() {
                let id = self.bitmap.allocate()?;
                self.table.push_sector(handle, id)?;
            }

            let id = self.table.sector_at(handle, sector_index)?;
            let offset = (pos % SECTOR_SIZE as u64) as usize;
            let chunk = (SECTOR_SIZE - offset).min(count - written);

            // Read-modify-write: fetch the authoritative remote contents,
            // splice in the caller's bytes, write the sector back
            let mut sector = self.fetch_sector(id)?;
            sector[offset..offset + chunk].copy_from_slice(&buf[written..written + chunk]);
            self.transport.write_sector(id.sector(), &sector)?;
            self.cache.insert(id, &sector);

            self.table.extend_len(handle, pos + chunk as u64)?;
            self.table.advance(handle, chunk as u64)?;
            written += chunk;
        }

        Ok(count)
    }

    // =========================================================================
    // Accessors (for the session layer and tests)
    // =========================================================================

    /// Cumulative cache hit/miss counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of sectors allocated so far
    pub fn sectors_used(&self) -> u32 {
        self.bitmap.used_count()
    }

    /// Length of the file behind a handle
    pub fn file_len(&self, handle: Handle) -> Result<u64> {
        Ok(self.table.entry(handle)?.len())
    }

    /// Position of the file behind a handle
    pub fn file_pos(&self, handle: Handle) -> Result<u64> {
        Ok(self.table.entry(handle)?.pos())
    }

    /// Number of sectors allocated to the file behind a handle
    pub fn file_sector_count(&self, handle: Handle) -> Result<usize> {
        Ok(self.table.entry(handle)?.sector_count())
    }

    /// The configuration this session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seek the head to a sector's track and read its full contents
    fn fetch_sector(&mut self, id: SectorId) -> Result<SectorBuf> {
        self.transport.seek_track(id.track())?;
        self.transport.read_sector(id.sector())
    }
}
