//! Error types for sectorfs
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::protocol::Opcode;

/// Result type alias using SectorFsError
pub type Result<T> = std::result::Result<T, SectorFsError>;

/// Unified error type for sectorfs operations
#[derive(Debug, Error)]
pub enum SectorFsError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Not connected to the storage server")]
    NotConnected,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server reported failure for {opcode:?}")]
    ServerFailure { opcode: Opcode },

    // -------------------------------------------------------------------------
    // File Table Errors
    // -------------------------------------------------------------------------
    #[error("Invalid file handle: {0}")]
    InvalidHandle(usize),

    #[error("File handle {0} is not open")]
    NotOpen(usize),

    #[error("File is already open: {0}")]
    AlreadyOpen(String),

    // -------------------------------------------------------------------------
    // Allocation Errors
    // -------------------------------------------------------------------------
    #[error("No free sectors remain on the disk")]
    NoSpace,

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Seek offset {offset} past end of file (length {len})")]
    SeekPastEnd { offset: u64, len: u64 },
}
