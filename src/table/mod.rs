//! Table Module
//!
//! Sector allocation and the per-file sector/length/position table.
//!
//! ## Responsibilities
//! - First-fit allocation over the (track, sector) occupancy bitmap
//! - Open/close/reopen bookkeeping for file entries
//! - Handle validation for every driver operation
//!
//! Sectors, once allocated to a file, are owned by it permanently; there is
//! no reclamation path and closing a file releases nothing.

mod allocator;
mod file_table;

pub use allocator::SectorBitmap;
pub use file_table::{FileEntry, FileTable, Handle};
