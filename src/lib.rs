//! # sectorfs
//!
//! Client-side file driver for a remote, sector-addressable block
//! storage service:
//! - Fixed-width binary command protocol over TCP
//! - Byte-range file API translated into sector operations
//! - On-demand sector allocation with a growable file table
//! - LRU sector cache to minimize network round trips
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller / Session                         │
//! │             (open/close/read/write/seek)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Driver                                 │
//! │        (sector mapping, allocation, orchestration)           │
//! └───────┬──────────────────┬──────────────────┬───────────────┘
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//!  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!  │  FileTable  │    │ SectorCache │    │  Transport  │
//!  │  + Bitmap   │    │    (LRU)    │    │ (blocking)  │
//!  └─────────────┘    └─────────────┘    └──────┬──────┘
//!                                               │
//!                                               ▼
//!                                       ┌─────────────┐
//!                                       │   Storage   │
//!                                       │   Server    │
//!                                       └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod geometry;

pub mod protocol;
pub mod network;
pub mod table;
pub mod cache;
pub mod driver;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SectorFsError};
pub use config::Config;
pub use driver::Driver;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sectorfs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
