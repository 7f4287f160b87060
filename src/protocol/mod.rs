//! Protocol Module
//!
//! Defines the wire protocol for driver-server communication.
//!
//! ## Protocol Format (fixed 64-bit command block)
//!
//! ```text
//!  63      60 59              44 43                      12 11  10        0
//! ┌──────────┬──────────────────┬──────────────────────────┬────┬──────────┐
//! │ Op (4b)  │   Sector (16b)   │       Track (32b)        │St 1│ Reserved │
//! └──────────┴──────────────────┴──────────────────────────┴────┴──────────┘
//! ```
//!
//! ### Opcodes
//! - 0x0: MOUNT   - mount the disk (opens the connection first)
//! - 0x1: TSEEK   - seek the head to `track`
//! - 0x2: RDSECT  - read `sector` on the current track (+1 sector payload back)
//! - 0x3: WRSECT  - write `sector` on the current track (+1 sector payload sent)
//! - 0x4: UMOUNT  - unmount the disk (closes the connection after the reply)
//!
//! ### Status Bit (server-written)
//! - 0: SUCCESS
//! - 1: FAILURE
//!
//! ### Framing
//! The block travels as one big-endian u64. WRSECT is immediately followed by
//! exactly one sector of payload; the reply to RDSECT is immediately followed
//! by exactly one sector of payload. Reserved bits are always zero on encode.

mod command;
mod codec;

pub use command::{CommandBlock, Opcode, OpStatus};
pub use codec::{
    decode_block, encode_block, read_block, read_payload, write_block, write_payload,
};
