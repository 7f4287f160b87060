//! Protocol codec
//!
//! Bit packing/unpacking for the 64-bit command block, plus blocking
//! stream helpers for blocks and sector payloads.
//!
//! ## Bit Layout
//! ```text
//! opcode : bits 60..64 (4 bits)
//! sector : bits 44..60 (16 bits)
//! track  : bits 12..44 (32 bits)
//! status : bit  11     (1 bit)
//! bits 0..11 reserved, always zero on encode
//! ```

use std::io::{Read, Write};

use crate::error::{Result, SectorFsError};
use crate::geometry::{SectorBuf, SECTOR_SIZE};
use super::{CommandBlock, Opcode, OpStatus};

/// Bit offsets of each field inside the block
const OPCODE_SHIFT: u32 = 60;
const SECTOR_SHIFT: u32 = 44;
const TRACK_SHIFT: u32 = 12;
const STATUS_SHIFT: u32 = 11;

/// Field masks, applied after shifting down
const OPCODE_MASK: u64 = 0xF;
const SECTOR_MASK: u64 = 0xFFFF;
const TRACK_MASK: u64 = 0xFFFF_FFFF;
const STATUS_MASK: u64 = 0x1;

// =============================================================================
// Block Encoding/Decoding
// =============================================================================

/// Encode a command block into its 64-bit wire form
///
/// The reserved low bits are forced to zero.
pub fn encode_block(block: &CommandBlock) -> u64 {
    ((block.opcode as u64) << OPCODE_SHIFT)
        | ((block.sector as u64) << SECTOR_SHIFT)
        | ((block.track as u64) << TRACK_SHIFT)
        | ((block.status as u64) << STATUS_SHIFT)
}

/// Decode a 64-bit wire value back into a command block
///
/// Inverse of [`encode_block`] for every value within the field widths.
/// Opcode bits that name no operation are rejected; blocks handed to this
/// function come off the wire, so a bad opcode means a corrupt or
/// misframed exchange.
pub fn decode_block(raw: u64) -> Result<CommandBlock> {
    let opcode_bits = ((raw >> OPCODE_SHIFT) & OPCODE_MASK) as u8;
    let opcode = Opcode::from_bits(opcode_bits).ok_or_else(|| {
        SectorFsError::Protocol(format!("Unknown opcode bits: 0x{:x}", opcode_bits))
    })?;

    let sector = ((raw >> SECTOR_SHIFT) & SECTOR_MASK) as u16;
    let track = ((raw >> TRACK_SHIFT) & TRACK_MASK) as u32;
    let status = if (raw >> STATUS_SHIFT) & STATUS_MASK == 0 {
        OpStatus::Success
    } else {
        OpStatus::Failure
    };

    Ok(CommandBlock {
        opcode,
        sector,
        track,
        status,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one command block to a stream in network byte order
pub fn write_block<W: Write>(writer: &mut W, block: &CommandBlock) -> Result<()> {
    writer.write_all(&encode_block(block).to_be_bytes())?;
    Ok(())
}

/// Read one command block from a stream
///
/// Blocks until all 8 bytes have arrived; a short read is an error.
pub fn read_block<R: Read>(reader: &mut R) -> Result<CommandBlock> {
    let mut raw = [0u8; 8];
    reader.read_exact(&mut raw)?;
    decode_block(u64::from_be_bytes(raw))
}

/// Write exactly one sector of payload to a stream
pub fn write_payload<W: Write>(writer: &mut W, payload: &SectorBuf) -> Result<()> {
    writer.write_all(payload)?;
    Ok(())
}

/// Read exactly one sector of payload from a stream
pub fn read_payload<R: Read>(reader: &mut R) -> Result<SectorBuf> {
    let mut payload = [0u8; SECTOR_SIZE];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}
