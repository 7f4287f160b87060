//! Command block definitions
//!
//! Represents one request or response envelope of the wire protocol.

/// Operation codes carried in the top 4 bits of a command block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Mount = 0x0,
    SeekTrack = 0x1,
    ReadSector = 0x2,
    WriteSector = 0x3,
    Unmount = 0x4,
}

impl Opcode {
    /// Map raw opcode bits back to an opcode, if they name one
    pub fn from_bits(bits: u8) -> Option<Opcode> {
        match bits {
            0x0 => Some(Opcode::Mount),
            0x1 => Some(Opcode::SeekTrack),
            0x2 => Some(Opcode::ReadSector),
            0x3 => Some(Opcode::WriteSector),
            0x4 => Some(Opcode::Unmount),
            _ => None,
        }
    }

    /// Whether a request with this opcode carries a sector payload
    pub fn sends_payload(self) -> bool {
        matches!(self, Opcode::WriteSector)
    }

    /// Whether the reply to this opcode carries a sector payload
    pub fn expects_payload(self) -> bool {
        matches!(self, Opcode::ReadSector)
    }
}

/// Status bit written by the server into every reply block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpStatus {
    Success = 0,
    Failure = 1,
}

/// A decoded command block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBlock {
    /// Operation code
    pub opcode: Opcode,

    /// Sector number (meaningful for RDSECT/WRSECT)
    pub sector: u16,

    /// Track number (meaningful for TSEEK)
    pub track: u32,

    /// Server result status; always Success on requests
    pub status: OpStatus,
}

impl CommandBlock {
    /// Build a request block; the status bit starts clear
    pub fn request(opcode: Opcode, sector: u16, track: u32) -> Self {
        Self {
            opcode,
            sector,
            track,
            status: OpStatus::Success,
        }
    }

    /// True if the server flagged this block as a failure
    pub fn is_failure(&self) -> bool {
        self.status == OpStatus::Failure
    }
}
