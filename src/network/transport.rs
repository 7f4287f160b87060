//! Transport
//!
//! Owns the connection to the storage server and performs blocking
//! request/response exchanges of command blocks and sector payloads.

use std::net::TcpStream;

use bytes::{BufMut, BytesMut};
use std::io::Write;

use crate::error::{Result, SectorFsError};
use crate::geometry::SectorBuf;
use crate::protocol::{
    encode_block, read_block, read_payload, CommandBlock, Opcode,
};

/// Blocking request/response transport over one TCP connection
pub struct Transport {
    /// Live connection, if any
    stream: Option<TcpStream>,

    /// Server address
    addr: String,

    /// Server port
    port: u16,
}

impl Transport {
    /// Create an unconnected transport aimed at the given server
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            stream: None,
            addr: addr.into(),
            port,
        }
    }

    /// Whether a connection is currently open
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the connection to the server
    ///
    /// Calling this while already connected reuses the existing
    /// connection; there is no reconnection logic.
    pub fn connect(&mut self) -> Result<()> {
        if self.stream.is_some() {
            tracing::debug!("Already connected to {}:{}, reusing", self.addr, self.port);
            return Ok(());
        }

        let stream = TcpStream::connect((self.addr.as_str(), self.port))?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        tracing::debug!("Connected to storage server at {}:{}", self.addr, self.port);
        self.stream = Some(stream);
        Ok(())
    }

    /// Tear down the connection
    ///
    /// Closing while not connected is an error, not a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.stream.take() {
            Some(_) => {
                tracing::debug!("Closed connection to {}:{}", self.addr, self.port);
                Ok(())
            }
            None => Err(SectorFsError::NotConnected),
        }
    }

    /// Perform one blocking request/response exchange
    ///
    /// Writes the block (and, for WRSECT, exactly one sector payload) as a
    /// single frame, then reads back one result block. A failure status in
    /// the reply surfaces as `ServerFailure` before any payload is read;
    /// on success the reply to RDSECT is followed by one sector payload.
    pub fn exchange(
        &mut self,
        block: CommandBlock,
        payload: Option<&SectorBuf>,
    ) -> Result<(CommandBlock, Option<SectorBuf>)> {
        let stream = self.stream.as_mut().ok_or(SectorFsError::NotConnected)?;

        // Assemble the full request frame before touching the socket
        let mut frame = BytesMut::with_capacity(8 + payload.map_or(0, |p| p.len()));
        frame.put_u64(encode_block(&block));
        if block.opcode.sends_payload() {
            let data = payload.ok_or_else(|| {
                SectorFsError::Protocol("WRSECT requires a sector payload".to_string())
            })?;
            frame.put_slice(data);
        }

        tracing::trace!(opcode = ?block.opcode, sector = block.sector, track = block.track,
            "Sending command block");
        stream.write_all(&frame)?;
        stream.flush()?;

        // One result block always comes back
        let reply = read_block(stream)?;
        if reply.is_failure() {
            tracing::warn!(opcode = ?block.opcode, "Server reported failure");
            return Err(SectorFsError::ServerFailure {
                opcode: block.opcode,
            });
        }

        // A successful RDSECT reply carries the sector contents
        let reply_payload = if block.opcode.expects_payload() {
            Some(read_payload(stream)?)
        } else {
            None
        };

        Ok((reply, reply_payload))
    }

    // =========================================================================
    // Per-opcode helpers used by the driver
    // =========================================================================

    /// Issue a MOUNT exchange
    pub fn mount(&mut self) -> Result<()> {
        self.exchange(CommandBlock::request(Opcode::Mount, 0, 0), None)?;
        Ok(())
    }

    /// Issue an UMOUNT exchange
    pub fn unmount(&mut self) -> Result<()> {
        self.exchange(CommandBlock::request(Opcode::Unmount, 0, 0), None)?;
        Ok(())
    }

    /// Seek the head to the given track
    pub fn seek_track(&mut self, track: u32) -> Result<()> {
        self.exchange(CommandBlock::request(Opcode::SeekTrack, 0, track), None)?;
        Ok(())
    }

    /// Read one sector on the current track
    pub fn read_sector(&mut self, sector: u16) -> Result<SectorBuf> {
        let (_, payload) =
            self.exchange(CommandBlock::request(Opcode::ReadSector, sector, 0), None)?;
        payload.ok_or_else(|| {
            SectorFsError::Protocol("RDSECT reply missing sector payload".to_string())
        })
    }

    /// Write one sector on the current track
    pub fn write_sector(&mut self, sector: u16, data: &SectorBuf) -> Result<()> {
        self.exchange(
            CommandBlock::request(Opcode::WriteSector, sector, 0),
            Some(data),
        )?;
        Ok(())
    }
}
