//! Codec Tests
//!
//! Tests for command block encoding/decoding and the stream helpers.

use std::io::Cursor;

use sectorfs::geometry::SECTOR_SIZE;
use sectorfs::protocol::{
    decode_block, encode_block, read_block, read_payload, write_block, write_payload,
    CommandBlock, Opcode, OpStatus,
};

const ALL_OPCODES: [Opcode; 5] = [
    Opcode::Mount,
    Opcode::SeekTrack,
    Opcode::ReadSector,
    Opcode::WriteSector,
    Opcode::Unmount,
];

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_all_opcodes() {
    for opcode in ALL_OPCODES {
        let block = CommandBlock::request(opcode, 0x1234, 0xDEADBEEF);
        let decoded = decode_block(encode_block(&block)).unwrap();
        assert_eq!(decoded, block);
    }
}

#[test]
fn test_round_trip_field_boundaries() {
    for sector in [0u16, 1, 0x7FFF, u16::MAX] {
        for track in [0u32, 1, 0x8000_0000, u32::MAX] {
            for status in [OpStatus::Success, OpStatus::Failure] {
                let block = CommandBlock {
                    opcode: Opcode::ReadSector,
                    sector,
                    track,
                    status,
                };
                let decoded = decode_block(encode_block(&block)).unwrap();
                assert_eq!(decoded, block);
            }
        }
    }
}

#[test]
fn test_round_trip_status_bit() {
    let mut block = CommandBlock::request(Opcode::WriteSector, 7, 9);
    block.status = OpStatus::Failure;
    let decoded = decode_block(encode_block(&block)).unwrap();
    assert_eq!(decoded.status, OpStatus::Failure);
    assert!(decoded.is_failure());
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_packed_fields() {
    // opcode 0x3 at bit 60, sector 0x0102 at bit 44, track 0x03040506 at
    // bit 12, status 1 at bit 11
    let block = CommandBlock {
        opcode: Opcode::WriteSector,
        sector: 0x0102,
        track: 0x03040506,
        status: OpStatus::Failure,
    };
    assert_eq!(encode_block(&block), 0x3010_2030_4050_6800);
}

#[test]
fn test_wire_format_mount_is_zero() {
    // MOUNT has opcode 0 and all other request fields zero
    let block = CommandBlock::request(Opcode::Mount, 0, 0);
    assert_eq!(encode_block(&block), 0);
}

#[test]
fn test_reserved_bits_always_zero() {
    let block = CommandBlock {
        opcode: Opcode::Unmount,
        sector: u16::MAX,
        track: u32::MAX,
        status: OpStatus::Failure,
    };
    // Low 11 bits are reserved
    assert_eq!(encode_block(&block) & 0x7FF, 0);
}

#[test]
fn test_decode_ignores_reserved_bits() {
    let block = CommandBlock::request(Opcode::SeekTrack, 3, 42);
    let raw = encode_block(&block) | 0x7FF;
    assert_eq!(decode_block(raw).unwrap(), block);
}

#[test]
fn test_decode_unknown_opcode() {
    let raw = 0xFu64 << 60;
    let result = decode_block(raw);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown opcode"));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_write_read_block() {
    let block = CommandBlock::request(Opcode::ReadSector, 17, 5);

    let mut buffer = Vec::new();
    write_block(&mut buffer, &block).unwrap();
    assert_eq!(buffer.len(), 8);

    let mut cursor = Cursor::new(buffer);
    let decoded = read_block(&mut cursor).unwrap();
    assert_eq!(decoded, block);
}

#[test]
fn test_stream_block_is_big_endian() {
    let block = CommandBlock::request(Opcode::WriteSector, 0x0102, 0x03040506);

    let mut buffer = Vec::new();
    write_block(&mut buffer, &block).unwrap();

    // Most significant byte first on the wire
    assert_eq!(buffer, 0x3010_2030_4050_6000u64.to_be_bytes());
    assert_eq!(buffer[0], 0x30);
}

#[test]
fn test_stream_write_read_payload() {
    let mut payload = [0u8; SECTOR_SIZE];
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }

    let mut buffer = Vec::new();
    write_payload(&mut buffer, &payload).unwrap();
    assert_eq!(buffer.len(), SECTOR_SIZE);

    let mut cursor = Cursor::new(buffer);
    let decoded = read_payload(&mut cursor).unwrap();
    assert_eq!(decoded[..], payload[..]);
}

#[test]
fn test_stream_short_block_fails() {
    let mut cursor = Cursor::new(vec![0u8; 4]);
    assert!(read_block(&mut cursor).is_err());
}

#[test]
fn test_stream_short_payload_fails() {
    let mut cursor = Cursor::new(vec![0u8; SECTOR_SIZE - 1]);
    assert!(read_payload(&mut cursor).is_err());
}
