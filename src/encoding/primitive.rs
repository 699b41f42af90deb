//! # Primitive Wire Encoding
//!
//! Fixed-width little-endian integers, length-prefixed strings, and the
//! CRC-32 integrity tag. These are the leaves every other wire structure is
//! built from.
//!
//! ## Encoding Format
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `i16`/`u16` | 2 bytes, little-endian two's complement |
//! | `i32`/`u32` | 4 bytes, little-endian two's complement |
//! | `i64`/`u64` | 8 bytes, little-endian two's complement |
//! | string | `u32` byte length, then the raw bytes; no terminator |
//! | CRC-32 | 4 bytes, little-endian, zlib polynomial |
//!
//! Strings are byte-transparent: the codec performs no encoding validation
//! on write, and decodes with lossy UTF-8 conversion on read.
//!
//! ## Calling Convention
//!
//! - `encode_*` writes at the start of the slice and returns bytes written.
//!   The caller must size the buffer first; an undersized buffer is a
//!   programmer error and panics.
//! - `decode_*` validates remaining length before every read and returns
//!   `(value, bytes_consumed)`.

use crc::{Crc, CRC_32_ISO_HDLC};
use eyre::{ensure, Result};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32 of `data` with the format's fixed polynomial and initial state.
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

pub fn encode_i16(val: i16, buf: &mut [u8]) -> usize {
    buf[..2].copy_from_slice(&val.to_le_bytes());
    2
}

pub fn decode_i16(buf: &[u8]) -> Result<(i16, usize)> {
    ensure!(buf.len() >= 2, "buffer too short");
    Ok((i16::from_le_bytes([buf[0], buf[1]]), 2))
}

pub fn encode_u16(val: u16, buf: &mut [u8]) -> usize {
    encode_i16(val as i16, buf)
}

pub fn decode_u16(buf: &[u8]) -> Result<(u16, usize)> {
    let (val, n) = decode_i16(buf)?;
    Ok((val as u16, n))
}

pub fn encode_i32(val: i32, buf: &mut [u8]) -> usize {
    buf[..4].copy_from_slice(&val.to_le_bytes());
    4
}

pub fn decode_i32(buf: &[u8]) -> Result<(i32, usize)> {
    ensure!(buf.len() >= 4, "buffer too short");
    Ok((i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]), 4))
}

pub fn encode_u32(val: u32, buf: &mut [u8]) -> usize {
    encode_i32(val as i32, buf)
}

pub fn decode_u32(buf: &[u8]) -> Result<(u32, usize)> {
    let (val, n) = decode_i32(buf)?;
    Ok((val as u32, n))
}

pub fn encode_i64(val: i64, buf: &mut [u8]) -> usize {
    buf[..8].copy_from_slice(&val.to_le_bytes());
    8
}

pub fn decode_i64(buf: &[u8]) -> Result<(i64, usize)> {
    ensure!(buf.len() >= 8, "buffer too short");
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[..8]);
    Ok((i64::from_le_bytes(bytes), 8))
}

pub fn encode_u64(val: u64, buf: &mut [u8]) -> usize {
    encode_i64(val as i64, buf)
}

pub fn decode_u64(buf: &[u8]) -> Result<(u64, usize)> {
    let (val, n) = decode_i64(buf)?;
    Ok((val as u64, n))
}

/// Bytes a string occupies on the wire: 4-byte length prefix plus content.
pub fn string_wire_len(val: &str) -> usize {
    4 + val.len()
}

pub fn encode_string(val: &str, buf: &mut [u8]) -> usize {
    let n = encode_u32(val.len() as u32, buf);
    buf[n..n + val.len()].copy_from_slice(val.as_bytes());
    n + val.len()
}

pub fn decode_string(buf: &[u8]) -> Result<(String, usize)> {
    let (length, n) = decode_u32(buf)?;
    let length = length as usize;
    ensure!(buf.len() - n >= length, "buffer too short");
    let val = String::from_utf8_lossy(&buf[n..n + length]).into_owned();
    Ok((val, n + length))
}

/// Writes the CRC-32 of `data` into `buf` and returns 4.
pub fn encode_crc32(data: &[u8], buf: &mut [u8]) -> usize {
    encode_u32(crc32(data), buf)
}

/// Expects a CRC-32 in the 4 bytes following `data[..length]` and verifies it.
pub fn verify_crc32(data: &[u8], length: usize) -> Result<()> {
    ensure!(data.len() >= length + 4, "buffer too short");
    let expected = crc32(&data[..length]);
    let (found, _) = decode_u32(&data[length..])?;
    ensure!(found == expected, "CRC32 checksum mismatch");
    Ok(())
}
