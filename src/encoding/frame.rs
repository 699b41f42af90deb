//! # Record and List Frames
//!
//! Frames are the length-prefixed containers inside envelopes. The frame
//! variant is multiplexed onto the sign of the 4-byte size prefix:
//!
//! ```text
//! record frame:  [ i32 +size ][ payload ... ]
//! list frame:    [ i32 -size ][ u32 nitems ][ payload ... ]
//! ```
//!
//! A single signed read resolves both the variant and the length. `nitems`
//! uses the lower 28 bits; the upper 4 are reserved and masked off on read.
//!
//! ## Back-Patched Sizes
//!
//! A frame's size is not known until its payload has been emitted. The
//! preamble reserves the prefix slot holding a marker (`+1` record, `-1`
//! list); the postscript multiplies the marker by the final size in place.
//! In the sizing pass there is no slot to patch and the marker cannot be
//! read back, so the postscript only validates the size.
//!
//! ## Invariants
//!
//! - record frame size ≥ 4, list frame size ≥ 8
//! - frame size fits in `i32` (*frame-too-large* otherwise)
//! - `nitems < 2^28` on write (*list-frame-too-large* otherwise)

use eyre::{ensure, Result};

use super::emitter::Emitter;
use super::primitive;

/// Exclusive upper bound for list-frame item counts.
pub const MAX_LIST_ITEMS: u32 = 1 << 28;

const NITEMS_MASK: u32 = MAX_LIST_ITEMS - 1;

/// Decoded frame prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Total frame size in bytes, prefix included.
    pub size: u32,
    /// Item count; 1 for record frames.
    pub nitems: u32,
}

/// Reserves the size slot of a record frame. Returns the frame start offset.
pub fn record_frame_preamble(em: &mut Emitter<'_>) -> usize {
    let start = em.pos();
    // marker: final size is patched in with factor +1
    em.put_i32(1);
    start
}

/// Reserves the size slot and item count of a list frame.
/// Returns the frame start offset.
pub fn list_frame_preamble(em: &mut Emitter<'_>, nitems: u32) -> Result<usize> {
    ensure!(nitems < MAX_LIST_ITEMS, "list frame too large: {}", nitems);
    let start = em.pos();
    // marker: final size is patched in with factor -1
    em.put_i32(-1);
    em.put_u32(nitems);
    Ok(start)
}

/// Closes the frame opened at `frame_start` by patching its size prefix.
pub fn frame_postscript(em: &mut Emitter<'_>, frame_start: usize) -> Result<()> {
    let size = em.pos() - frame_start;
    let size = i32::try_from(size).map_err(|_| eyre::eyre!("frame too large: {}", size))?;
    ensure!(size >= 4, "frame too short: {}", size);
    if let Some(marker) = em.read_i32(frame_start) {
        ensure!(marker >= 0 || size >= 8, "frame too short: {}", size);
        em.patch_i32(frame_start, marker * size);
    }
    Ok(())
}

/// Reads a frame prefix, leaving the caller at the first payload byte.
///
/// Returns the decoded prefix and the number of header bytes consumed
/// (4 for record frames, 8 for list frames). Fails if the buffer is smaller
/// than the declared frame size.
pub fn decode_frame(buf: &[u8]) -> Result<(FrameInfo, usize)> {
    ensure!(buf.len() >= 4, "frame too short: {}", buf.len());
    let (head, mut consumed) = primitive::decode_i32(buf)?;

    let info = if head >= 0 {
        let size = head as u32;
        ensure!(size >= 4, "corrupt frame size");
        FrameInfo { size, nitems: 1 }
    } else {
        ensure!(buf.len() >= 8, "frame too short: {}", buf.len());
        let (raw_nitems, n) = primitive::decode_u32(&buf[consumed..])?;
        consumed += n;
        let size = (-(head as i64)) as u32;
        ensure!(size >= 8, "corrupt frame size");
        FrameInfo {
            size,
            nitems: raw_nitems & NITEMS_MASK,
        }
    };

    ensure!(buf.len() >= info.size as usize, "frame too short: {}", buf.len());
    Ok((info, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_frame_with_one_u32() {
        let mut buf = [0u8; 8];
        let mut em = Emitter::new(&mut buf);
        let frame = record_frame_preamble(&mut em);
        em.put_u32(0);
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(buf, [0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn list_frame_with_two_items_no_payload() {
        let mut buf = [0u8; 8];
        let mut em = Emitter::new(&mut buf);
        let frame = list_frame_preamble(&mut em, 2).unwrap();
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(buf, [0xF8, 0xFF, 0xFF, 0xFF, 0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn sizing_pass_counts_frame_bytes() {
        let mut em = Emitter::sizer();
        let frame = record_frame_preamble(&mut em);
        em.put_u64(0);
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(em.pos(), 12);

        let mut em = Emitter::sizer();
        let frame = list_frame_preamble(&mut em, 1000).unwrap();
        em.put_u16(0);
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(em.pos(), 10);
    }

    #[test]
    fn nitems_bounds() {
        let mut em = Emitter::sizer();
        assert!(list_frame_preamble(&mut em, MAX_LIST_ITEMS - 1).is_ok());
        let err = list_frame_preamble(&mut em, MAX_LIST_ITEMS).unwrap_err();
        assert!(err.to_string().contains("list frame too large"));
    }

    #[test]
    fn decode_record_frame() {
        let mut buf = [0u8; 12];
        let mut em = Emitter::new(&mut buf);
        let frame = record_frame_preamble(&mut em);
        em.put_u64(0xDEAD_BEEF);
        frame_postscript(&mut em, frame).unwrap();

        let (info, consumed) = decode_frame(&buf).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(info.size, 12);
        assert_eq!(info.nitems, 1);
    }

    #[test]
    fn decode_list_frame() {
        let mut buf = [0u8; 16];
        let mut em = Emitter::new(&mut buf);
        let frame = list_frame_preamble(&mut em, 2).unwrap();
        em.put_u32(1);
        em.put_u32(2);
        frame_postscript(&mut em, frame).unwrap();

        let (info, consumed) = decode_frame(&buf).unwrap();
        assert_eq!(consumed, 8);
        assert_eq!(info.size, 16);
        assert_eq!(info.nitems, 2);
    }

    #[test]
    fn decode_masks_reserved_nitems_bits() {
        // size -8, nitems with all four reserved bits set
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-8i32).to_le_bytes());
        buf.extend_from_slice(&0xF000_0005u32.to_le_bytes());

        let (info, _) = decode_frame(&buf).unwrap();
        assert_eq!(info.nitems, 5);
    }

    #[test]
    fn decode_rejects_truncated_input() {
        assert!(decode_frame(&[0x08, 0x00]).is_err());
        // declared record size exceeds the buffer
        assert!(decode_frame(&[0x10, 0x00, 0x00, 0x00]).is_err());
        // list frame with only the size prefix present
        assert!(decode_frame(&(-8i32).to_le_bytes()).is_err());
    }

    #[test]
    fn decode_rejects_corrupt_sizes() {
        // record frame claiming fewer bytes than its own prefix
        let err = decode_frame(&[0x02, 0x00, 0x00, 0x00]).unwrap_err();
        assert!(err.to_string().contains("corrupt frame size"));

        // list frame claiming fewer bytes than its own header
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-6i32).to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        let err = decode_frame(&buf).unwrap_err();
        assert!(err.to_string().contains("corrupt frame size"));
    }

    #[test]
    fn decode_handles_extreme_negative_head() {
        // i32::MIN head implies a 2 GiB frame; must fail cleanly, not overflow
        let mut buf = Vec::new();
        buf.extend_from_slice(&i32::MIN.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        assert!(decode_frame(&buf).is_err());
    }

    #[test]
    fn bare_record_frame_is_valid() {
        // a bare preamble is 4 bytes: valid for a record frame
        let mut buf = [0u8; 4];
        let mut em = Emitter::new(&mut buf);
        let frame = record_frame_preamble(&mut em);
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(buf, [0x04, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn bare_list_frame_is_valid() {
        // preamble plus item count is the 8-byte list minimum
        let mut buf = [0u8; 8];
        let mut em = Emitter::new(&mut buf);
        let frame = list_frame_preamble(&mut em, 0).unwrap();
        frame_postscript(&mut em, frame).unwrap();
        assert_eq!(buf, [0xF8, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]);
    }
}
