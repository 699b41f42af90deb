//! # Envelopes
//!
//! An envelope is the outer versioned, CRC-protected byte container of the
//! format. Header, page-list, per-cluster, and footer sections each live in
//! their own envelope.
//!
//! ## Layout
//!
//! ```text
//! +---------------------+---------------------+-------------+-------------+
//! | version_at_write    | version_min_required| payload     | CRC-32      |
//! | (u16, LE)           | (u16, LE)           | (frames...) | (u32, LE)   |
//! +---------------------+---------------------+-------------+-------------+
//! ```
//!
//! The trailing checksum covers the preamble and the payload. Currently every
//! envelope carries the same version pair (1, 1); different envelope kinds
//! may diverge in later format revisions.
//!
//! ## Version Gating
//!
//! On read, `version_at_write < 1` fails as too old and
//! `version_min_required > ENVELOPE_CURRENT_VERSION` fails as too new. A
//! writer at version N thereby stays readable by any reader whose current
//! version is at least the written `version_min_required`.

use eyre::{ensure, Result};
use zerocopy::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::emitter::Emitter;
use super::primitive;

/// Version stamped into every envelope this writer produces.
pub const ENVELOPE_CURRENT_VERSION: u16 = 1;
/// Minimum reader version required for envelopes this writer produces.
pub const ENVELOPE_MIN_VERSION: u16 = 1;

/// Preamble bytes: two version words.
pub const ENVELOPE_PREAMBLE_SIZE: usize = 4;
/// Smallest well-formed envelope: preamble plus trailing CRC-32.
pub const ENVELOPE_MIN_SIZE: usize = 8;

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
struct EnvelopePreamble {
    version_at_write: U16,
    version_min_required: U16,
}

const _: () = assert!(std::mem::size_of::<EnvelopePreamble>() == ENVELOPE_PREAMBLE_SIZE);

/// Emits the version preamble. Returns the envelope start offset.
pub fn envelope_preamble(em: &mut Emitter<'_>) -> usize {
    let start = em.pos();
    let preamble = EnvelopePreamble {
        version_at_write: U16::new(ENVELOPE_CURRENT_VERSION),
        version_min_required: U16::new(ENVELOPE_MIN_VERSION),
    };
    em.put_bytes(preamble.as_bytes());
    start
}

/// Appends the CRC-32 over the envelope emitted since `envelope_start`.
///
/// Returns the checksum in the emit pass, `None` in the sizing pass.
pub fn envelope_postscript(em: &mut Emitter<'_>, envelope_start: usize) -> Option<u32> {
    em.put_crc32_over(envelope_start)
}

/// Verifies and version-gates an envelope, returning the preamble bytes
/// consumed. `buf` must span the whole envelope including the trailing CRC.
pub fn decode_envelope(buf: &[u8]) -> Result<usize> {
    ensure!(buf.len() >= ENVELOPE_MIN_SIZE, "buffer too short");
    primitive::verify_crc32(buf, buf.len() - 4)?;

    let preamble = EnvelopePreamble::ref_from_bytes(&buf[..ENVELOPE_PREAMBLE_SIZE])
        .map_err(|e| eyre::eyre!("failed to parse envelope preamble: {:?}", e))?;

    let version_at_write = preamble.version_at_write.get();
    ensure!(
        version_at_write >= 1,
        "file format too old (version {})",
        version_at_write
    );

    let version_min_required = preamble.version_min_required.get();
    ensure!(
        version_min_required <= ENVELOPE_CURRENT_VERSION,
        "file format too new (version {})",
        version_min_required
    );

    Ok(ENVELOPE_PREAMBLE_SIZE)
}

/// Reads the trailing CRC-32 of an envelope without verifying it.
pub fn extract_envelope_crc32(buf: &[u8]) -> Result<u32> {
    ensure!(buf.len() >= ENVELOPE_MIN_SIZE, "buffer too short");
    let (checksum, _) = primitive::decode_u32(&buf[buf.len() - 4..])?;
    Ok(checksum)
}
