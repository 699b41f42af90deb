//! # Wire Encoding Module
//!
//! The self-describing, length-prefixed binary grammar of the format,
//! bottom-up:
//!
//! - **Primitives**: little-endian integers, length-prefixed strings, CRC-32
//! - **Emitter**: the two-phase (size, then emit) byte sink
//! - **Frames**: record and list containers with sign-multiplexed size
//!   prefixes
//! - **Envelopes**: versioned, CRC-protected outer containers
//! - **Locators**: inline byte ranges or tagged URLs
//! - **Feature flags**: sign-bit-continuation flag lists
//!
//! Everything here is schema-free: a reader can walk frames and envelopes
//! forward without knowing the dataset they describe.

pub mod emitter;
pub mod envelope;
pub mod flags;
pub mod frame;
pub mod locator;
pub mod primitive;

pub use emitter::Emitter;
pub use envelope::{
    decode_envelope, envelope_postscript, envelope_preamble, extract_envelope_crc32,
    ENVELOPE_CURRENT_VERSION, ENVELOPE_MIN_VERSION,
};
pub use flags::{decode_feature_flags, encode_feature_flags};
pub use frame::{
    decode_frame, frame_postscript, list_frame_preamble, record_frame_preamble, FrameInfo,
    MAX_LIST_ITEMS,
};
pub use locator::{decode_locator, encode_locator};
