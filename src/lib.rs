//! # ColStore Format Codec
//!
//! Binary serializer/deserializer for the ColStore columnar tuple storage
//! format. The codec translates between an in-memory dataset descriptor (the
//! schema and layout metadata: fields, columns, clusters, and the byte
//! locators pointing at on-disk pages) and a stable on-disk byte stream of
//! envelopes and frames.
//!
//! ## Design Goals
//!
//! - **Self-describing grammar**: length-prefixed, CRC-protected envelopes
//!   and frames, parseable forward without a schema
//! - **Zero allocation on write**: serializers run a sizing pass and then
//!   emit into a caller-owned buffer
//! - **Stable physical ids**: fields, columns, and clusters get sequential
//!   on-disk identifiers assigned by a breadth-first traversal, decoupled
//!   from their in-memory handles
//!
//! ## Quick Start
//!
//! ```ignore
//! use colstore::descriptor::DatasetDescriptor;
//! use colstore::serializer;
//!
//! let desc: DatasetDescriptor = build_descriptor();
//!
//! let (_, size) = serializer::serialize_header(&desc, None)?;
//! let mut buf = vec![0u8; size as usize];
//! let (ctx, _) = serializer::serialize_header(&desc, Some(&mut buf))?;
//!
//! // ... emit page lists and clusters, register cluster groups on ctx ...
//!
//! let size = serializer::serialize_footer(&desc, &ctx, None)?;
//! let mut footer = vec![0u8; size as usize];
//! serializer::serialize_footer(&desc, &ctx, Some(&mut footer))?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   serializer (header/pages/footer,      │
//! │   context, tags, compound records)      │
//! ├─────────────────────────────────────────┤
//! │   encoding (envelopes, frames,          │
//! │   locators, flags, primitives)          │
//! ├─────────────────────────────────────────┤
//! │   descriptor (fields, columns,          │
//! │   clusters, page ranges)                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Compression, file I/O, and the writer/reader state machines live in the
//! storage layers above this crate; the codec only ever sees caller-owned
//! byte slices.
//!
//! ## Module Overview
//!
//! - [`descriptor`]: in-memory schema and layout metadata
//! - [`encoding`]: the schema-free wire grammar
//! - [`serializer`]: document-level serialization and physical id
//!   assignment

pub mod descriptor;
pub mod encoding;
pub mod serializer;

pub use descriptor::{DatasetDescriptor, DescriptorId, Locator};
pub use serializer::SerializationContext;
