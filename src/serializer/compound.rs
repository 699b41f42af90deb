//! # Compound Wire Records
//!
//! The frame-wrapped records shared by the footer and the page-list
//! envelopes: envelope links, cluster summaries, and cluster groups.
//!
//! ## Cluster Summary Encoding
//!
//! The summary reuses the sign multiplex for its optional column-group id:
//! a negated `n_entries` announces that a `u32` column-group id follows,
//! a plain `n_entries` means the summary covers all columns
//! (`column_group_id = -1`).
//!
//! ```text
//! all columns:   [frame][ u64 first_entry ][ i64 +n_entries ]
//! column group:  [frame][ u64 first_entry ][ i64 -n_entries ][ u32 group ]
//! ```

use eyre::{ensure, Result};

use crate::descriptor::Locator;
use crate::encoding::{
    decode_frame, decode_locator, encode_locator, frame_postscript, primitive,
    record_frame_preamble, Emitter,
};

/// Link to another envelope, stored (possibly compressed) elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvelopeLink {
    pub unzipped_size: u32,
    pub locator: Locator,
}

/// Entry extent of one cluster, as recorded in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSummary {
    pub first_entry: u64,
    pub n_entries: u64,
    /// -1 covers all columns; ≥ 0 names a column group.
    pub column_group_id: i32,
}

/// A set of clusters sharing one page-list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterGroup {
    pub n_clusters: u32,
    pub page_list: EnvelopeLink,
}

pub fn encode_envelope_link(link: &EnvelopeLink, em: &mut Emitter<'_>) -> Result<()> {
    em.put_u32(link.unzipped_size);
    encode_locator(&link.locator, em)
}

pub fn decode_envelope_link(buf: &[u8]) -> Result<(EnvelopeLink, usize)> {
    let (unzipped_size, mut consumed) = primitive::decode_u32(buf)?;
    let (locator, n) = decode_locator(&buf[consumed..])?;
    consumed += n;
    Ok((
        EnvelopeLink {
            unzipped_size,
            locator,
        },
        consumed,
    ))
}

pub fn encode_cluster_summary(summary: &ClusterSummary, em: &mut Emitter<'_>) -> Result<()> {
    let frame = record_frame_preamble(em);
    em.put_u64(summary.first_entry);
    if summary.column_group_id >= 0 {
        em.put_i64(-(summary.n_entries as i64));
        em.put_u32(summary.column_group_id as u32);
    } else {
        em.put_i64(summary.n_entries as i64);
    }
    frame_postscript(em, frame)
}

/// Decodes a cluster summary, consuming its whole frame.
pub fn decode_cluster_summary(buf: &[u8]) -> Result<(ClusterSummary, usize)> {
    let (info, header) = decode_frame(buf)?;
    let body = &buf[header..info.size as usize];
    ensure!(body.len() >= 16, "cluster summary too short");

    let (first_entry, mut offset) = primitive::decode_u64(body)?;
    let (n_entries, n) = primitive::decode_i64(&body[offset..])?;
    offset += n;

    let summary = if n_entries < 0 {
        ensure!(body.len() - offset >= 4, "cluster summary too short");
        let (column_group_id, _) = primitive::decode_u32(&body[offset..])?;
        ClusterSummary {
            first_entry,
            n_entries: n_entries.unsigned_abs(),
            column_group_id: column_group_id as i32,
        }
    } else {
        ClusterSummary {
            first_entry,
            n_entries: n_entries as u64,
            column_group_id: -1,
        }
    };

    Ok((summary, info.size as usize))
}

pub fn encode_cluster_group(group: &ClusterGroup, em: &mut Emitter<'_>) -> Result<()> {
    let frame = record_frame_preamble(em);
    em.put_u32(group.n_clusters);
    encode_envelope_link(&group.page_list, em)?;
    frame_postscript(em, frame)
}

/// Decodes a cluster group, consuming its whole frame.
pub fn decode_cluster_group(buf: &[u8]) -> Result<(ClusterGroup, usize)> {
    let (info, header) = decode_frame(buf)?;
    let body = &buf[header..info.size as usize];
    ensure!(body.len() >= 4, "cluster group too short");

    let (n_clusters, offset) = primitive::decode_u32(body)?;
    let (page_list, _) = decode_envelope_link(&body[offset..])?;

    Ok((
        ClusterGroup {
            n_clusters,
            page_list,
        },
        info.size as usize,
    ))
}
