//! Fuzz testing for the compound record decoders.
//!
//! Locators, envelope links, cluster summaries, cluster groups, and feature
//! flag lists all multiplex their wire shape onto sign bits; this target
//! checks that hostile combinations of signs and lengths never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use colstore::encoding::{decode_feature_flags, decode_locator};
use colstore::serializer::{
    decode_cluster_group, decode_cluster_summary, decode_column_type, decode_envelope_link,
    decode_field_structure,
};

fuzz_target!(|data: &[u8]| {
    let _ = decode_locator(data);
    let _ = decode_envelope_link(data);
    let _ = decode_cluster_summary(data);
    let _ = decode_cluster_group(data);
    let _ = decode_feature_flags(data);
    let _ = decode_column_type(data);
    let _ = decode_field_structure(data);
});
