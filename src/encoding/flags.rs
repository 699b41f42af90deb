//! # Feature Flags
//!
//! A variable-length list of non-negative 64-bit flags, encoded with
//! sign-bit continuation: every flag but the last is emitted negated, the
//! last is emitted verbatim. A reader consumes `i64` words until one is
//! non-negative. The empty list is a single zero word.
//!
//! ```text
//! []        ->  00 * 8
//! [5]       ->  +5
//! [5, 9]    ->  -5, +9
//! ```
//!
//! The most significant bit of every flag is reserved for the continuation
//! and must not be set; negative input flags fail on write.

use eyre::{bail, ensure, Result};

use super::emitter::Emitter;
use super::primitive;

pub fn encode_feature_flags(flags: &[i64], em: &mut Emitter<'_>) -> Result<()> {
    if flags.is_empty() {
        em.put_i64(0);
        return Ok(());
    }

    for (i, &flag) in flags.iter().enumerate() {
        ensure!(flag >= 0, "feature flag out of bounds");
        if i == flags.len() - 1 {
            em.put_i64(flag);
        } else {
            em.put_i64(-flag);
        }
    }
    Ok(())
}

pub fn decode_feature_flags(buf: &[u8]) -> Result<(Vec<i64>, usize)> {
    let mut flags = Vec::new();
    let mut consumed = 0;

    loop {
        ensure!(buf.len() - consumed >= 8, "buffer too short");
        let (word, n) = primitive::decode_i64(&buf[consumed..])?;
        consumed += n;

        let Some(magnitude) = word.checked_abs() else {
            bail!("feature flag out of bounds");
        };
        flags.push(magnitude);

        if word >= 0 {
            break;
        }
    }

    Ok((flags, consumed))
}
