//! # Locators
//!
//! A locator points to a byte range on storage. The variant is multiplexed
//! onto the sign of the leading 4-byte head, like frames do with their size
//! prefix:
//!
//! ```text
//! inline:  [ u32 bytes_on_storage ][ u64 position ]          (head ≥ 0)
//! URL:     [ i32 -(0x02 << 24 | len) ][ len raw bytes ]      (head < 0)
//! ```
//!
//! The high byte of the negated head carries the locator type tag; `0x02` is
//! the URL form and currently the only tagged form. Inline
//! `bytes_on_storage` must leave the sign bit clear, and URL lengths are
//! capped at 24 bits, so magnitudes never collide with the sign multiplex.

use eyre::{bail, ensure, Result};

use crate::descriptor::Locator;

use super::emitter::Emitter;
use super::primitive;

const URL_TAG: u8 = 0x02;
const MAX_URL_LEN: usize = 1 << 24;

pub fn encode_locator(locator: &Locator, em: &mut Emitter<'_>) -> Result<()> {
    match locator {
        Locator::Url(url) => {
            ensure!(url.len() < MAX_URL_LEN, "locator too large");
            let head = -(((URL_TAG as i32) << 24) | url.len() as i32);
            em.put_i32(head);
            em.put_bytes(url.as_bytes());
        }
        Locator::Inline {
            bytes_on_storage,
            position,
        } => {
            ensure!((*bytes_on_storage as i32) >= 0, "locator too large");
            em.put_u32(*bytes_on_storage);
            em.put_u64(*position);
        }
    }
    Ok(())
}

pub fn decode_locator(buf: &[u8]) -> Result<(Locator, usize)> {
    ensure!(buf.len() >= 4, "buffer too short");
    let (head, mut consumed) = primitive::decode_i32(buf)?;

    if head < 0 {
        let magnitude = -(head as i64);
        let tag = (magnitude >> 24) as u8;
        if tag != URL_TAG {
            bail!("unsupported locator type: {}", tag);
        }
        let len = (magnitude & 0x00FF_FFFF) as usize;
        ensure!(buf.len() - consumed >= len, "buffer too short");
        let url = String::from_utf8_lossy(&buf[consumed..consumed + len]).into_owned();
        consumed += len;
        Ok((Locator::Url(url), consumed))
    } else {
        let (position, n) = primitive::decode_u64(&buf[consumed..])?;
        consumed += n;
        Ok((
            Locator::Inline {
                bytes_on_storage: head as u32,
                position,
            },
            consumed,
        ))
    }
}
