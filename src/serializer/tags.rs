//! # Stable On-Disk Tags
//!
//! The wire numbering of [`ColumnType`] and [`FieldStructure`] is fixed here,
//! separate from the enums themselves, so that extending or reordering the
//! in-memory enums can never silently shift the on-disk format.
//!
//! | Column type | Tag | Field structure | Tag |
//! |---|---|---|---|
//! | Index | 0x02 | Leaf | 0x00 |
//! | Switch | 0x03 | Collection | 0x01 |
//! | Bit | 0x06 | Record | 0x02 |
//! | Real64 | 0x07 | Variant | 0x03 |
//! | Real32 | 0x08 | Reference | 0x04 |
//! | Real16 | 0x09 | | |
//! | Int64 | 0x0A | | |
//! | Int32 | 0x0B | | |
//! | Int16 | 0x0C | | |
//! | Byte | 0x0D | | |
//!
//! Tags 0x00, 0x01, 0x04, 0x05 of the column table belonged to withdrawn
//! prototype types and stay unassigned. Unknown tags fail on read.

use eyre::{bail, Result};

use crate::descriptor::{ColumnType, FieldStructure};
use crate::encoding::{primitive, Emitter};

pub fn column_type_tag(column_type: ColumnType) -> u16 {
    match column_type {
        ColumnType::Index => 0x02,
        ColumnType::Switch => 0x03,
        ColumnType::Bit => 0x06,
        ColumnType::Real64 => 0x07,
        ColumnType::Real32 => 0x08,
        ColumnType::Real16 => 0x09,
        ColumnType::Int64 => 0x0A,
        ColumnType::Int32 => 0x0B,
        ColumnType::Int16 => 0x0C,
        ColumnType::Byte => 0x0D,
    }
}

pub fn encode_column_type(column_type: ColumnType, em: &mut Emitter<'_>) {
    em.put_u16(column_type_tag(column_type));
}

pub fn decode_column_type(buf: &[u8]) -> Result<(ColumnType, usize)> {
    let (tag, consumed) = primitive::decode_u16(buf)?;
    let column_type = match tag {
        0x02 => ColumnType::Index,
        0x03 => ColumnType::Switch,
        0x06 => ColumnType::Bit,
        0x07 => ColumnType::Real64,
        0x08 => ColumnType::Real32,
        0x09 => ColumnType::Real16,
        0x0A => ColumnType::Int64,
        0x0B => ColumnType::Int32,
        0x0C => ColumnType::Int16,
        0x0D => ColumnType::Byte,
        _ => bail!("unexpected on-disk column type: {:#04x}", tag),
    };
    Ok((column_type, consumed))
}

pub fn field_structure_tag(structure: FieldStructure) -> u16 {
    match structure {
        FieldStructure::Leaf => 0x00,
        FieldStructure::Collection => 0x01,
        FieldStructure::Record => 0x02,
        FieldStructure::Variant => 0x03,
        FieldStructure::Reference => 0x04,
    }
}

pub fn encode_field_structure(structure: FieldStructure, em: &mut Emitter<'_>) {
    em.put_u16(field_structure_tag(structure));
}

pub fn decode_field_structure(buf: &[u8]) -> Result<(FieldStructure, usize)> {
    let (tag, consumed) = primitive::decode_u16(buf)?;
    let structure = match tag {
        0x00 => FieldStructure::Leaf,
        0x01 => FieldStructure::Collection,
        0x02 => FieldStructure::Record,
        0x03 => FieldStructure::Variant,
        0x04 => FieldStructure::Reference,
        _ => bail!("unexpected on-disk field structure: {:#04x}", tag),
    };
    Ok((structure, consumed))
}
