//! # Field Codec
//!
//! Converts between the textual field values callers work with and the
//! fixed-width bytes stored in heap records. Each field is written and read
//! one typed value at a time using the width table of `ColumnType`, so the
//! encoded size of a column never depends on its contents.
//!
//! ## Encoding Rules
//!
//! | Type | Text → bytes | Bytes → text |
//! |------|--------------|--------------|
//! | Int32 / Int64 / ForeignKey | leading base-10 integer, 0 if none | decimal |
//! | Float / Double | decimal parse of trimmed text, 0 if malformed | shortest round-trip decimal |
//! | Char | at most `array_size` bytes, cut on a char boundary, zero padded | bytes up to the first zero |
//!
//! Numeric columns with `array_size > 0` store the scalar in the first unit
//! and zero-fill the remaining units.
//!
//! ## Malformed Input
//!
//! Unparsable numeric text is not an error: it is stored as the type's zero
//! value. A `debug` event is emitted so bulk loads can be audited.

use tracing::debug;

use crate::schema::{ColumnType, SchemaColumn};

/// Appends the encoding of `text` for `column` to `out`.
///
/// Always appends exactly `column.size()` bytes.
pub fn encode_field(column: &SchemaColumn, text: &str, out: &mut Vec<u8>) {
    let width = column.size();
    let start = out.len();

    match column.column_type {
        ColumnType::Int32 => {
            let value = parse_integer(column, text) as i32;
            out.extend_from_slice(&value.to_le_bytes());
        }
        ColumnType::Int64 | ColumnType::ForeignKey => {
            let value = parse_integer(column, text);
            out.extend_from_slice(&value.to_le_bytes());
        }
        ColumnType::Float => {
            let value = parse_float(column, text) as f32;
            out.extend_from_slice(&value.to_le_bytes());
        }
        ColumnType::Double => {
            let value = parse_float(column, text);
            out.extend_from_slice(&value.to_le_bytes());
        }
        ColumnType::Char => {
            let max_len = column.array_size as usize;
            let mut end = text.len().min(max_len);
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            out.extend_from_slice(&text.as_bytes()[..end]);
        }
    }

    out.resize(start + width, 0);
}

/// Encodes the identity column directly, without a text round trip.
pub fn encode_id(id: i64, out: &mut Vec<u8>) {
    out.extend_from_slice(&id.to_le_bytes());
}

/// Decodes one field from exactly `column.size()` bytes.
pub fn decode_field(column: &SchemaColumn, bytes: &[u8]) -> String {
    debug_assert_eq!(bytes.len(), column.size());

    match column.column_type {
        ColumnType::Int32 => i32::from_le_bytes(unit::<4>(bytes)).to_string(),
        ColumnType::Int64 | ColumnType::ForeignKey => {
            i64::from_le_bytes(unit::<8>(bytes)).to_string()
        }
        ColumnType::Float => f32::from_le_bytes(unit::<4>(bytes)).to_string(),
        ColumnType::Double => f64::from_le_bytes(unit::<8>(bytes)).to_string(),
        ColumnType::Char => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        }
    }
}

/// Reads the id stored in the first 8 bytes of a record's field section.
pub fn decode_id(bytes: &[u8]) -> i64 {
    i64::from_le_bytes(unit::<8>(bytes))
}

fn unit<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[..N]);
    buf
}

fn parse_integer(column: &SchemaColumn, text: &str) -> i64 {
    let trimmed = text.trim();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    let parsed = if digits_len == 0 {
        None
    } else {
        trimmed[..digits_start + digits_len].parse::<i64>().ok()
    };

    match parsed {
        Some(value) if column.column_type != ColumnType::Int32 => value,
        Some(value) if i32::try_from(value).is_ok() => value,
        _ => {
            debug!(column = %column.name, input = text, "malformed integer coerced to 0");
            0
        }
    }
}

fn parse_float(column: &SchemaColumn, text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            debug!(column = %column.name, input = text, "malformed float coerced to 0");
            0.0
        }
    }
}
