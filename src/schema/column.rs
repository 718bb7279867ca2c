//! # Column Types and Definitions
//!
//! Every column has a fixed on-disk width, so a record of a given schema is
//! always the same size and rows can be addressed by byte offset.
//!
//! ## Unit Widths
//!
//! | Type | Unit (bytes) | Encoding |
//! |------|--------------|----------|
//! | Int32 | 4 | i32 little-endian |
//! | Float | 4 | f32 little-endian |
//! | Int64 | 8 | i64 little-endian |
//! | ForeignKey | 8 | i64 little-endian |
//! | Double | 8 | f64 little-endian |
//! | Char | 1 | raw bytes, zero padded |
//!
//! Column width is `unit * (array_size + 1)`. Numeric columns normally use
//! `array_size = 0`; character columns use the maximum string length, the
//! extra unit being the terminator slot.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int32,
    Int64,
    Char,
    Float,
    Double,
    ForeignKey,
}

impl ColumnType {
    /// Width of a single storage unit of this type.
    pub fn unit_width(&self) -> usize {
        match self {
            ColumnType::Int32 | ColumnType::Float => 4,
            ColumnType::Int64 | ColumnType::ForeignKey | ColumnType::Double => 8,
            ColumnType::Char => 1,
        }
    }

    /// Resolves the lowercase type names used by schema descriptions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "int32" => Some(ColumnType::Int32),
            "int64" => Some(ColumnType::Int64),
            "char" => Some(ColumnType::Char),
            "float" => Some(ColumnType::Float),
            "double" => Some(ColumnType::Double),
            "foreign_key" => Some(ColumnType::ForeignKey),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Char => "char",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::ForeignKey => "foreign_key",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    pub name: String,
    pub column_type: ColumnType,
    pub array_size: u32,
}

impl SchemaColumn {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self::with_array_size(name, column_type, 0)
    }

    /// A character column holding at most `max_len` bytes.
    pub fn new_char(name: impl Into<String>, max_len: u32) -> Self {
        Self::with_array_size(name, ColumnType::Char, max_len)
    }

    pub fn with_array_size(name: impl Into<String>, column_type: ColumnType, array_size: u32) -> Self {
        Self {
            name: name.into(),
            column_type,
            array_size,
        }
    }

    /// Encoded width of this column in bytes.
    pub fn size(&self) -> usize {
        self.column_type.unit_width() * (self.array_size as usize + 1)
    }
}
