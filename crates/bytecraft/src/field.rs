//! Field declarations used to build a [crate::layout::Layout].

use std::fmt;

/// The closed set of field kinds a layout can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    /// IEEE-754 single precision.
    Float32,
    /// IEEE-754 double precision.
    Float64,
    /// Raw bytes with no numeric interpretation. Width is chosen at declaration.
    ByteArray,
    /// Reserved space that produces no field. Width is chosen at declaration.
    Skip,
}

impl FieldKind {
    /// Canonical width in bytes, or `None` for kinds whose width is declared by the caller.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            FieldKind::Int8 | FieldKind::Uint8 => Some(1),
            FieldKind::Int16 | FieldKind::Uint16 => Some(2),
            FieldKind::Int32 | FieldKind::Uint32 | FieldKind::Float32 => Some(4),
            FieldKind::Int64 | FieldKind::Uint64 | FieldKind::Float64 => Some(8),
            FieldKind::ByteArray | FieldKind::Skip => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Int8 => "Int8",
            FieldKind::Uint8 => "Uint8",
            FieldKind::Int16 => "Int16",
            FieldKind::Uint16 => "Uint16",
            FieldKind::Int32 => "Int32",
            FieldKind::Uint32 => "Uint32",
            FieldKind::Int64 => "Int64",
            FieldKind::Uint64 => "Uint64",
            FieldKind::Float32 => "Float32",
            FieldKind::Float64 => "Float64",
            FieldKind::ByteArray => "ByteArray",
            FieldKind::Skip => "Skip",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field declaration: name, kind and width in bytes.
///
/// Build these with the constructors below rather than by hand; they fix the
/// width for every numeric kind. The constructors do no validation, that
/// happens once in [crate::layout::Layout::compile].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name. Always `None` for [FieldKind::Skip].
    pub name: Option<String>,
    pub kind: FieldKind,
    /// Width in bytes.
    pub width: usize,
}

impl FieldSpec {
    fn fixed(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: Some(name.into()),
            kind,
            width: kind.fixed_width().unwrap_or_default(),
        }
    }

    /// Signed 8-bit integer.
    pub fn int8(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Int8)
    }

    /// Unsigned 8-bit integer.
    pub fn uint8(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Uint8)
    }

    /// Signed 16-bit integer.
    pub fn int16(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Int16)
    }

    /// Unsigned 16-bit integer.
    pub fn uint16(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Uint16)
    }

    /// Signed 32-bit integer.
    pub fn int32(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Int32)
    }

    /// Unsigned 32-bit integer.
    pub fn uint32(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Uint32)
    }

    /// Signed 64-bit integer, decoded as `i64`.
    pub fn int64(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Int64)
    }

    /// Unsigned 64-bit integer, decoded as `u64`.
    pub fn uint64(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Uint64)
    }

    /// 32-bit float.
    pub fn float32(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Float32)
    }

    /// 64-bit float.
    pub fn float64(name: impl Into<String>) -> Self {
        Self::fixed(name, FieldKind::Float64)
    }

    /// `length` raw bytes, read back as a live sub-view of the buffer.
    pub fn byte_array(name: impl Into<String>, length: usize) -> Self {
        FieldSpec {
            name: Some(name.into()),
            kind: FieldKind::ByteArray,
            width: length,
        }
    }

    /// Skips `length` bytes.
    pub fn skip(length: usize) -> Self {
        FieldSpec {
            name: None,
            kind: FieldKind::Skip,
            width: length,
        }
    }

    /// Returns the field name, if this is not a skip.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_skip(&self) -> bool {
        self.kind == FieldKind::Skip
    }
}
