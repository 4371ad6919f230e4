//! Compiled accessor table: one entry per named field, with its offset fixed
//! relative to the start of the record.

use crate::{
    bytes::SharedBytes,
    codec::{Endian, Scalar, Value},
    errors::{AccessError, CompileError},
    field::{FieldKind, FieldSpec},
};

/// How a named field is decoded. Skip fields never get one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Bytes,
}

impl Codec {
    /// Returns `None` for [FieldKind::Skip].
    pub fn for_kind(kind: FieldKind) -> Option<Self> {
        Some(match kind {
            FieldKind::Int8 => Codec::Int8,
            FieldKind::Uint8 => Codec::Uint8,
            FieldKind::Int16 => Codec::Int16,
            FieldKind::Uint16 => Codec::Uint16,
            FieldKind::Int32 => Codec::Int32,
            FieldKind::Uint32 => Codec::Uint32,
            FieldKind::Int64 => Codec::Int64,
            FieldKind::Uint64 => Codec::Uint64,
            FieldKind::Float32 => Codec::Float32,
            FieldKind::Float64 => Codec::Float64,
            FieldKind::ByteArray => Codec::Bytes,
            FieldKind::Skip => return None,
        })
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Codec::Int8 => FieldKind::Int8,
            Codec::Uint8 => FieldKind::Uint8,
            Codec::Int16 => FieldKind::Int16,
            Codec::Uint16 => FieldKind::Uint16,
            Codec::Int32 => FieldKind::Int32,
            Codec::Uint32 => FieldKind::Uint32,
            Codec::Int64 => FieldKind::Int64,
            Codec::Uint64 => FieldKind::Uint64,
            Codec::Float32 => FieldKind::Float32,
            Codec::Float64 => FieldKind::Float64,
            Codec::Bytes => FieldKind::ByteArray,
        }
    }
}

/// A named field with its relative offset resolved.
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub name: String,
    pub codec: Codec,
    /// Offset from the start of the record.
    pub offset: usize,
    pub width: usize,
}

impl CompiledField {
    /// Checks a single declaration and places it at `offset`.
    ///
    /// Returns `Ok(None)` for skip fields, which only take up space.
    pub fn compile(
        index: usize,
        spec: &FieldSpec,
        offset: usize,
    ) -> Result<Option<Self>, CompileError> {
        let width_ok = match spec.kind.fixed_width() {
            Some(width) => spec.width == width,
            None => spec.width > 0,
        };
        if !width_ok {
            return Err(CompileError::InvalidFieldWidth { index });
        }

        let Some(codec) = Codec::for_kind(spec.kind) else {
            return Ok(None);
        };

        let name = match spec.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(CompileError::InvalidFieldName { index }),
        };

        Ok(Some(CompiledField {
            name,
            codec,
            offset,
            width: spec.width,
        }))
    }

    pub fn kind(&self) -> FieldKind {
        self.codec.kind()
    }

    /// Decodes this field from a record starting at `base`.
    pub fn decode<'a>(
        &self,
        bytes: SharedBytes<'a>,
        base: usize,
        endian: Endian,
    ) -> Result<Value<'a>, AccessError> {
        let offset = self.absolute(base, bytes)?;
        Ok(match self.codec {
            Codec::Int8 => Value::I8(i8::load(bytes, offset, endian)?),
            Codec::Uint8 => Value::U8(u8::load(bytes, offset, endian)?),
            Codec::Int16 => Value::I16(i16::load(bytes, offset, endian)?),
            Codec::Uint16 => Value::U16(u16::load(bytes, offset, endian)?),
            Codec::Int32 => Value::I32(i32::load(bytes, offset, endian)?),
            Codec::Uint32 => Value::U32(u32::load(bytes, offset, endian)?),
            Codec::Int64 => Value::I64(i64::load(bytes, offset, endian)?),
            Codec::Uint64 => Value::U64(u64::load(bytes, offset, endian)?),
            Codec::Float32 => Value::F32(f32::load(bytes, offset, endian)?),
            Codec::Float64 => Value::F64(f64::load(bytes, offset, endian)?),
            Codec::Bytes => Value::Bytes(bytes.slice(offset, self.width)?),
        })
    }

    /// Encodes `value` into a record starting at `base`.
    ///
    /// The value must be of this field's kind. Byte arrays must also match
    /// the declared width. Nothing is written unless both hold.
    pub fn encode(
        &self,
        bytes: SharedBytes<'_>,
        base: usize,
        endian: Endian,
        value: &Value<'_>,
    ) -> Result<(), AccessError> {
        let offset = self.absolute(base, bytes)?;
        match (self.codec, value) {
            (Codec::Int8, Value::I8(v)) => v.store(bytes, offset, endian),
            (Codec::Uint8, Value::U8(v)) => v.store(bytes, offset, endian),
            (Codec::Int16, Value::I16(v)) => v.store(bytes, offset, endian),
            (Codec::Uint16, Value::U16(v)) => v.store(bytes, offset, endian),
            (Codec::Int32, Value::I32(v)) => v.store(bytes, offset, endian),
            (Codec::Uint32, Value::U32(v)) => v.store(bytes, offset, endian),
            (Codec::Int64, Value::I64(v)) => v.store(bytes, offset, endian),
            (Codec::Uint64, Value::U64(v)) => v.store(bytes, offset, endian),
            (Codec::Float32, Value::F32(v)) => v.store(bytes, offset, endian),
            (Codec::Float64, Value::F64(v)) => v.store(bytes, offset, endian),
            // The source may overlap the destination, so snapshot it first.
            (Codec::Bytes, Value::Bytes(src)) => {
                self.encode_bytes(bytes, offset, &src.to_vec())
            }
            (_, other) => Err(self.type_mismatch(other.kind())),
        }
    }

    /// Copies `src` into this byte array field of a record starting at `base`.
    pub fn encode_slice(
        &self,
        bytes: SharedBytes<'_>,
        base: usize,
        src: &[u8],
    ) -> Result<(), AccessError> {
        if self.codec != Codec::Bytes {
            return Err(self.type_mismatch(FieldKind::ByteArray));
        }

        let offset = self.absolute(base, bytes)?;
        self.encode_bytes(bytes, offset, src)
    }

    fn encode_bytes(
        &self,
        bytes: SharedBytes<'_>,
        offset: usize,
        src: &[u8],
    ) -> Result<(), AccessError> {
        if src.len() != self.width {
            return Err(AccessError::LengthMismatch {
                field: self.name.clone(),
                expected: self.width,
                actual: src.len(),
            });
        }

        bytes.slice(offset, self.width)?.copy_from_slice(src)
    }

    pub(crate) fn type_mismatch(&self, found: FieldKind) -> AccessError {
        AccessError::TypeMismatch {
            field: self.name.clone(),
            expected: self.kind(),
            found,
        }
    }

    /// Absolute offset of this field in a record starting at `base`.
    pub(crate) fn absolute(
        &self,
        base: usize,
        bytes: SharedBytes<'_>,
    ) -> Result<usize, AccessError> {
        base.checked_add(self.offset).ok_or(AccessError::OutOfBounds {
            offset: base,
            width: self.offset.saturating_add(self.width),
            len: bytes.len(),
        })
    }
}
