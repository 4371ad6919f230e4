//! Record views: a [Layout] bound to one position in a buffer.

use crate::{
    bytes::SharedBytes,
    codec::{Endian, Scalar, Value},
    compiled::{Codec, CompiledField},
    errors::AccessError,
    field::FieldKind,
    layout::Layout,
};

/// A field resolved ahead of time with [Layout::field_id].
///
/// Only resolves against the layout that produced it, or a clone of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub(crate) layout: usize,
    pub(crate) index: usize,
}

/// Anything that can name a field of a layout: a `&str` or a [FieldId].
pub trait FieldKey {
    fn resolve<'l>(&self, layout: &'l Layout) -> Result<&'l CompiledField, AccessError>;
}

impl FieldKey for &str {
    fn resolve<'l>(&self, layout: &'l Layout) -> Result<&'l CompiledField, AccessError> {
        layout
            .field(self)
            .ok_or_else(|| AccessError::UnknownField(self.to_string()))
    }
}

impl FieldKey for String {
    fn resolve<'l>(&self, layout: &'l Layout) -> Result<&'l CompiledField, AccessError> {
        self.as_str().resolve(layout)
    }
}

impl FieldKey for FieldId {
    fn resolve<'l>(&self, layout: &'l Layout) -> Result<&'l CompiledField, AccessError> {
        layout.field_at(*self)
    }
}

/// One record of a [Layout], live over a shared buffer.
///
/// Reads decode straight from the buffer and writes store straight into it.
/// Views over the same bytes alias each other: a write through one is seen
/// by every other, including views built from a different layout.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    layout: &'a Layout,
    bytes: SharedBytes<'a>,
    base_offset: usize,
    endian: Endian,
}

impl<'a> RecordView<'a> {
    pub fn new(
        layout: &'a Layout,
        bytes: SharedBytes<'a>,
        base_offset: usize,
        endian: Endian,
    ) -> Self {
        Self {
            layout,
            bytes,
            base_offset,
            endian,
        }
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    pub fn buffer(&self) -> SharedBytes<'a> {
        self.bytes
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Absolute position of the record's first byte.
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn byte_length(&self) -> usize {
        self.layout.byte_length()
    }

    /// Position right after this record, where the next one starts.
    ///
    /// `None` when that position is past `usize::MAX`.
    pub fn next_offset(&self) -> Option<usize> {
        self.base_offset.checked_add(self.byte_length())
    }

    /// Position of the record's last byte, `None` when past `usize::MAX`.
    pub fn end_position(&self) -> Option<usize> {
        self.base_offset.checked_add(self.byte_length() - 1)
    }

    /// Absolute offset of the field `name`. Skipped regions have no entry,
    /// and neither does a field whose offset is past `usize::MAX`.
    pub fn field_offset(&self, name: &str) -> Option<usize> {
        self.layout
            .field_offset(name)
            .and_then(|offset| self.base_offset.checked_add(offset))
    }

    /// `(name, absolute offset)` for every named field, in declaration order.
    /// Fields whose offset is past `usize::MAX` are left out.
    pub fn field_offsets(&self) -> impl Iterator<Item = (&'a str, usize)> + use<'a> {
        let base = self.base_offset;
        self.layout.fields().iter().filter_map(move |field| {
            base.checked_add(field.offset)
                .map(|offset| (field.name.as_str(), offset))
        })
    }

    /// Decodes a field.
    pub fn get(&self, key: impl FieldKey) -> Result<Value<'a>, AccessError> {
        key.resolve(self.layout)?
            .decode(self.bytes, self.base_offset, self.endian)
    }

    /// Encodes `value` into a field. The value's kind must match the field's.
    pub fn set<'v>(
        &self,
        key: impl FieldKey,
        value: impl Into<Value<'v>>,
    ) -> Result<(), AccessError> {
        key.resolve(self.layout)?
            .encode(self.bytes, self.base_offset, self.endian, &value.into())
    }

    /// Reads a numeric field as `T`. `T` must match the declared kind.
    pub fn read<T: Scalar>(&self, key: impl FieldKey) -> Result<T, AccessError> {
        let field = key.resolve(self.layout)?;
        if field.kind() != T::KIND {
            return Err(field.type_mismatch(T::KIND));
        }

        T::load(self.bytes, field.absolute(self.base_offset, self.bytes)?, self.endian)
    }

    /// Writes a numeric field from `T`. `T` must match the declared kind.
    pub fn write<T: Scalar>(&self, key: impl FieldKey, value: T) -> Result<(), AccessError> {
        let field = key.resolve(self.layout)?;
        if field.kind() != T::KIND {
            return Err(field.type_mismatch(T::KIND));
        }

        value.store(self.bytes, field.absolute(self.base_offset, self.bytes)?, self.endian)
    }

    /// Live view of a byte array field.
    pub fn bytes(&self, key: impl FieldKey) -> Result<SharedBytes<'a>, AccessError> {
        let field = key.resolve(self.layout)?;
        if field.codec != Codec::Bytes {
            return Err(field.type_mismatch(FieldKind::ByteArray));
        }

        self.bytes
            .slice(field.absolute(self.base_offset, self.bytes)?, field.width)
    }

    /// Copies `src` into a byte array field. `src` must be exactly as long as the field.
    pub fn set_bytes(&self, key: impl FieldKey, src: &[u8]) -> Result<(), AccessError> {
        key.resolve(self.layout)?
            .encode_slice(self.bytes, self.base_offset, src)
    }
}
