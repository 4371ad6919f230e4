//! Byte order and the fixed-width numeric codecs used by record views.

use crate::{bytes::SharedBytes, errors::AccessError, field::FieldKind};

/// Byte order used to decode and encode multi-byte fields.
///
/// Chosen per projection, never stored in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    /// `true` selects little endian, `false` big endian.
    pub const fn from_little(little_endian: bool) -> Self {
        if little_endian {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    pub const fn is_little(self) -> bool {
        matches!(self, Endian::Little)
    }
}

/// A value read from, or to be written to, a single field.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Live view of a byte array field. Writes through it land in the buffer.
    Bytes(SharedBytes<'a>),
}

impl<'a> Value<'a> {
    /// The field kind this value encodes as.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::I8(_) => FieldKind::Int8,
            Value::U8(_) => FieldKind::Uint8,
            Value::I16(_) => FieldKind::Int16,
            Value::U16(_) => FieldKind::Uint16,
            Value::I32(_) => FieldKind::Int32,
            Value::U32(_) => FieldKind::Uint32,
            Value::I64(_) => FieldKind::Int64,
            Value::U64(_) => FieldKind::Uint64,
            Value::F32(_) => FieldKind::Float32,
            Value::F64(_) => FieldKind::Float64,
            Value::Bytes(_) => FieldKind::ByteArray,
        }
    }

    /// Extracts a scalar of type `T`, if this value holds one.
    pub fn to_scalar<T: Scalar>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Returns the byte view, if this is a byte array value.
    pub fn as_bytes(&self) -> Option<SharedBytes<'a>> {
        match self {
            Value::Bytes(bytes) => Some(*bytes),
            _ => None,
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            _ => false,
        }
    }
}

/// A fixed-width numeric type that can be stored in a field.
pub trait Scalar: Copy + Sized {
    /// The field kind this type corresponds to.
    const KIND: FieldKind;

    /// Decodes a value from `bytes` at `offset`.
    fn load(bytes: SharedBytes<'_>, offset: usize, endian: Endian) -> Result<Self, AccessError>;

    /// Encodes `self` into `bytes` at `offset`.
    fn store(self, bytes: SharedBytes<'_>, offset: usize, endian: Endian)
    -> Result<(), AccessError>;

    fn into_value(self) -> Value<'static>;

    fn from_value(value: &Value<'_>) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident, $variant:ident;)*) => {
        $(
            impl Scalar for $ty {
                const KIND: FieldKind = FieldKind::$kind;

                #[inline]
                fn load(
                    bytes: SharedBytes<'_>,
                    offset: usize,
                    endian: Endian,
                ) -> Result<Self, AccessError> {
                    let raw = bytes.read_array::<{ std::mem::size_of::<$ty>() }>(offset)?;
                    Ok(match endian {
                        Endian::Big => <$ty>::from_be_bytes(raw),
                        Endian::Little => <$ty>::from_le_bytes(raw),
                    })
                }

                #[inline]
                fn store(
                    self,
                    bytes: SharedBytes<'_>,
                    offset: usize,
                    endian: Endian,
                ) -> Result<(), AccessError> {
                    let raw = match endian {
                        Endian::Big => self.to_be_bytes(),
                        Endian::Little => self.to_le_bytes(),
                    };
                    bytes.write_array(offset, raw)
                }

                fn into_value(self) -> Value<'static> {
                    Value::$variant(self)
                }

                fn from_value(value: &Value<'_>) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value<'_> {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => Int8, I8;
    u8 => Uint8, U8;
    i16 => Int16, I16;
    u16 => Uint16, U16;
    i32 => Int32, I32;
    u32 => Uint32, U32;
    i64 => Int64, I64;
    u64 => Uint64, U64;
    f32 => Float32, F32;
    f64 => Float64, F64;
}

impl<'a> From<SharedBytes<'a>> for Value<'a> {
    fn from(bytes: SharedBytes<'a>) -> Self {
        Value::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_respects_endian() {
        let mut data = [0x01u8, 0x02];
        let bytes = SharedBytes::new(&mut data);
        assert_eq!(u16::load(bytes, 0, Endian::Big).unwrap(), 0x0102);
        assert_eq!(u16::load(bytes, 0, Endian::Little).unwrap(), 0x0201);
    }

    #[test]
    fn test_store_respects_endian() {
        let mut data = [0u8; 8];
        let bytes = SharedBytes::new(&mut data);
        0x0A0B0C0Du32.store(bytes, 0, Endian::Big).unwrap();
        0x0A0B0C0Du32.store(bytes, 4, Endian::Little).unwrap();
        assert_eq!(
            bytes.to_vec(),
            vec![0x0A, 0x0B, 0x0C, 0x0D, 0x0D, 0x0C, 0x0B, 0x0A]
        );
    }

    #[test]
    fn test_signed_decoding() {
        let mut data = [0xFFu8, 0xFE];
        let bytes = SharedBytes::new(&mut data);
        assert_eq!(i8::load(bytes, 0, Endian::Big).unwrap(), -1);
        assert_eq!(i16::load(bytes, 0, Endian::Big).unwrap(), -2);
    }

    #[test]
    fn test_u64_keeps_full_precision() {
        let mut data = [0u8; 8];
        let bytes = SharedBytes::new(&mut data);
        let big = u64::MAX - 1;
        big.store(bytes, 0, Endian::Little).unwrap();
        assert_eq!(u64::load(bytes, 0, Endian::Little).unwrap(), big);
    }

    #[test]
    fn test_float_codec() {
        let mut data = [0u8; 12];
        let bytes = SharedBytes::new(&mut data);
        1.5f32.store(bytes, 0, Endian::Big).unwrap();
        (-2.25f64).store(bytes, 4, Endian::Little).unwrap();
        assert_eq!(f32::load(bytes, 0, Endian::Big).unwrap(), 1.5);
        assert_eq!(f64::load(bytes, 4, Endian::Little).unwrap(), -2.25);
    }

    #[test]
    fn test_load_out_of_bounds() {
        let mut data = [0u8; 3];
        let bytes = SharedBytes::new(&mut data);
        assert_eq!(
            u32::load(bytes, 0, Endian::Big).unwrap_err(),
            AccessError::OutOfBounds {
                offset: 0,
                width: 4,
                len: 3
            }
        );
    }

    #[test]
    fn test_value_kind_and_scalar() {
        let value = Value::from(300u16);
        assert_eq!(value.kind(), FieldKind::Uint16);
        assert_eq!(value.to_scalar::<u16>(), Some(300));
        assert_eq!(value.to_scalar::<i16>(), None);
    }

    #[test]
    fn test_endian_from_flag() {
        assert_eq!(Endian::from_little(true), Endian::Little);
        assert_eq!(Endian::from_little(false), Endian::Big);
        assert_eq!(Endian::default(), Endian::Big);
    }
}
