//! JSON-deserializable layout description.
//!
//! These types describe a record layout as data, for example a layout file
//! shipped next to the binary format it reads. They compile into a
//! [crate::layout::Layout] with `Layout::try_from(def)`.
//!
//! ```json
//! {
//!   "fields": [
//!     { "type": "Uint16", "name": "signature" },
//!     { "type": "Uint32", "name": "fileSize" },
//!     { "type": "Skip", "length": 4 },
//!     { "type": "ByteArray", "name": "tag", "length": 4 }
//!   ]
//! }
//! ```
//!
//! Endianness is not part of a layout; pick it when projecting.

use serde::{Deserialize, Serialize};

use crate::{
    errors::CompileError,
    field::{FieldKind, FieldSpec},
    layout::Layout,
};

/// Top-level layout definition: fields in physical order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LayoutDef {
    pub fields: Vec<FieldDef>,
}

/// Description of a single field, tagged by its kind.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum FieldDef {
    Int8 { name: String },
    Uint8 { name: String },
    Int16 { name: String },
    Uint16 { name: String },
    Int32 { name: String },
    Uint32 { name: String },
    /// Also accepted as `BigInt64`.
    #[serde(alias = "BigInt64")]
    Int64 { name: String },
    /// Also accepted as `BigUint64`.
    #[serde(alias = "BigUint64")]
    Uint64 { name: String },
    Float32 { name: String },
    Float64 { name: String },
    /// `length` raw bytes.
    ByteArray { name: String, length: usize },
    /// `length` bytes of padding with no field.
    Skip { length: usize },
}

impl From<FieldDef> for FieldSpec {
    fn from(value: FieldDef) -> Self {
        match value {
            FieldDef::Int8 { name } => FieldSpec::int8(name),
            FieldDef::Uint8 { name } => FieldSpec::uint8(name),
            FieldDef::Int16 { name } => FieldSpec::int16(name),
            FieldDef::Uint16 { name } => FieldSpec::uint16(name),
            FieldDef::Int32 { name } => FieldSpec::int32(name),
            FieldDef::Uint32 { name } => FieldSpec::uint32(name),
            FieldDef::Int64 { name } => FieldSpec::int64(name),
            FieldDef::Uint64 { name } => FieldSpec::uint64(name),
            FieldDef::Float32 { name } => FieldSpec::float32(name),
            FieldDef::Float64 { name } => FieldSpec::float64(name),
            FieldDef::ByteArray { name, length } => FieldSpec::byte_array(name, length),
            FieldDef::Skip { length } => FieldSpec::skip(length),
        }
    }
}

impl From<&FieldSpec> for FieldDef {
    fn from(spec: &FieldSpec) -> Self {
        let name = spec.name.clone().unwrap_or_default();
        match spec.kind {
            FieldKind::Int8 => FieldDef::Int8 { name },
            FieldKind::Uint8 => FieldDef::Uint8 { name },
            FieldKind::Int16 => FieldDef::Int16 { name },
            FieldKind::Uint16 => FieldDef::Uint16 { name },
            FieldKind::Int32 => FieldDef::Int32 { name },
            FieldKind::Uint32 => FieldDef::Uint32 { name },
            FieldKind::Int64 => FieldDef::Int64 { name },
            FieldKind::Uint64 => FieldDef::Uint64 { name },
            FieldKind::Float32 => FieldDef::Float32 { name },
            FieldKind::Float64 => FieldDef::Float64 { name },
            FieldKind::ByteArray => FieldDef::ByteArray {
                name,
                length: spec.width,
            },
            FieldKind::Skip => FieldDef::Skip { length: spec.width },
        }
    }
}

impl TryFrom<LayoutDef> for Layout {
    type Error = CompileError;

    fn try_from(value: LayoutDef) -> Result<Self, Self::Error> {
        let specs: Vec<FieldSpec> = value.fields.into_iter().map(Into::into).collect();
        Layout::compile(&specs)
    }
}

impl From<&Layout> for LayoutDef {
    fn from(layout: &Layout) -> Self {
        LayoutDef {
            fields: layout.specs().iter().map(Into::into).collect(),
        }
    }
}
