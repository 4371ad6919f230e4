//! Error types for layout compilation and field access.

use thiserror::Error;

use crate::field::FieldKind;

/// Errors produced when compiling [crate::field::FieldSpec]s into a [crate::layout::Layout].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The layout declares no fields. There is no zero-width record.
    #[error("a layout needs at least one field")]
    EmptyLayout,
    /// Field at `index` has a width of 0, or a width that disagrees with its kind.
    #[error("field #{index} has an invalid width")]
    InvalidFieldWidth { index: usize },
    /// Field at `index` is a named kind but its name is empty.
    #[error("field #{index} has an empty name")]
    InvalidFieldName { index: usize },
    /// Two fields share the same name.
    #[error("field `{0}` is declared more than once")]
    DuplicateFieldName(String),
}

/// Errors produced when reading or writing a field through a [crate::view::RecordView].
///
/// A failed access never leaves a partial write behind: every check runs
/// before the first byte is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No field with this name exists in the layout.
    #[error("no field named `{0}`")]
    UnknownField(String),
    /// A [crate::view::FieldId] was used with a layout other than the one that issued it.
    #[error("field id #{index} was issued by a different layout")]
    ForeignFieldId { index: usize },
    /// The value does not match the declared kind of the field.
    #[error("field `{field}` is {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
    /// A byte array was set from a sequence of the wrong length.
    #[error("field `{field}` must have a length of {expected}, got {actual} bytes")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    /// The accessed range `offset..offset + width` lies outside a buffer of `len` bytes.
    #[error("{width} byte access at offset {offset} is out of bounds for a buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}
