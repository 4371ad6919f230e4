//! # bytecraft
//!
//! Describe fixed binary record layouts and project them, without copying,
//! onto a byte buffer.
//!
//! A [layout::Layout] is compiled once from an ordered list of
//! [field::FieldSpec]s. Projecting it onto a buffer yields
//! [view::RecordView]s whose fields read and write the buffer in place, with
//! the byte order chosen per projection. Array projection repeats the layout
//! back to back, one view per record, which is how pixel data or tables of
//! fixed-size entries are handled.
//!
//! ## Example
//!
//! ```
//! use bytecraft::bytes::SharedBytes;
//! use bytecraft::codec::Endian;
//! use bytecraft::field::FieldSpec;
//! use bytecraft::layout::Layout;
//!
//! let pixel = Layout::compile(&[
//!     FieldSpec::uint8("blue"),
//!     FieldSpec::uint8("green"),
//!     FieldSpec::uint8("red"),
//! ])
//! .unwrap();
//!
//! let mut data = vec![10u8, 20, 30, 40, 50, 60];
//! let bytes = SharedBytes::new(&mut data);
//!
//! for px in pixel.records(bytes, 0, 2, Endian::Little) {
//!     px.write("red", 255u8).unwrap();
//! }
//!
//! assert_eq!(data, vec![10, 20, 255, 40, 50, 255]);
//! ```

pub mod bytes;
pub mod codec;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod layout;
#[cfg(feature = "serde")]
pub mod serde;
pub mod view;
