//! Shared, in-place access to a byte buffer.
//!
//! [SharedBytes] is the buffer every record view is projected onto. It wraps
//! `&[Cell<u8>]`, so any number of views can point into the same storage and
//! see each other's writes without copying. The storage itself stays borrowed
//! for the lifetime of the handle and cannot leave the current thread.

use std::{cell::Cell, fmt};

use crate::errors::AccessError;

/// A `Copy` handle to a contiguous, mutable byte region.
#[derive(Clone, Copy)]
pub struct SharedBytes<'a> {
    cells: &'a [Cell<u8>],
}

impl<'a> SharedBytes<'a> {
    /// Borrows `data` for shared, in-place access.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            cells: Cell::from_mut(data).as_slice_of_cells(),
        }
    }

    /// Wraps cells that are already shared elsewhere.
    pub fn from_cells(cells: &'a [Cell<u8>]) -> Self {
        Self { cells }
    }

    pub fn as_cells(&self) -> &'a [Cell<u8>] {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the byte at `index`.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).map(Cell::get)
    }

    /// Stores `value` at `index`.
    pub fn set(&self, index: usize, value: u8) -> Result<(), AccessError> {
        self.range(index, 1)?[0].set(value);
        Ok(())
    }

    /// Zero-copy view of `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<SharedBytes<'a>, AccessError> {
        Ok(SharedBytes {
            cells: self.range(offset, len)?,
        })
    }

    /// Copies `N` bytes starting at `offset` out of the buffer.
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], AccessError> {
        let cells = self.range(offset, N)?;
        let mut out = [0u8; N];
        for (dst, src) in out.iter_mut().zip(cells) {
            *dst = src.get();
        }

        Ok(out)
    }

    /// Stores `bytes` at `offset`.
    pub fn write_array<const N: usize>(
        &self,
        offset: usize,
        bytes: [u8; N],
    ) -> Result<(), AccessError> {
        let cells = self.range(offset, N)?;
        for (dst, src) in cells.iter().zip(bytes) {
            dst.set(src);
        }

        Ok(())
    }

    /// Overwrites the whole view with `src`. Lengths must match.
    pub fn copy_from_slice(&self, src: &[u8]) -> Result<(), AccessError> {
        if src.len() != self.len() {
            return Err(AccessError::OutOfBounds {
                offset: 0,
                width: src.len(),
                len: self.len(),
            });
        }

        for (dst, &byte) in self.cells.iter().zip(src) {
            dst.set(byte);
        }

        Ok(())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + use<'a> {
        self.cells.iter().map(Cell::get)
    }

    fn range(&self, offset: usize, width: usize) -> Result<&'a [Cell<u8>], AccessError> {
        let cells = self.cells;
        offset
            .checked_add(width)
            .filter(|&end| end <= cells.len())
            .map(|end| &cells[offset..end])
            .ok_or(AccessError::OutOfBounds {
                offset,
                width,
                len: cells.len(),
            })
    }
}

impl<'a> From<&'a mut [u8]> for SharedBytes<'a> {
    fn from(data: &'a mut [u8]) -> Self {
        SharedBytes::new(data)
    }
}

impl<'a> From<&'a mut Vec<u8>> for SharedBytes<'a> {
    fn from(data: &'a mut Vec<u8>) -> Self {
        SharedBytes::new(data.as_mut_slice())
    }
}

impl fmt::Debug for SharedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq<[u8]> for SharedBytes<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, &b)| a == b)
    }
}
