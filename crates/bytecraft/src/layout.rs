//! Layout: an ordered list of fields, compiled once and projected onto byte
//! buffers as many times as needed.

use std::{
    collections::HashMap,
    iter::FusedIterator,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    bytes::SharedBytes,
    codec::Endian,
    compiled::CompiledField,
    errors::{AccessError, CompileError},
    field::FieldSpec,
    view::{FieldId, RecordView},
};

static NEXT_LAYOUT_ID: AtomicUsize = AtomicUsize::new(0);

/// A compiled record layout. Use [Layout::compile] to build one from
/// [FieldSpec]s, then [Layout::project] or [Layout::project_array] to bind it
/// to a buffer.
///
/// A layout holds no buffer and is never mutated after compilation, so it
/// can be shared freely between threads and projections.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Shared by clones, distinct for every compilation.
    id: usize,
    specs: Vec<FieldSpec>,
    fields: Vec<CompiledField>,
    index: HashMap<String, usize>,
    byte_length: usize,
}

impl Layout {
    /// Compiles `specs` in declaration order. Fails on an empty list, a
    /// zero-width field, an unnamed field or a repeated name.
    pub fn compile(specs: &[FieldSpec]) -> Result<Self, CompileError> {
        if specs.is_empty() {
            return Err(CompileError::EmptyLayout);
        }

        let mut fields = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());
        let mut running_offset = 0usize;

        for (i, spec) in specs.iter().enumerate() {
            if let Some(field) = CompiledField::compile(i, spec, running_offset)? {
                if index.insert(field.name.clone(), fields.len()).is_some() {
                    return Err(CompileError::DuplicateFieldName(field.name));
                }
                fields.push(field);
            }

            running_offset = running_offset
                .checked_add(spec.width)
                .ok_or(CompileError::InvalidFieldWidth { index: i })?;
        }

        log::debug!(
            "compiled layout: {} declarations, {} fields, {} bytes per record",
            specs.len(),
            fields.len(),
            running_offset
        );

        Ok(Self {
            id: NEXT_LAYOUT_ID.fetch_add(1, Ordering::Relaxed),
            specs: specs.to_vec(),
            fields,
            index,
            byte_length: running_offset,
        })
    }

    /// Width of one record in bytes: the sum of every declared width.
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// The declarations this layout was compiled from, skips included.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Named fields in declaration order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Resolves `name` once so repeated accesses can skip the lookup.
    ///
    /// The id only resolves against this layout and its clones; using it on
    /// a view of another layout fails with [AccessError::ForeignFieldId].
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.index.get(name).map(|&index| FieldId {
            layout: self.id,
            index,
        })
    }

    pub(crate) fn field_at(&self, id: FieldId) -> Result<&CompiledField, AccessError> {
        if id.layout != self.id {
            return Err(AccessError::ForeignFieldId { index: id.index });
        }

        self.fields
            .get(id.index)
            .ok_or(AccessError::ForeignFieldId { index: id.index })
    }

    /// Offset of `name` relative to the start of a record.
    pub fn field_offset(&self, name: &str) -> Option<usize> {
        self.field(name).map(|field| field.offset)
    }

    /// Binds one record to `bytes` at `start_offset`.
    ///
    /// Nothing is read here and the buffer length is not checked: a record
    /// that runs past the end of the buffer fails only when one of its
    /// out-of-range fields is accessed.
    pub fn project<'a>(
        &'a self,
        bytes: SharedBytes<'a>,
        start_offset: usize,
        endian: Endian,
    ) -> RecordView<'a> {
        RecordView::new(self, bytes, start_offset, endian)
    }

    /// Binds `count` consecutive records to `bytes`, the first at `start_offset`.
    ///
    /// Records whose start would not be addressable (past `usize::MAX`) are
    /// left out, so fewer than `count` views may come back.
    pub fn project_array<'a>(
        &'a self,
        bytes: SharedBytes<'a>,
        start_offset: usize,
        count: usize,
        endian: Endian,
    ) -> Vec<RecordView<'a>> {
        self.records(bytes, start_offset, count, endian).collect()
    }

    /// Lazy form of [Layout::project_array].
    pub fn records<'a>(
        &'a self,
        bytes: SharedBytes<'a>,
        start_offset: usize,
        count: usize,
        endian: Endian,
    ) -> Records<'a> {
        let addressable = (usize::MAX - start_offset)
            .checked_div(self.byte_length)
            .map_or(count, |last| last.saturating_add(1).min(count));
        if addressable < count {
            log::debug!(
                "only {} of {} records from offset {} have an addressable start",
                addressable,
                count,
                start_offset
            );
        }

        log::trace!(
            "projecting {} records of {} bytes from offset {}",
            addressable,
            self.byte_length,
            start_offset
        );

        Records {
            layout: self,
            bytes,
            endian,
            start_offset,
            front: 0,
            back: addressable,
        }
    }

    /// Whether `count` records starting at `start_offset` fit in a buffer of `buffer_len` bytes.
    pub fn fits(&self, buffer_len: usize, start_offset: usize, count: usize) -> bool {
        self.byte_length
            .checked_mul(count)
            .and_then(|len| len.checked_add(start_offset))
            .is_some_and(|end| end <= buffer_len)
    }
}

/// Iterator over consecutive [RecordView]s, see [Layout::records].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    layout: &'a Layout,
    bytes: SharedBytes<'a>,
    endian: Endian,
    start_offset: usize,
    front: usize,
    back: usize,
}

impl<'a> Records<'a> {
    // `i < back`, and `back` was capped so that every start fits in a usize.
    fn view(&self, i: usize) -> RecordView<'a> {
        let offset = self.start_offset + i * self.layout.byte_length;
        RecordView::new(self.layout, self.bytes, offset, self.endian)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = RecordView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let view = self.view(self.front);
        self.front += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Records<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.view(self.back))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}
