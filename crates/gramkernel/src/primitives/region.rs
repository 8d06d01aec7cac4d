//! Sub-region addressing inside flat vector buffers.
//!
//! ## Purpose
//!
//! A region names the slice `[offset, offset + length)` of a larger buffer.
//! Input regions hold whole vectors laid out back to back; the output region
//! holds the row-major Gram matrix.
//!
//! ## Invariants
//!
//! * `length` counts elements, not vectors.
//! * A region is only dereferenced after `end()` has been checked against the
//!   backing buffer.

/// An `(offset, length)` window into a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorRegion {
    /// Index of the first element.
    pub offset: usize,

    /// Number of elements.
    pub length: usize,
}

impl VectorRegion {
    /// Create a region starting at `offset` spanning `length` elements.
    #[inline]
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Region covering a whole buffer of `length` elements.
    #[inline]
    pub const fn whole(length: usize) -> Self {
        Self { offset: 0, length }
    }

    /// One past the last addressed element, saturating on overflow.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Number of whole vectors of dimension `dim` in the region.
    ///
    /// A zero dimension holds no vectors.
    #[inline]
    pub const fn vector_count(&self, dim: usize) -> usize {
        if dim == 0 { 0 } else { self.length / dim }
    }

    /// Borrow the addressed elements. The caller has checked the bounds.
    #[inline]
    pub(crate) fn slice<'a, T>(&self, buffer: &'a [T]) -> &'a [T] {
        &buffer[self.offset..self.end()]
    }

    /// Mutably borrow the addressed elements. The caller has checked the bounds.
    #[inline]
    pub(crate) fn slice_mut<'a, T>(&self, buffer: &'a mut [T]) -> &'a mut [T] {
        &mut buffer[self.offset..self.end()]
    }
}
