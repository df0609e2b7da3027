use std::iter::FusedIterator;

use crate::{
    index::{decrement, increment},
    DType, Error, IndexArray, Result, Tensor, TensorCore,
};

/// A bidirectional position inside one tensor.
///
/// The position is a full-rank coordinate. [`Tensor::begin`] is all-zero and
/// [`Tensor::end`] is the coordinate equal to the shape itself, a sentinel that
/// can be reached and compared against but never read.
pub struct TensorCursor<'a, T: DType> {
    tensor: &'a Tensor<T>,
    pos: IndexArray,
    at_end: bool,
}

impl<'a, T: DType> TensorCursor<'a, T> {
    pub(crate) fn begin(tensor: &'a Tensor<T>) -> Self {
        Self {
            tensor,
            pos: IndexArray::zeros(tensor.n_dim()),
            at_end: false,
        }
    }

    pub(crate) fn end(tensor: &'a Tensor<T>) -> Self {
        Self {
            tensor,
            pos: IndexArray::from(tensor.shape().dims()),
            at_end: true,
        }
    }

    pub fn position(&self) -> &[usize] {
        &self.pos
    }

    pub fn is_end(&self) -> bool {
        self.at_end
    }

    pub fn is_begin(&self) -> bool {
        !self.at_end && self.pos.iter().all(|&i| i == 0)
    }

    /// Step forward, carrying into higher dimensions. Stepping off the last
    /// element lands on the end sentinel.
    pub fn advance(&mut self) -> Result<()> {
        if self.at_end {
            return Err(Error::IteratorOutOfRange("cannot advance past end"));
        }
        if !increment(&mut self.pos, self.tensor.shape().dims()) {
            self.pos = IndexArray::from(self.tensor.shape().dims());
            self.at_end = true;
        }
        Ok(())
    }

    /// Step backward. Retreating from the end sentinel lands on the last element.
    pub fn retreat(&mut self) -> Result<()> {
        if self.is_begin() {
            return Err(Error::IteratorOutOfRange("cannot retreat past begin"));
        }
        let shape = self.tensor.shape().dims();
        if self.at_end {
            self.pos = IndexArray::from(shape.iter().map(|&s| s - 1).collect::<Vec<_>>());
            self.at_end = false;
        } else {
            decrement(&mut self.pos, shape);
        }
        Ok(())
    }

    fn offset(&self) -> Result<usize> {
        if self.at_end {
            return Err(Error::IteratorOutOfRange("cannot dereference end"));
        }
        Ok(self.tensor.core().flat_offset(&self.pos))
    }

    pub fn get(&self) -> Result<T> {
        let offset = self.offset()?;
        self.tensor.core().storage().get(offset)
    }

    /// Write through the cursor. Visible through every alias of the storage.
    pub fn set(&self, v: T) -> Result<()> {
        let offset = self.offset()?;
        self.tensor.core().storage().set(offset, v)
    }

    /// Whether two cursors point at the same position. Cursors over different
    /// tensor handles cannot be compared.
    pub fn position_eq(&self, other: &Self) -> Result<bool> {
        if !std::ptr::eq(self.tensor, other.tensor) {
            return Err(Error::OwnerMismatch);
        }
        Ok(self.at_end == other.at_end && self.pos == other.pos)
    }
}

/// Row-major iterator over a tensor's values. Restart by calling [`Tensor::iter`] again.
pub struct Iter<'a, T: DType> {
    core: &'a TensorCore<T>,
    front: IndexArray,
    back: IndexArray,
    remaining: usize,
}

impl<'a, T: DType> Iter<'a, T> {
    pub(crate) fn new(core: &'a TensorCore<T>) -> Self {
        Self {
            core,
            front: IndexArray::zeros(core.n_dim()),
            back: IndexArray::from(core.shape().dims().iter().map(|&s| s - 1).collect::<Vec<_>>()),
            remaining: core.d_size(),
        }
    }
}

impl<T: DType> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        // Offsets of a constructed tensor are always inside its storage.
        let v = self.core.storage().load(self.core.flat_offset(&self.front));
        increment(&mut self.front, self.core.shape().dims());
        self.remaining -= 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: DType> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let v = self.core.storage().load(self.core.flat_offset(&self.back));
        decrement(&mut self.back, self.core.shape().dims());
        self.remaining -= 1;
        Some(v)
    }
}

impl<T: DType> ExactSizeIterator for Iter<'_, T> {}

impl<T: DType> FusedIterator for Iter<'_, T> {}
