use std::{cell::RefCell, rc::Rc};

use crate::{DType, Result};

/// A reference-counted flat buffer plus the element offset this alias starts at.
///
/// Cloning a `Storage` (or calling [`Storage::with_offset`]) creates another alias
/// of the same buffer. Writes through one alias are visible through all of
/// them; the buffer is freed when the last alias is dropped.
///
/// The buffer lives behind an `Rc<RefCell<_>>`, so storages (and every tensor
/// built on them) are confined to one thread.
#[derive(Clone, Debug)]
pub struct Storage<T: DType> {
    buffer: Rc<RefCell<Vec<T>>>,
    offset: usize,
}

impl<T: DType> Storage<T> {
    /// A zero-filled buffer of `len` elements.
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![T::ZERO; len])
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(data)),
            offset: 0,
        }
    }

    /// Another alias of the same buffer, starting at the absolute element `offset`.
    pub fn with_offset(&self, offset: usize) -> Self {
        Self {
            buffer: self.buffer.clone(),
            offset,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements addressable from this alias's offset.
    pub fn len(&self) -> usize {
        self.buffer.borrow().len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `idx` relative to this alias's offset.
    pub fn get(&self, idx: usize) -> Result<T> {
        let buffer = self.buffer.borrow();
        self.check_bounds(idx, buffer.len())?;
        Ok(buffer[self.offset + idx])
    }

    pub fn set(&self, idx: usize, v: T) -> Result<()> {
        let mut buffer = self.buffer.borrow_mut();
        self.check_bounds(idx, buffer.len())?;
        buffer[self.offset + idx] = v;
        Ok(())
    }

    /// Element `idx` for an offset already known to be in bounds.
    ///
    /// # Panics
    /// If `idx` is past the end of the buffer.
    pub(crate) fn load(&self, idx: usize) -> T {
        self.buffer.borrow()[self.offset + idx]
    }

    /// Number of live aliases of the underlying buffer.
    pub fn alias_count(&self) -> usize {
        Rc::strong_count(&self.buffer)
    }

    pub fn shares_buffer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }

    fn check_bounds(&self, idx: usize, len: usize) -> Result<()> {
        if self.offset + idx >= len {
            crate::bail!(
                "storage access {} (offset {} + {idx}) is out of bounds for a buffer of {len} elements",
                self.offset + idx,
                self.offset
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn aliases_share_writes() {
        let a = Storage::<f32>::from_vec(vec![0.0, 1.0, 2.0, 3.0]);
        let b = a.with_offset(2);
        assert_eq!(b.get(0).unwrap(), 2.0);
        b.set(1, 7.0).unwrap();
        assert_eq!(a.get(3).unwrap(), 7.0);
        assert_eq!(a.alias_count(), 2);
        assert!(a.shares_buffer(&b));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn buffer_outlives_the_original() {
        let b = {
            let a = Storage::<f64>::from_vec(vec![4.0, 5.0]);
            a.with_offset(1)
        };
        assert_eq!(b.alias_count(), 1);
        assert_eq!(b.get(0).unwrap(), 5.0);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let a = Storage::<f32>::new(2);
        assert!(matches!(a.get(2).unwrap_err().inner(), Error::Msg(_)));
        assert!(a.set(5, 1.0).is_err());
        assert!(a.with_offset(1).get(1).is_err());
    }
}
