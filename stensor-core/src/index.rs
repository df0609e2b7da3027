use std::ops::{Deref, DerefMut};

/// An ordered sequence of per-dimension integers: either strides or a multi-index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexArray(Vec<usize>);

impl IndexArray {
    pub fn zeros(n: usize) -> Self {
        Self(vec![0; n])
    }
}

impl Deref for IndexArray {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl DerefMut for IndexArray {
    fn deref_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

impl From<Vec<usize>> for IndexArray {
    fn from(v: Vec<usize>) -> Self {
        Self(v)
    }
}

impl From<&[usize]> for IndexArray {
    fn from(v: &[usize]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for IndexArray {
    fn from(v: [usize; N]) -> Self {
        Self(v.to_vec())
    }
}

/// Ripple-carry increment of `idx` within `shape`, last dimension fastest.
///
/// Returns `false` once the carry runs out of the most significant dimension,
/// leaving `idx` at all-zero.
pub(crate) fn increment(idx: &mut [usize], shape: &[usize]) -> bool {
    for d in (0..idx.len()).rev() {
        if idx[d] + 1 < shape[d] {
            idx[d] += 1;
            return true;
        }
        idx[d] = 0;
    }
    false
}

/// Ripple-borrow decrement, the inverse of [`increment`].
///
/// Returns `false` when `idx` was all-zero, leaving it at the last position.
pub(crate) fn decrement(idx: &mut [usize], shape: &[usize]) -> bool {
    for d in (0..idx.len()).rev() {
        if idx[d] > 0 {
            idx[d] -= 1;
            return true;
        }
        idx[d] = shape[d] - 1;
    }
    false
}
