use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::{Error, Result};

/// The per-dimension sizes of a tensor.
///
/// A `Shape` is a plain sequence of sizes; whether it is usable for a tensor
/// (no zero-sized dimension) is checked by [`Shape::validate`] when a tensor is
/// built from it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        Self(dims.into())
    }

    /// The rank-0 shape of a single scalar.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    pub fn n_dim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements.
    pub fn d_size(&self) -> usize {
        self.sub_size(0)
    }

    /// Product of `dims[i..]`. `sub_size(n_dim())` is 1.
    pub fn sub_size(&self, i: usize) -> usize {
        self.0.get(i..).map_or(1, |tail| tail.iter().product())
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// This shape with dimension `dim` removed.
    pub fn remove(&self, dim: usize) -> Result<Self> {
        if dim >= self.n_dim() {
            return Err(Error::DimensionOutOfRange {
                dim,
                n_dim: self.n_dim(),
            });
        }
        let mut dims = self.0.clone();
        dims.remove(dim);
        Ok(Self(dims))
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dim) = self.0.iter().position(|&d| d == 0) {
            return Err(Error::invalid(format!(
                "dimension {dim} of shape {self} has size 0"
            )));
        }
        Ok(())
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

impl IndexMut<usize> for Shape {
    fn index_mut(&mut self, i: usize) -> &mut usize {
        &mut self.0[i]
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        let shape = Shape::from([2, 3, 4]);
        assert_eq!(shape.n_dim(), 3);
        assert_eq!(shape.d_size(), 24);
        assert_eq!(shape.sub_size(1), 12);
        assert_eq!(shape.sub_size(2), 4);
        assert_eq!(shape.sub_size(3), 1);
    }

    #[test]
    fn scalar() {
        let shape = Shape::scalar();
        assert_eq!(shape.n_dim(), 0);
        assert_eq!(shape.d_size(), 1);
    }

    #[test]
    fn remove() {
        let shape = Shape::from([2, 3, 4]);
        assert_eq!(shape.remove(1).unwrap(), Shape::from([2, 4]));
        assert!(matches!(
            shape.remove(3),
            Err(Error::DimensionOutOfRange { dim: 3, n_dim: 3 })
        ));
    }

    #[test]
    fn zero_sized_dimension_is_rejected() {
        assert!(Shape::from([2, 0]).validate().is_err());
        assert!(Shape::from([2, 1]).validate().is_ok());
    }
}
