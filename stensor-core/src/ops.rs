use std::ops::{Add, Div, Mul, Sub};

use crate::{
    index::increment, Context, DType, Error, IndexArray, Result, Shape, Tensor, TensorCore,
};

/// Shape of `a op b` when the two are aligned on their trailing dimensions.
fn broadcast_shape(a: &Shape, b: &Shape) -> Result<Shape> {
    let n = a.n_dim().max(b.n_dim());
    let mut dims = vec![0; n];
    for (k, slot) in dims.iter_mut().enumerate() {
        let da = (k + a.n_dim()).checked_sub(n).map_or(1, |d| a[d]);
        let db = (k + b.n_dim()).checked_sub(n).map_or(1, |d| b[d]);
        *slot = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            (x, y) => {
                return Err(Error::DimensionMismatch {
                    context: "broadcast size",
                    expected: x,
                    got: y,
                })
            }
        };
    }
    Ok(Shape::new(dims))
}

/// Fresh tensor of `shape` whose elements are `f(full-rank index)`.
fn generate<T: DType>(
    shape: Shape,
    mut f: impl FnMut(&[usize]) -> Result<T>,
) -> Result<TensorCore<T>> {
    let mut data = Vec::with_capacity(shape.d_size());
    let mut idx = IndexArray::zeros(shape.n_dim());
    loop {
        data.push(f(&idx[..])?);
        if !increment(&mut idx, shape.dims()) {
            break;
        }
    }
    TensorCore::from_vec(data, shape)
}

fn zip_with<T: DType>(
    a: &TensorCore<T>,
    b: &TensorCore<T>,
    op: fn(T, T) -> T,
) -> Result<Tensor<T>> {
    let shape = broadcast_shape(a.shape(), b.shape())
        .with_context(|| format!("cannot broadcast {} with {}", a.shape(), b.shape()))?;
    generate(shape, |idx| Ok(op(a.eval(idx)?, b.eval(idx)?))).map(Tensor::from)
}

fn map_with<T: DType>(a: &TensorCore<T>, v: T, op: fn(T, T) -> T) -> Result<Tensor<T>> {
    generate(a.shape().clone(), |idx| Ok(op(a.eval(idx)?, v))).map(Tensor::from)
}

macro_rules! binary_op {
    ($trait:ident, $fn:ident) => {
        impl<T: DType> $trait for &Tensor<T> {
            type Output = Result<Tensor<T>>;
            /// Elementwise, broadcasting size-1 and missing leading dimensions.
            fn $fn(self, rhs: Self) -> Self::Output {
                zip_with(self.core(), rhs.core(), T::$fn)
            }
        }
    };
}

binary_op!(Add, add);
binary_op!(Sub, sub);

macro_rules! scalar_op {
    ($trait:ident, $fn:ident) => {
        impl<T: DType> $trait<T> for &Tensor<T> {
            type Output = Result<Tensor<T>>;
            fn $fn(self, rhs: T) -> Self::Output {
                map_with(self.core(), rhs, T::$fn)
            }
        }
    };
}

scalar_op!(Mul, mul);
scalar_op!(Div, div);
