pub mod concretetensor;
pub mod tensorcore;
pub mod iter;

pub use concretetensor::Tensor;
pub use tensorcore::TensorCore;
pub use iter::{Iter, TensorCursor};

use crate::{IndexArray, Shape};

/// Compute default (contiguous) strides for a tensor of given shape.
///
/// Size-1 dimensions get stride 0 so they never advance the flat offset.
pub(crate) fn contiguous_strides(shape: &Shape) -> IndexArray {
    let mut strides = Vec::with_capacity(shape.n_dim());
    let mut acc = 1;
    // Iterate dims in reverse to accumulate products
    for &dim in shape.dims().iter().rev() {
        strides.push(if dim == 1 { 0 } else { acc });
        acc *= dim;
    }
    strides.reverse();
    IndexArray::from(strides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_follow_suffix_products() {
        let strides = contiguous_strides(&Shape::from([2, 3, 4]));
        assert_eq!(&*strides, &[12, 4, 1]);
    }

    #[test]
    fn degenerate_axes_get_stride_zero() {
        let strides = contiguous_strides(&Shape::from([2, 1, 3, 1]));
        assert_eq!(&*strides, &[3, 0, 1, 0]);
    }
}
