//! Stensor is a small strided-tensor engine.
//!
//! A tensor is a [`Storage`] (a reference-counted flat buffer plus an offset), a [`Shape`]
//! and a stride [`IndexArray`]. Slicing, transposing, permuting and reshaping only rewrite
//! the shape, stride and offset, so the resulting tensors share the original buffer:
//! a write through one of them is visible through all of them. Use [`Tensor::deep_copy`]
//! when an independent copy is needed.
//!
//! Tensors are single-threaded: the shared buffer lives behind an `Rc`, so no tensor is
//! `Send` or `Sync`.
//!
//! ## A quick guide
//! - Create tensors with [`Tensor::zeros`], [`Tensor::ones`], [`Tensor::rand`],
//!   [`Tensor::from_vec`] and friends, or the lower level [`TensorMaker`].
//! - Read and write single elements with [`Tensor::get`] and [`Tensor::set`].
//! - Build views with [`Tensor::slice`], [`Tensor::slice_range`], [`Tensor::transpose`],
//!   [`Tensor::permute`] and [`Tensor::view`].
//! - Reduce with [`Tensor::sum`] and [`Tensor::sum_dim`].
//!
//! ```
//! use stensor_core::Tensor;
//!
//! let t = Tensor::<f32>::from_vec((0..6).map(|x| x as f32).collect(), [2, 3]).unwrap();
//! let col = t.slice(1, 1).unwrap();
//! col.set(&[0, 0], 10.0).unwrap();
//! assert_eq!(t.get(&[0, 1]).unwrap(), 10.0);
//!
//! let tt = t.transpose(0, 1).unwrap();
//! assert!(!tt.is_contiguous());
//! assert_eq!(tt.sum_dim(1).unwrap().to_vec().unwrap(), vec![3.0, 14.0, 7.0]);
//! ```

mod display;
mod dtype;
mod error;
mod index;
mod maker;
mod ops;
mod shape;
mod storage;
mod tensor;

pub use dtype::{DType, RandDispatch};
pub use error::{Context, Error, Result};
pub use index::IndexArray;
pub use maker::TensorMaker;
pub use shape::Shape;
pub use storage::Storage;
pub use tensor::{Iter, Tensor, TensorCore, TensorCursor};
