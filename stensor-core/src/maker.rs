use log::debug;
use rand::Rng;

use crate::{DType, Result, Shape, TensorCore};

/// Factory for freshly allocated, contiguous tensors.
pub struct TensorMaker;

impl TensorMaker {
    fn filled<T: DType>(
        shape: impl Into<Shape>,
        fill: impl FnOnce(&mut [T]),
    ) -> Result<TensorCore<T>> {
        let shape = shape.into();
        shape.validate()?;
        let mut data = vec![T::ZERO; shape.d_size()];
        fill(data.as_mut_slice());
        TensorCore::from_vec(data, shape)
    }

    pub fn zeros<T: DType>(shape: impl Into<Shape>) -> Result<TensorCore<T>> {
        TensorCore::zeros(shape)
    }

    pub fn ones<T: DType>(shape: impl Into<Shape>) -> Result<TensorCore<T>> {
        Self::full(shape, T::ONE)
    }

    /// Create a tensor filled with some value.
    pub fn full<T: DType>(shape: impl Into<Shape>, v: T) -> Result<TensorCore<T>> {
        Self::filled(shape, |data: &mut [T]| data.fill(v))
    }

    /// I.i.d. uniform samples on `[0, 1)` from the thread-local generator.
    pub fn rand<T: DType>(shape: impl Into<Shape>) -> Result<TensorCore<T>> {
        Self::rand_with(shape, &mut rand::rng())
    }

    /// I.i.d. standard normal samples from the thread-local generator.
    pub fn randn<T: DType>(shape: impl Into<Shape>) -> Result<TensorCore<T>> {
        Self::randn_with(shape, &mut rand::rng())
    }

    /// Uniform samples drawn from `rng`; pass a seeded generator for reproducible tensors.
    pub fn rand_with<T: DType, R: Rng + ?Sized>(
        shape: impl Into<Shape>,
        rng: &mut R,
    ) -> Result<TensorCore<T>> {
        let t = Self::filled(shape, |data: &mut [T]| T::fill_with_uniform(rng, data))?;
        debug!("uniform {} tensor of shape {}", T::NAME, t.shape());
        Ok(t)
    }

    pub fn randn_with<T: DType, R: Rng + ?Sized>(
        shape: impl Into<Shape>,
        rng: &mut R,
    ) -> Result<TensorCore<T>> {
        let t = Self::filled(shape, |data: &mut [T]| T::fill_with_normal(rng, data))?;
        debug!("normal {} tensor of shape {}", T::NAME, t.shape());
        Ok(t)
    }

    pub fn zeros_like<T: DType>(tensor: &TensorCore<T>) -> Result<TensorCore<T>> {
        Self::zeros(tensor.shape())
    }

    pub fn ones_like<T: DType>(tensor: &TensorCore<T>) -> Result<TensorCore<T>> {
        Self::ones(tensor.shape())
    }

    pub fn rand_like<T: DType>(tensor: &TensorCore<T>) -> Result<TensorCore<T>> {
        Self::rand(tensor.shape())
    }

    pub fn randn_like<T: DType>(tensor: &TensorCore<T>) -> Result<TensorCore<T>> {
        Self::randn(tensor.shape())
    }
}
