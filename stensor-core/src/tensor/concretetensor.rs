use rand::Rng;

use crate::{
    tensor::{Iter, TensorCursor},
    DType, IndexArray, Result, Shape, Storage, TensorCore, TensorMaker,
};

/// Tensors are n dimensional arrays. Only functions which allocate, copy
/// data, or validate their arguments return `Result`s.
///
/// A `Tensor` exclusively owns its [`TensorCore`] and cannot be cloned: use
/// [`Tensor::deep_copy`] to duplicate values, or one of the view methods to
/// get a second handle onto the same storage.
#[derive(Debug)]
pub struct Tensor<T: DType = f32>(Box<TensorCore<T>>);

impl<T: DType> From<TensorCore<T>> for Tensor<T> {
    fn from(core: TensorCore<T>) -> Self {
        Self(Box::new(core))
    }
}

impl<T: DType> Tensor<T> {
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        TensorMaker::zeros(shape).map(Self::from)
    }

    pub fn ones(shape: impl Into<Shape>) -> Result<Self> {
        TensorMaker::ones(shape).map(Self::from)
    }

    pub fn full(shape: impl Into<Shape>, v: T) -> Result<Self> {
        TensorMaker::full(shape, v).map(Self::from)
    }

    /// Uniform samples on `[0, 1)`.
    pub fn rand(shape: impl Into<Shape>) -> Result<Self> {
        TensorMaker::rand(shape).map(Self::from)
    }

    /// Standard normal samples.
    pub fn randn(shape: impl Into<Shape>) -> Result<Self> {
        TensorMaker::randn(shape).map(Self::from)
    }

    pub fn rand_with<R: Rng + ?Sized>(shape: impl Into<Shape>, rng: &mut R) -> Result<Self> {
        TensorMaker::rand_with(shape, rng).map(Self::from)
    }

    pub fn randn_with<R: Rng + ?Sized>(shape: impl Into<Shape>, rng: &mut R) -> Result<Self> {
        TensorMaker::randn_with(shape, rng).map(Self::from)
    }

    pub fn zeros_like(tensor: &Self) -> Result<Self> {
        TensorMaker::zeros_like(tensor.core()).map(Self::from)
    }

    pub fn ones_like(tensor: &Self) -> Result<Self> {
        TensorMaker::ones_like(tensor.core()).map(Self::from)
    }

    pub fn rand_like(tensor: &Self) -> Result<Self> {
        TensorMaker::rand_like(tensor.core()).map(Self::from)
    }

    pub fn randn_like(tensor: &Self) -> Result<Self> {
        TensorMaker::randn_like(tensor.core()).map(Self::from)
    }

    pub fn from_slice(data: &[T], shape: impl Into<Shape>) -> Result<Self> {
        TensorCore::from_slice(data, shape).map(Self::from)
    }

    pub fn from_vec(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        TensorCore::from_vec(data, shape).map(Self::from)
    }

    pub fn from_storage(storage: Storage<T>, shape: impl Into<Shape>) -> Result<Self> {
        TensorCore::from_storage(storage, shape).map(Self::from)
    }

    pub fn from_parts(
        storage: Storage<T>,
        shape: impl Into<Shape>,
        stride: impl Into<IndexArray>,
    ) -> Result<Self> {
        TensorCore::from_parts(storage, shape, stride).map(Self::from)
    }

    pub fn core(&self) -> &TensorCore<T> {
        &self.0
    }

    pub fn into_core(self) -> TensorCore<T> {
        *self.0
    }

    pub fn n_dim(&self) -> usize {
        self.0.n_dim()
    }

    pub fn d_size(&self) -> usize {
        self.0.d_size()
    }

    pub fn size(&self, dim: usize) -> Result<usize> {
        self.0.size(dim)
    }

    pub fn shape(&self) -> &Shape {
        self.0.shape()
    }

    pub fn stride(&self) -> &IndexArray {
        self.0.stride()
    }

    pub fn offset(&self) -> usize {
        self.0.offset()
    }

    pub fn storage(&self) -> &Storage<T> {
        self.0.storage()
    }

    pub fn is_contiguous(&self) -> bool {
        self.0.is_contiguous()
    }

    pub fn shares_storage(&self, other: &Self) -> bool {
        self.0.shares_storage(&other.0)
    }

    pub fn get(&self, indices: &[usize]) -> Result<T> {
        self.0.get(indices)
    }

    pub fn set(&self, indices: &[usize], v: T) -> Result<()> {
        self.0.set(indices, v)
    }

    pub fn update(&self, indices: &[usize], f: impl FnOnce(T) -> T) -> Result<()> {
        self.0.update(indices, f)
    }

    pub fn item(&self) -> Result<T> {
        self.0.item()
    }

    pub fn item_at(&self, idx: usize) -> Result<T> {
        self.0.item_at(idx)
    }

    pub fn eval(&self, indices: &[usize]) -> Result<T> {
        self.0.eval(indices)
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.0.to_vec()
    }

    pub fn deep_copy(&self) -> Result<Self> {
        self.0.deep_copy().map(Self::from)
    }

    pub fn slice(&self, idx: usize, dim: usize) -> Result<Self> {
        self.0.slice(idx, dim).map(Self::from)
    }

    pub fn slice_range(&self, start: usize, end: usize, dim: usize) -> Result<Self> {
        self.0.slice_range(start, end, dim).map(Self::from)
    }

    pub fn transpose(&self, dim1: usize, dim2: usize) -> Result<Self> {
        self.0.transpose(dim1, dim2).map(Self::from)
    }

    pub fn view(&self, shape: impl Into<Shape>) -> Result<Self> {
        self.0.view(shape).map(Self::from)
    }

    pub fn permute(&self, dims: &[usize]) -> Result<Self> {
        self.0.permute(dims).map(Self::from)
    }

    pub fn sum(&self) -> Result<T> {
        self.0.sum()
    }

    pub fn sum_dim(&self, dim: usize) -> Result<Self> {
        self.0.sum_dim(dim).map(Self::from)
    }

    pub fn begin(&self) -> TensorCursor<'_, T> {
        TensorCursor::begin(self)
    }

    pub fn end(&self) -> TensorCursor<'_, T> {
        TensorCursor::end(self)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.0)
    }
}

impl<'a, T: DType> IntoIterator for &'a Tensor<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
