use log::{debug, trace};

use crate::{
    index::increment, tensor::contiguous_strides, DType, Error, IndexArray, Result, Shape,
    Storage,
};

/// Storage, shape and stride: one logical tensor over a (possibly shared) buffer.
///
/// View operations ([`slice`](Self::slice), [`transpose`](Self::transpose),
/// [`view`](Self::view), [`permute`](Self::permute)) return a new `TensorCore`
/// aliasing the same buffer. Only constructors and reductions allocate.
#[derive(Debug)]
pub struct TensorCore<T: DType> {
    storage: Storage<T>,
    shape: Shape,
    stride: IndexArray,
}

impl<T: DType> TensorCore<T> {
    /// A fresh, zero-filled tensor.
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        debug!("allocating {} elements for shape {shape}", shape.d_size());
        let storage = Storage::new(shape.d_size());
        Ok(Self::from_raw(storage, shape))
    }

    /// A fresh tensor holding a copy of `data`, laid out row-major.
    pub fn from_slice(data: &[T], shape: impl Into<Shape>) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape)
    }

    pub fn from_vec(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        if data.len() != shape.d_size() {
            return Err(Error::DimensionMismatch {
                context: "data length for shape",
                expected: shape.d_size(),
                got: data.len(),
            });
        }
        Ok(Self::from_raw(Storage::from_vec(data), shape))
    }

    /// Wrap an existing storage with contiguous strides for `shape`.
    pub fn from_storage(storage: Storage<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        if storage.len() < shape.d_size() {
            return Err(Error::invalid(format!(
                "storage holds {} elements but shape {shape} needs {}",
                storage.len(),
                shape.d_size()
            )));
        }
        Ok(Self::from_raw(storage, shape))
    }

    /// Fully explicit construction. Every reachable offset must lie inside the storage.
    pub fn from_parts(
        storage: Storage<T>,
        shape: impl Into<Shape>,
        stride: impl Into<IndexArray>,
    ) -> Result<Self> {
        let shape = shape.into();
        let stride = stride.into();
        shape.validate()?;
        if stride.len() != shape.n_dim() {
            return Err(Error::DimensionMismatch {
                context: "stride rank",
                expected: shape.n_dim(),
                got: stride.len(),
            });
        }
        if let Some(dim) = (0..shape.n_dim()).find(|&d| shape[d] == 1 && stride[d] != 0) {
            return Err(Error::invalid(format!(
                "size-1 dimension {dim} must have stride 0, got {}",
                stride[dim]
            )));
        }
        let last = (0..shape.n_dim())
            .try_fold(0usize, |acc, d| {
                (shape[d] - 1)
                    .checked_mul(stride[d])
                    .and_then(|reach| acc.checked_add(reach))
            })
            .ok_or_else(|| {
                Error::invalid(format!(
                    "strides {:?} overflow the addressable range for shape {shape}",
                    &*stride
                ))
            })?;
        if last >= storage.len() {
            return Err(Error::invalid(format!(
                "strides {:?} reach element {last} of a storage holding {}",
                &*stride,
                storage.len()
            )));
        }
        Ok(Self {
            storage,
            shape,
            stride,
        })
    }

    fn from_raw(storage: Storage<T>, shape: Shape) -> Self {
        let stride = contiguous_strides(&shape);
        Self {
            storage,
            shape,
            stride,
        }
    }

    pub fn n_dim(&self) -> usize {
        self.shape.n_dim()
    }

    pub fn d_size(&self) -> usize {
        self.shape.d_size()
    }

    /// Size of dimension `dim`.
    pub fn size(&self, dim: usize) -> Result<usize> {
        self.check_dim(dim)?;
        Ok(self.shape[dim])
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn stride(&self) -> &IndexArray {
        &self.stride
    }

    /// Offset of this tensor's first element inside the shared buffer.
    pub fn offset(&self) -> usize {
        self.storage.offset()
    }

    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    pub fn shares_storage(&self, other: &Self) -> bool {
        self.storage.shares_buffer(&other.storage)
    }

    /// Every non-degenerate dimension has the row-major stride `sub_size(i + 1)`.
    pub fn is_contiguous(&self) -> bool {
        (0..self.n_dim())
            .all(|i| self.shape[i] == 1 || self.stride[i] == self.shape.sub_size(i + 1))
    }

    fn check_dim(&self, dim: usize) -> Result<()> {
        if dim >= self.n_dim() {
            return Err(Error::DimensionOutOfRange {
                dim,
                n_dim: self.n_dim(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize, dim: usize) -> Result<()> {
        if index >= self.shape[dim] {
            return Err(Error::IndexOutOfRange {
                index,
                dim,
                size: self.shape[dim],
            });
        }
        Ok(())
    }

    /// Unchecked dot product of a full-rank index with the strides.
    pub(crate) fn flat_offset(&self, indices: &[usize]) -> usize {
        indices.iter().zip(self.stride.iter()).map(|(i, s)| i * s).sum()
    }

    fn checked_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.n_dim() {
            return Err(Error::DimensionMismatch {
                context: "index count",
                expected: self.n_dim(),
                got: indices.len(),
            });
        }
        for (dim, &index) in indices.iter().enumerate() {
            self.check_index(index, dim)?;
        }
        Ok(self.flat_offset(indices))
    }

    /// Element at `indices`, which must name every dimension.
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        let offset = self.checked_offset(indices)?;
        self.storage.get(offset)
    }

    /// Write the element at `indices`. The write is visible through every alias.
    pub fn set(&self, indices: &[usize], v: T) -> Result<()> {
        let offset = self.checked_offset(indices)?;
        self.storage.set(offset, v)
    }

    pub fn update(&self, indices: &[usize], f: impl FnOnce(T) -> T) -> Result<()> {
        let offset = self.checked_offset(indices)?;
        let v = self.storage.get(offset)?;
        self.storage.set(offset, f(v))
    }

    /// The value of a one-element tensor.
    pub fn item(&self) -> Result<T> {
        if self.d_size() != 1 {
            return Err(Error::invalid(format!(
                "only one element tensors can be converted to scalars, got shape {}",
                self.shape
            )));
        }
        self.storage.get(0)
    }

    /// Raw storage element `idx`, relative to this tensor's offset and ignoring strides.
    pub fn item_at(&self, idx: usize) -> Result<T> {
        self.storage.get(idx)
    }

    /// Rank-flexible element access.
    ///
    /// A longer index contributes only its trailing `n_dim()` entries; a shorter one
    /// is matched against the trailing dimensions. Entries on size-1 dimensions are
    /// ignored, which is what lets a lower-rank tensor be read with a full-rank
    /// index from a broadcast or reduction loop.
    pub fn eval(&self, indices: &[usize]) -> Result<T> {
        let n = self.n_dim();
        let (indices, first_dim) = if indices.len() >= n {
            (&indices[indices.len() - n..], 0)
        } else {
            (indices, n - indices.len())
        };
        let mut offset = 0;
        for (k, &index) in indices.iter().enumerate() {
            let dim = first_dim + k;
            if self.shape[dim] == 1 {
                continue;
            }
            self.check_index(index, dim)?;
            offset += index * self.stride[dim];
        }
        self.storage.get(offset)
    }

    /// All logical elements in row-major order.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(self.d_size());
        let mut idx = IndexArray::zeros(self.n_dim());
        loop {
            out.push(self.storage.get(self.flat_offset(&idx))?);
            if !increment(&mut idx, self.shape.dims()) {
                break;
            }
        }
        Ok(out)
    }

    /// Copy the values into fresh contiguous storage. The result shares nothing with `self`.
    pub fn deep_copy(&self) -> Result<Self> {
        debug!("deep copy of {} elements, shape {}", self.d_size(), self.shape);
        Ok(Self::from_raw(
            Storage::from_vec(self.to_vec()?),
            self.shape.clone(),
        ))
    }

    fn alias(&self, offset: usize, shape: Shape, stride: IndexArray) -> Self {
        trace!(
            "view: shape {shape} stride {:?} offset {offset} over shape {} stride {:?}",
            &*stride,
            self.shape,
            &*self.stride
        );
        Self {
            storage: self.storage.with_offset(offset),
            shape,
            stride,
        }
    }

    /// Fix dimension `dim` at `idx`. The dimension stays, with size 1.
    pub fn slice(&self, idx: usize, dim: usize) -> Result<Self> {
        self.check_dim(dim)?;
        self.check_index(idx, dim)?;
        let offset = self.offset() + idx * self.stride[dim];
        let mut shape = self.shape.clone();
        let mut stride = self.stride.clone();
        shape[dim] = 1;
        stride[dim] = 0;
        Ok(self.alias(offset, shape, stride))
    }

    /// Restrict dimension `dim` to the half-open range `start..end`.
    pub fn slice_range(&self, start: usize, end: usize, dim: usize) -> Result<Self> {
        self.check_dim(dim)?;
        self.check_index(start, dim)?;
        let size = self.shape[dim];
        if end > size {
            return Err(Error::IndexOutOfRange {
                index: end,
                dim,
                size,
            });
        }
        if start >= end {
            return Err(Error::invalid(format!(
                "slice start {start} must be smaller than end {end}"
            )));
        }
        let offset = self.offset() + start * self.stride[dim];
        let mut shape = self.shape.clone();
        let mut stride = self.stride.clone();
        shape[dim] = end - start;
        if shape[dim] == 1 {
            stride[dim] = 0;
        }
        Ok(self.alias(offset, shape, stride))
    }

    pub fn transpose(&self, dim1: usize, dim2: usize) -> Result<Self> {
        self.check_dim(dim1)?;
        self.check_dim(dim2)?;
        let mut shape = self.shape.clone();
        let mut stride = self.stride.clone();
        shape.swap(dim1, dim2);
        stride.swap(dim1, dim2);
        Ok(self.alias(self.offset(), shape, stride))
    }

    /// Reinterpret a contiguous tensor under a shape with the same element count.
    pub fn view(&self, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        shape.validate()?;
        if !self.is_contiguous() {
            return Err(Error::invalid("view() is only supported for contiguous tensors"));
        }
        if shape.d_size() != self.d_size() {
            return Err(Error::DimensionMismatch {
                context: "element count for view",
                expected: self.d_size(),
                got: shape.d_size(),
            });
        }
        let stride = contiguous_strides(&shape);
        Ok(self.alias(self.offset(), shape, stride))
    }

    /// Reorder the axes: result dimension `i` is source dimension `dims[i]`.
    pub fn permute(&self, dims: &[usize]) -> Result<Self> {
        let n = self.n_dim();
        if dims.len() != n {
            return Err(Error::DimensionMismatch {
                context: "permutation length",
                expected: n,
                got: dims.len(),
            });
        }
        let mut seen = vec![false; n];
        for &d in dims {
            self.check_dim(d)?;
            if std::mem::replace(&mut seen[d], true) {
                return Err(Error::invalid(format!(
                    "dimension {d} appears more than once in permutation {dims:?}"
                )));
            }
        }
        let shape = Shape::new(dims.iter().map(|&d| self.shape[d]).collect::<Vec<_>>());
        let stride = IndexArray::from(dims.iter().map(|&d| self.stride[d]).collect::<Vec<_>>());
        Ok(self.alias(self.offset(), shape, stride))
    }

    /// Sum of all elements, walked in row-major order.
    pub fn sum(&self) -> Result<T> {
        let mut acc = T::ZERO;
        let mut idx = IndexArray::zeros(self.n_dim());
        loop {
            acc = acc + self.eval(&idx)?;
            if !increment(&mut idx, self.shape.dims()) {
                break;
            }
        }
        Ok(acc)
    }

    /// Sum over dimension `dim`, removing it. Each output is accumulated along
    /// `dim` in increasing index order.
    pub fn sum_dim(&self, dim: usize) -> Result<Self> {
        self.check_dim(dim)?;
        let out = Self::zeros(self.shape.remove(dim)?)?;
        let extent = self.shape[dim];

        // Walk every other dimension with `dim` pinned at 0.
        let mut outer = self.shape.clone();
        outer[dim] = 1;
        let mut idx = IndexArray::zeros(self.n_dim());
        let mut out_idx = IndexArray::zeros(out.n_dim());
        loop {
            let mut acc = T::ZERO;
            for k in 0..extent {
                idx[dim] = k;
                acc = acc + self.eval(&idx)?;
            }
            idx[dim] = 0;

            for (slot, &i) in out_idx
                .iter_mut()
                .zip(idx.iter().enumerate().filter(|&(d, _)| d != dim).map(|(_, i)| i))
            {
                *slot = i;
            }
            out.set(&out_idx, acc)?;

            if !increment(&mut idx, outer.dims()) {
                break;
            }
        }
        debug!("sum over dim {dim}: {} -> {}", self.shape, out.shape);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arange(shape: &[usize]) -> TensorCore<f32> {
        let n: usize = shape.iter().product();
        TensorCore::from_vec((0..n).map(|x| x as f32).collect(), shape).unwrap()
    }

    #[test]
    fn offsets_use_strides() {
        let t = arange(&[2, 3]);
        assert_eq!(t.get(&[1, 2]).unwrap(), 5.0);
        let tt = t.transpose(0, 1).unwrap();
        assert_eq!(tt.get(&[2, 1]).unwrap(), 5.0);
        assert_eq!(&tt.stride()[..], &[1, 3]);
    }

    #[test]
    fn eval_aligns_on_trailing_dimensions() {
        let t = arange(&[2, 3]);
        // Longer index: the leading entry is dropped.
        assert_eq!(t.eval(&[7, 1, 2]).unwrap(), 5.0);
        // Shorter index: matched against the last dimension.
        assert_eq!(t.eval(&[2]).unwrap(), 2.0);
        assert!(matches!(
            t.eval(&[0, 3]),
            Err(Error::IndexOutOfRange { index: 3, dim: 1, size: 3 })
        ));
    }

    #[test]
    fn slice_moves_the_offset() {
        let t = arange(&[3, 4]);
        let row = t.slice(2, 0).unwrap();
        assert_eq!(row.offset(), 8);
        assert_eq!(row.shape(), &Shape::from([1, 4]));
        assert_eq!(&row.stride()[..], &[0, 1]);
        let cols = t.slice_range(1, 3, 1).unwrap();
        assert_eq!(cols.offset(), 1);
        assert_eq!(cols.to_vec().unwrap(), vec![1.0, 2.0, 5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn from_parts_checks_reach() {
        let storage = Storage::<f32>::new(6);
        assert!(TensorCore::from_parts(storage.clone(), [2, 3], [3, 1]).is_ok());
        assert!(TensorCore::from_parts(storage.clone(), [2, 3], [4, 1]).is_err());
        assert!(TensorCore::from_parts(storage.clone(), [1, 3], [3, 1]).is_err());
        assert!(matches!(
            TensorCore::from_parts(storage, [2, 3], [1]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn sum_dim_of_a_vector_is_a_scalar() {
        let t = arange(&[4]);
        let s = t.sum_dim(0).unwrap();
        assert_eq!(s.n_dim(), 0);
        assert_eq!(s.item().unwrap(), 6.0);
    }
}
