//! [`NdArray`] - dense rectangular numeric array of arbitrary rank.
//!
//! JSON has no notion of rank or element type, so arrays leave the library
//! as nested sequences (see [`NdArray::to_nested`]) and never come back as
//! arrays.

use crate::error::ShapeError;
use crate::value::Value;

/// Element type of an [`NdArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    Int64,
    UInt64,
    Float64,
}

impl DType {
    pub fn name(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int64 => "int64",
            DType::UInt64 => "uint64",
            DType::Float64 => "float64",
        }
    }
}

/// Flat row-major element buffer of an [`NdArray`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Float(Vec<f64>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::Int(v) => v.len(),
            ArrayData::UInt(v) => v.len(),
            ArrayData::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::Bool(_) => DType::Bool,
            ArrayData::Int(_) => DType::Int64,
            ArrayData::UInt(_) => DType::UInt64,
            ArrayData::Float(_) => DType::Float64,
        }
    }

    /// Element at flat `index` as a plain scalar. Non-finite floats become
    /// `Null`, as `serde_json` does for `f64`.
    fn scalar(&self, index: usize) -> Value {
        match self {
            ArrayData::Bool(v) => Value::Bool(v[index]),
            ArrayData::Int(v) => Value::from(v[index]),
            ArrayData::UInt(v) => Value::from(v[index]),
            ArrayData::Float(v) => Value::from(v[index]),
        }
    }

    fn first_non_finite(&self) -> Option<usize> {
        match self {
            ArrayData::Float(v) => v.iter().position(|x| !x.is_finite()),
            _ => None,
        }
    }
}

impl From<Vec<bool>> for ArrayData {
    fn from(v: Vec<bool>) -> Self {
        ArrayData::Bool(v)
    }
}

impl From<Vec<i32>> for ArrayData {
    fn from(v: Vec<i32>) -> Self {
        ArrayData::Int(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<i64>> for ArrayData {
    fn from(v: Vec<i64>) -> Self {
        ArrayData::Int(v)
    }
}

impl From<Vec<u64>> for ArrayData {
    fn from(v: Vec<u64>) -> Self {
        ArrayData::UInt(v)
    }
}

impl From<Vec<f64>> for ArrayData {
    fn from(v: Vec<f64>) -> Self {
        ArrayData::Float(v)
    }
}

/// A dense numeric array: a shape plus a flat row-major buffer.
///
/// The element count always equals the product of the shape; rank 0 (empty
/// shape) holds exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl NdArray {
    /// Builds an array, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: impl Into<ArrayData>) -> Result<Self, ShapeError> {
        let data = data.into();
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(ShapeError::Mismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over `data`.
    pub fn from_vec(data: impl Into<ArrayData>) -> Self {
        let data = data.into();
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Rank-0 array holding a single element.
    pub fn scalar(data: impl Into<ArrayData>) -> Result<Self, ShapeError> {
        Self::new(Vec::new(), data)
    }

    /// Two-dimensional array from equally long rows.
    pub fn from_rows<T>(rows: Vec<Vec<T>>) -> Result<Self, ShapeError>
    where
        Vec<T>: Into<ArrayData>,
    {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut flat = Vec::with_capacity(width.saturating_mul(height));
        for (row, items) in rows.into_iter().enumerate() {
            if items.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    actual: items.len(),
                });
            }
            flat.extend(items);
        }
        Self::new(vec![height, width], flat)
    }

    /// Same elements under a new shape.
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self, ShapeError> {
        Self::new(shape, self.data)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Converts the array to nested sequences matching its shape.
    ///
    /// Rank 0 yields the bare scalar, rank 1 a flat sequence, rank k a
    /// sequence of rank k-1 results.
    pub fn to_nested(&self) -> Value {
        if self.shape.is_empty() {
            return self.data.scalar(0);
        }
        self.nest(0, 0)
    }

    fn nest(&self, axis: usize, offset: usize) -> Value {
        let dim = self.shape[axis];
        if dim == 0 {
            return Value::Sequence(Vec::new());
        }
        if axis + 1 == self.shape.len() {
            return Value::Sequence((0..dim).map(|i| self.data.scalar(offset + i)).collect());
        }
        // Bounded by `element_count`, which also covers the non-zero axes.
        let stride: usize = self.shape[axis + 1..].iter().product();
        Value::Sequence(
            (0..dim)
                .map(|i| self.nest(axis + 1, offset + i * stride))
                .collect(),
        )
    }

    /// Multi-index of the first NaN or infinite element, if any.
    pub fn first_non_finite(&self) -> Option<Vec<usize>> {
        let flat = self.data.first_non_finite()?;
        Some(unravel(flat, &self.shape))
    }
}

/// Element count of `shape`. The product of the non-zero axes must fit in
/// `usize` even when some axis is zero, so every sub-shape stays addressable.
fn element_count(shape: &[usize]) -> Result<usize, ShapeError> {
    let nonzero = shape
        .iter()
        .filter(|&&dim| dim != 0)
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| ShapeError::Overflow(shape.to_vec()))?;
    if shape.contains(&0) {
        Ok(0)
    } else {
        Ok(nonzero)
    }
}

fn unravel(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (axis, &dim) in shape.iter().enumerate().rev() {
        index[axis] = flat % dim;
        flat /= dim;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_shape() {
        let err = NdArray::new(vec![2, 2], vec![1i64, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Mismatch {
                shape: vec![2, 2],
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = NdArray::from_rows(vec![vec![1i64, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Ragged {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_overflowing_shape() {
        let err = NdArray::new(vec![usize::MAX, 2], Vec::<i64>::new()).unwrap_err();
        assert!(matches!(err, ShapeError::Overflow(_)));
    }

    #[test]
    fn rejects_overflowing_shape_behind_zero_axis() {
        let err = NdArray::new(vec![0, usize::MAX, 2], Vec::<i64>::new()).unwrap_err();
        assert_eq!(err, ShapeError::Overflow(vec![0, usize::MAX, 2]));
        let err = NdArray::new(vec![usize::MAX, 2, 0], Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, ShapeError::Overflow(_)));
    }

    #[test]
    fn leading_zero_axis_nests_to_empty_sequence() {
        let a = NdArray::new(vec![0, usize::MAX], Vec::<i64>::new()).unwrap();
        assert_eq!(a.to_nested(), Value::Sequence(vec![]));
        assert_eq!(Value::from(a).to_string(), "array([])");
    }

    #[test]
    fn rank_zero_is_a_scalar() {
        let a = NdArray::scalar(vec![7i64]).unwrap();
        assert_eq!(a.rank(), 0);
        assert_eq!(a.to_nested(), Value::from(7));
    }

    #[test]
    fn nests_by_shape() {
        let a = NdArray::new(vec![2, 3], vec![1i64, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(
            a.to_nested(),
            Value::from(vec![vec![1, 2, 3], vec![4, 5, 6]])
        );
    }

    #[test]
    fn zero_dimensions_nest_to_empty_sequences() {
        let a = NdArray::new(vec![2, 0], Vec::<f64>::new()).unwrap();
        assert_eq!(
            a.to_nested(),
            Value::Sequence(vec![Value::Sequence(vec![]), Value::Sequence(vec![])])
        );
        let b = NdArray::new(vec![0, 3], Vec::<f64>::new()).unwrap();
        assert_eq!(b.to_nested(), Value::Sequence(vec![]));
    }

    #[test]
    fn reshape_keeps_elements() {
        let a = NdArray::from_vec(vec![0i64, 12, -42]).reshape(vec![3, 1]).unwrap();
        assert_eq!(a.shape(), &[3, 1]);
        assert_eq!(a.to_nested(), Value::from(vec![vec![0], vec![12], vec![-42]]));
    }

    #[test]
    fn locates_first_non_finite_element() {
        let a = NdArray::new(vec![2, 2], vec![1.0, 2.0, f64::NAN, 4.0]).unwrap();
        assert_eq!(a.first_non_finite(), Some(vec![1, 0]));
        let b = NdArray::from_vec(vec![1.0, 2.0]);
        assert_eq!(b.first_non_finite(), None);
    }

    #[test]
    fn dtype_follows_buffer() {
        assert_eq!(NdArray::from_vec(vec![true]).dtype(), DType::Bool);
        assert_eq!(NdArray::from_vec(vec![1i32]).dtype(), DType::Int64);
        assert_eq!(NdArray::from_vec(vec![1u64]).dtype(), DType::UInt64);
        assert_eq!(NdArray::from_vec(vec![1.5]).dtype().name(), "float64");
    }
}
