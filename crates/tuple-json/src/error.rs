//! Error types for preserialization, restoration and array construction.

use thiserror::Error;

/// Errors raised while turning a composite value into a JSON-safe value.
///
/// `path` is a JSON Pointer into the input value (`""` is the root).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreserializeError {
    #[error("mapping at `{path}` already carries the reserved tuple marker")]
    MarkerCollision { path: String },
    #[error("array element at `{path}` is not a finite number")]
    NonFiniteNumber { path: String },
}

/// Errors raised by strict tuple restoration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("tuple marker at `{path}` has unexpected key `{key}`")]
    UnexpectedKey { path: String, key: String },
    #[error("tuple marker at `{path}` is missing `item{index}`")]
    MissingItem { path: String, index: usize },
}

/// Errors raised when building an [`NdArray`](crate::NdArray).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape {shape:?} holds {expected} elements, got {actual}")]
    Mismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} elements, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("shape {0:?} overflows the addressable element count")]
    Overflow(Vec<usize>),
}

/// Crate-wide error.
///
/// The JSON text codec yields `Preserialize` and `Json`. `Restore` and
/// `Shape` let callers that restore strictly or build arrays propagate into
/// the same type with `?`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Preserialize(#[from] PreserializeError),
    #[error(transparent)]
    Restore(#[from] RestoreError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_json_str, try_restore_tuples, NdArray, Value};

    fn grid_from_json(text: &str, shape: Vec<usize>) -> Result<NdArray, Error> {
        let value = from_json_str(text)?;
        let flat = value
            .as_sequence()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_number)
            .filter_map(serde_json::Number::as_i64)
            .collect::<Vec<_>>();
        Ok(NdArray::new(shape, flat)?)
    }

    #[test]
    fn shape_errors_propagate_into_crate_error() {
        assert!(grid_from_json("[1, 2, 3, 4]", vec![2, 2]).is_ok());
        let err = grid_from_json("[1, 2, 3]", vec![2, 2]).unwrap_err();
        assert!(matches!(err, Error::Shape(ShapeError::Mismatch { .. })));
        assert_eq!(err.to_string(), "shape [2, 2] holds 4 elements, got 3");
    }

    #[test]
    fn restore_errors_propagate_into_crate_error() {
        let strict = || -> Result<Value, Error> {
            Ok(try_restore_tuples(serde_json::json!({"@type": "tuple", "item2": 0}))?)
        };
        assert!(matches!(strict(), Err(Error::Restore(RestoreError::MissingItem { .. }))));
    }
}
