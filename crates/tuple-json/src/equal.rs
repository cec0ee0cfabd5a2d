use serde_json::Number;

use crate::value::Value;

/// Performs a deep equality check between two composite values.
///
/// Differs from `==` in one respect: numbers compare by numeric value, so
/// `1` equals `1.0`. Kinds never mix: a tuple is not equal to a sequence
/// with the same elements, and an array is not equal to its nested form.
/// Arrays compare by shape and element value.
///
/// # Examples
///
/// ```
/// use tuple_json::{deep_equal, Value};
///
/// assert!(deep_equal(&Value::seq([1, 2]), &Value::seq([1.0, 2.0])));
/// assert!(!deep_equal(&Value::seq([1, 2]), &Value::tuple([1, 2])));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Sequence(a), Value::Sequence(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_equal(a, b))
        }

        (Value::Mapping(obj_a), Value::Mapping(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !deep_equal(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        (Value::Array(a), Value::Array(b)) => {
            a.shape() == b.shape() && deep_equal(&a.to_nested(), &b.to_nested())
        }

        // Different kinds are never equal
        _ => false,
    }
}

fn number_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y);
    }
    // A negative integer against one above i64::MAX.
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nd_array::NdArray;

    #[test]
    fn integers_equal_floats_by_value() {
        assert!(deep_equal(&Value::from(1), &Value::from(1.0)));
        assert!(!deep_equal(&Value::from(1), &Value::from(1.5)));
        assert!(deep_equal(&Value::from(u64::MAX), &Value::from(u64::MAX)));
        assert!(!deep_equal(&Value::from(-1), &Value::from(u64::MAX)));
    }

    #[test]
    fn tuple_is_not_sequence() {
        assert!(!deep_equal(&Value::tuple([1]), &Value::seq([1])));
        assert!(deep_equal(&Value::tuple([1]), &Value::tuple([1.0])));
    }

    #[test]
    fn mappings_compare_by_key() {
        let a = Value::map([("a", 1), ("b", 2)]);
        let b = Value::map([("b", 2.0), ("a", 1.0)]);
        let c = Value::map([("a", 1), ("c", 2)]);
        assert!(deep_equal(&a, &b));
        assert!(!deep_equal(&a, &c));
        assert!(!deep_equal(&a, &Value::map([("a", 1)])));
    }

    #[test]
    fn arrays_compare_by_shape_and_value() {
        let ints = NdArray::from_vec(vec![1i64, 2]);
        let floats = NdArray::from_vec(vec![1.0, 2.0]);
        let column = ints.clone().reshape(vec![2, 1]).unwrap();
        assert!(deep_equal(&Value::from(ints.clone()), &Value::from(floats)));
        assert!(!deep_equal(&Value::from(ints.clone()), &Value::from(column)));
        assert!(!deep_equal(&Value::from(ints), &Value::seq([1, 2])));
    }

    #[test]
    fn different_kinds_are_never_equal() {
        assert!(!deep_equal(&Value::Null, &Value::from(false)));
        assert!(!deep_equal(&Value::from(0), &Value::from(false)));
        assert!(!deep_equal(&Value::from("1"), &Value::from(1)));
    }
}
