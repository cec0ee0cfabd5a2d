//! [`Value`] - the composite value model.
//!
//! A superset of the JSON data model: besides scalars, sequences and
//! mappings it knows fixed-length heterogeneous tuples and dense numeric
//! arrays, neither of which JSON can express directly.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Number, Value as JsonValue};

use crate::constants::{TUPLE_TAG, TYPE_KEY};
use crate::nd_array::NdArray;

/// String-keyed mapping. Iteration follows insertion order; equality does
/// not depend on it.
pub type Mapping = IndexMap<String, Value>;

/// A composite value.
///
/// Derived equality is exact: `Number(1)` and `Number(1.0)` differ, as do a
/// tuple and a sequence holding the same elements. See
/// [`deep_equal`](crate::deep_equal) for a numeric comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Tuple(Vec<Value>),
    Array(NdArray),
}

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
    Tuple,
    Array,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Tuple => "tuple",
            ValueKind::Array => "array",
        }
    }
}

impl Value {
    /// Builds a tuple from its elements.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a sequence from its elements.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mapping from key/value pairs. A repeated key keeps the last
    /// value at the position of its first occurrence.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&NdArray> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// `true` for a mapping whose `@type` entry is the string `tuple`.
    pub fn is_tuple_marker(&self) -> bool {
        self.as_mapping().is_some_and(is_marker_mapping)
    }
}

pub(crate) fn is_marker_mapping(map: &Mapping) -> bool {
    map.get(TYPE_KEY).and_then(Value::as_str) == Some(TUPLE_TAG)
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! impl_from_integer {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl From<f64> for Value {
    /// NaN and infinities have no JSON form and become `Null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::from(f64::from(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<NdArray> for Value {
    fn from(array: NdArray) -> Self {
        Value::Array(array)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Tuple(Vec::new())
    }
}

macro_rules! impl_from_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Into<Value>),+> From<($($name,)+)> for Value {
            fn from(t: ($($name,)+)) -> Self {
                Value::Tuple(vec![$(t.$idx.into()),+])
            }
        }
    };
}

impl_from_tuple!(A 0);
impl_from_tuple!(A 0, B 1);
impl_from_tuple!(A 0, B 1, C 2);
impl_from_tuple!(A 0, B 1, C 2, D 3);
impl_from_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Lifts a JSON value into the composite model. Lossless: arrays become
/// sequences, objects become mappings.
impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            JsonValue::Object(obj) => Value::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::seq(iter)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Compact one-line notation: `(1, "a")`, `(1,)`, `[1, 2]`, `{"k": v}`,
/// `array([[0], [12]])`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_str_literal(f, s),
            Value::Sequence(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_str_literal(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_str("}")
            }
            Value::Array(array) => write!(f, "array({})", array.to_nested()),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tuples_convert_with_arity() {
        assert_eq!(Value::from(()), Value::Tuple(vec![]));
        assert_eq!(
            Value::from((42, "foo")),
            Value::Tuple(vec![Value::from(42), Value::from("foo")])
        );
        assert_eq!(Value::from((1, 2, 3, 4, 5, 6, 7, 8)).as_tuple().map(<[Value]>::len), Some(8));
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(f64::INFINITY), Value::Null);
        assert_eq!(Value::from(2.5).kind(), ValueKind::Number);
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn json_lift_is_structural() {
        let lifted = Value::from(json!({"a": [1, {"b": null}], "c": "d"}));
        assert_eq!(
            lifted,
            Value::map([
                ("a", Value::seq([Value::from(1), Value::map([("b", Value::Null)])])),
                ("c", Value::from("d")),
            ])
        );
    }

    #[test]
    fn mapping_equality_ignores_order() {
        let a = Value::map([("x", 1), ("y", 2)]);
        let b = Value::map([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn tuple_and_sequence_differ() {
        assert_ne!(Value::tuple([1, 2]), Value::seq([1, 2]));
    }

    #[test]
    fn detects_tuple_marker() {
        assert!(Value::map([("@type", "tuple")]).is_tuple_marker());
        assert!(!Value::map([("@type", "other")]).is_tuple_marker());
        assert!(!Value::map([("@type", 1)]).is_tuple_marker());
        assert!(!Value::tuple([1]).is_tuple_marker());
    }

    #[test]
    fn display_matrix() {
        assert_eq!(Value::from(("a", 2.5, false)).to_string(), r#"("a", 2.5, false)"#);
        assert_eq!(Value::from((1,)).to_string(), "(1,)");
        assert_eq!(Value::from(()).to_string(), "()");
        assert_eq!(Value::seq([1, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Value::map([("k", Value::tuple(["v"]))]).to_string(),
            r#"{"k": ("v",)}"#
        );
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from("a\"b").to_string(), r#""a\"b""#);
        let array = NdArray::from_vec(vec![0i64, 12, -42])
            .reshape(vec![3, 1])
            .unwrap();
        assert_eq!(Value::from(array).to_string(), "array([[0], [12], [-42]])");
    }
}
