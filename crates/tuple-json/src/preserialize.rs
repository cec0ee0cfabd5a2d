//! Composite value → JSON-safe value.
//!
//! Tuples become tagged-tuple markers, numeric arrays become nested
//! sequences, everything else keeps its shape.

use serde_json::{Map, Value as JsonValue};

use crate::constants::{item_key, TUPLE_TAG, TYPE_KEY};
use crate::error::PreserializeError;
use crate::nd_array::NdArray;
use crate::path::format_pointer;
use crate::value::{is_marker_mapping, Mapping, Value};

/// What to do with an input mapping that already reads `"@type": "tuple"`.
///
/// Such a mapping would come back from restoration as a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerCollision {
    /// Fail with [`PreserializeError::MarkerCollision`].
    #[default]
    Reject,
    /// Emit the mapping like any other; it will restore as a tuple.
    Allow,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PreserializeOptions {
    pub marker_collision: MarkerCollision,
}

/// Converts composite values into `serde_json` values.
#[derive(Debug, Clone, Default)]
pub struct Preserializer {
    options: PreserializeOptions,
}

impl Preserializer {
    pub fn new(options: PreserializeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PreserializeOptions {
        &self.options
    }

    /// Preserializes `value`. On error nothing is returned; the error names
    /// the offending node by JSON Pointer.
    pub fn preserialize(&self, value: &Value) -> Result<JsonValue, PreserializeError> {
        let mut path = Vec::new();
        self.visit(value, &mut path)
    }

    fn visit(
        &self,
        value: &Value,
        path: &mut Vec<String>,
    ) -> Result<JsonValue, PreserializeError> {
        match value {
            Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Number(n) => Ok(JsonValue::Number(n.clone())),
            Value::String(s) => Ok(JsonValue::String(s.clone())),
            Value::Sequence(items) => self.visit_sequence(items, path),
            Value::Mapping(map) => self.visit_mapping(map, path),
            Value::Tuple(items) => self.visit_tuple(items, path),
            Value::Array(array) => self.visit_array(array, path),
        }
    }

    fn visit_sequence(
        &self,
        items: &[Value],
        path: &mut Vec<String>,
    ) -> Result<JsonValue, PreserializeError> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            path.push(i.to_string());
            out.push(self.visit(item, path)?);
            path.pop();
        }
        Ok(JsonValue::Array(out))
    }

    fn visit_mapping(
        &self,
        map: &Mapping,
        path: &mut Vec<String>,
    ) -> Result<JsonValue, PreserializeError> {
        if is_marker_mapping(map) {
            match self.options.marker_collision {
                MarkerCollision::Reject => {
                    return Err(PreserializeError::MarkerCollision {
                        path: format_pointer(path),
                    });
                }
                MarkerCollision::Allow => {
                    tracing::debug!(
                        path = %format_pointer(path),
                        "mapping carries the tuple marker and will restore as a tuple"
                    );
                }
            }
        }
        let mut out = Map::with_capacity(map.len());
        for (key, item) in map {
            path.push(key.clone());
            let item = self.visit(item, path)?;
            path.pop();
            out.insert(key.clone(), item);
        }
        Ok(JsonValue::Object(out))
    }

    fn visit_tuple(
        &self,
        items: &[Value],
        path: &mut Vec<String>,
    ) -> Result<JsonValue, PreserializeError> {
        let mut out = Map::with_capacity(items.len() + 1);
        out.insert(TYPE_KEY.to_string(), JsonValue::String(TUPLE_TAG.to_string()));
        for (i, item) in items.iter().enumerate() {
            let key = item_key(i + 1);
            path.push(key.clone());
            let item = self.visit(item, path)?;
            path.pop();
            out.insert(key, item);
        }
        Ok(JsonValue::Object(out))
    }

    fn visit_array(
        &self,
        array: &NdArray,
        path: &mut Vec<String>,
    ) -> Result<JsonValue, PreserializeError> {
        if let Some(index) = array.first_non_finite() {
            path.extend(index.iter().map(usize::to_string));
            return Err(PreserializeError::NonFiniteNumber {
                path: format_pointer(path),
            });
        }
        tracing::trace!(
            shape = ?array.shape(),
            dtype = array.dtype().name(),
            "flattening numeric array"
        );
        self.visit(&array.to_nested(), path)
    }
}

/// Preserializes `value` with default options.
///
/// ```
/// use serde_json::json;
/// use tuple_json::{preserialize, Value};
///
/// let json = preserialize(&Value::from((42, "foo"))).unwrap();
/// assert_eq!(json, json!({"@type": "tuple", "item1": 42, "item2": "foo"}));
/// ```
pub fn preserialize(value: &Value) -> Result<JsonValue, PreserializeError> {
    Preserializer::default().preserialize(value)
}

/// Replaces every tuple with its marker mapping without leaving the
/// composite domain. Arrays are left as they are.
///
/// Unlike [`preserialize`] this applies no collision policy.
pub fn tag_tuples(value: &Value) -> Value {
    match value {
        Value::Tuple(items) => {
            let mut out = Mapping::with_capacity(items.len() + 1);
            out.insert(TYPE_KEY.to_string(), Value::from(TUPLE_TAG));
            for (i, item) in items.iter().enumerate() {
                out.insert(item_key(i + 1), tag_tuples(item));
            }
            Value::Mapping(out)
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(tag_tuples).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), tag_tuples(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
