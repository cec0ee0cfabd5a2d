//! tuple-json - tuple-preserving JSON preserialization.
//!
//! JSON has arrays and objects but no tuples. This crate carries
//! fixed-length heterogeneous tuples across JSON by tagging them with a
//! reserved marker object:
//!
//! ```text
//! (42, "foo")  <->  {"@type": "tuple", "item1": 42, "item2": "foo"}
//! ()           <->  {"@type": "tuple"}
//! ```
//!
//! # Overview
//!
//! - [`Value`] - composite value: scalars, sequences, mappings, tuples and
//!   numeric arrays ([`NdArray`])
//! - [`preserialize`] - composite value to `serde_json::Value`, tagging
//!   tuples and flattening arrays to nested sequences
//! - [`restore_tuples`] / [`try_restore_tuples`] - JSON value back to a
//!   composite value, rebuilding tuples (lenient / strict)
//! - [`to_json_string`] / [`from_json_str`] - the above plus JSON text
//! - [`deep_equal`] - numeric-aware structural equality
//!
//! For any value built from scalars, sequences, mappings and tuples,
//! `restore_tuples(preserialize(&v)?) == v`. Arrays come back as nested
//! sequences.
//!
//! # Example
//!
//! ```
//! use tuple_json::{from_json_str, to_json_string, Value};
//!
//! let value = Value::map([("pair", Value::from(("a", 3.14)))]);
//! let text = to_json_string(&value).unwrap();
//! assert_eq!(text, r#"{"pair":{"@type":"tuple","item1":"a","item2":3.14}}"#);
//! assert_eq!(from_json_str(&text).unwrap(), value);
//! ```

mod codec;
mod constants;
mod equal;
mod error;
mod nd_array;
mod path;
mod preserialize;
mod restore;
mod value;

pub use codec::{
    from_json_slice, from_json_str, to_json_string, to_json_string_pretty, to_json_writer,
};
pub use constants::{item_key, parse_item_key, ITEM_PREFIX, TUPLE_TAG, TYPE_KEY};
pub use equal::deep_equal;
pub use error::{Error, PreserializeError, RestoreError, ShapeError};
pub use nd_array::{ArrayData, DType, NdArray};
pub use preserialize::{
    preserialize, tag_tuples, MarkerCollision, PreserializeOptions, Preserializer,
};
pub use restore::{restore_tuples, try_restore_tuples, RestoreOptions, TupleRestorer};
pub use value::{Mapping, Value, ValueKind};
