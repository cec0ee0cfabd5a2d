//! JSON text encoding and decoding of composite values.
//!
//! Encoding is [`preserialize`] followed by `serde_json` serialization;
//! decoding is `serde_json` parsing followed by lenient
//! [`restore_tuples`].

use std::io;

use serde_json::Value as JsonValue;

use crate::error::Error;
use crate::preserialize::preserialize;
use crate::restore::restore_tuples;
use crate::value::Value;

/// Encodes `value` as compact JSON text.
pub fn to_json_string(value: &Value) -> Result<String, Error> {
    let json = preserialize(value)?;
    Ok(serde_json::to_string(&json)?)
}

/// Encodes `value` as indented JSON text.
pub fn to_json_string_pretty(value: &Value) -> Result<String, Error> {
    let json = preserialize(value)?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Encodes `value` as compact JSON into `writer`.
pub fn to_json_writer<W: io::Write>(writer: W, value: &Value) -> Result<(), Error> {
    let json = preserialize(value)?;
    serde_json::to_writer(writer, &json)?;
    Ok(())
}

/// Decodes JSON text, rebuilding tuples.
pub fn from_json_str(input: &str) -> Result<Value, Error> {
    let json: JsonValue = serde_json::from_str(input)?;
    Ok(restore_tuples(json))
}

/// Decodes JSON bytes, rebuilding tuples.
pub fn from_json_slice(input: &[u8]) -> Result<Value, Error> {
    let json: JsonValue = serde_json::from_slice(input)?;
    Ok(restore_tuples(json))
}
