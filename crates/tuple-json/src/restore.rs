//! JSON-safe value → composite value, rebuilding tagged tuples.
//!
//! Arrays flattened by the preserializer stay nested sequences: JSON keeps
//! no rank or element-type information to rebuild them from.

use crate::constants::{item_key, parse_item_key, TYPE_KEY};
use crate::error::RestoreError;
use crate::path::format_pointer;
use crate::value::{is_marker_mapping, Mapping, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreOptions {
    /// Reject markers with foreign keys or gaps in their `itemK` numbering
    /// instead of ignoring the keys and closing the gaps.
    pub strict: bool,
}

/// Rebuilds tuples from tagged-tuple markers.
#[derive(Debug, Clone, Default)]
pub struct TupleRestorer {
    options: RestoreOptions,
}

impl TupleRestorer {
    pub fn new(options: RestoreOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RestoreOptions {
        &self.options
    }

    /// Restores tuples anywhere inside `value`. Never fails unless
    /// [`RestoreOptions::strict`] is set, in which case the first malformed
    /// marker in document order is reported.
    pub fn restore(&self, value: impl Into<Value>) -> Result<Value, RestoreError> {
        let mut issues = Vec::new();
        let restored = self.rebuild(value.into(), &mut issues);
        match issues.into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(restored),
        }
    }

    /// Walks the whole value. Malformed markers are repaired the lenient way
    /// and, in strict mode, recorded in `issues`.
    fn rebuild(&self, value: Value, issues: &mut Vec<RestoreError>) -> Value {
        let mut path = Vec::new();
        self.visit(value, &mut path, issues)
    }

    fn visit(&self, value: Value, path: &mut Vec<String>, issues: &mut Vec<RestoreError>) -> Value {
        match value {
            Value::Mapping(map) if is_marker_mapping(&map) => self.visit_marker(map, path, issues),
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, item) in map {
                    path.push(key.clone());
                    let item = self.visit(item, path, issues);
                    path.pop();
                    out.insert(key, item);
                }
                Value::Mapping(out)
            }
            Value::Sequence(items) => Value::Sequence(self.visit_items(items, path, issues)),
            Value::Tuple(items) => Value::Tuple(self.visit_items(items, path, issues)),
            other => other,
        }
    }

    fn visit_items(
        &self,
        items: Vec<Value>,
        path: &mut Vec<String>,
        issues: &mut Vec<RestoreError>,
    ) -> Vec<Value> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            path.push(i.to_string());
            out.push(self.visit(item, path, issues));
            path.pop();
        }
        out
    }

    fn visit_marker(
        &self,
        map: Mapping,
        path: &mut Vec<String>,
        issues: &mut Vec<RestoreError>,
    ) -> Value {
        let mut items: Vec<(usize, Value)> = Vec::with_capacity(map.len().saturating_sub(1));
        for (key, item) in map {
            if key == TYPE_KEY {
                continue;
            }
            match parse_item_key(&key) {
                Some(index) => items.push((index, item)),
                None if self.options.strict => {
                    issues.push(RestoreError::UnexpectedKey {
                        path: format_pointer(path),
                        key,
                    });
                }
                None => {
                    tracing::debug!(
                        path = %format_pointer(path),
                        key = %key,
                        "ignoring foreign key in tuple marker"
                    );
                }
            }
        }

        // Canonical keys are unique per index, so sorting yields a strict order.
        items.sort_by_key(|(index, _)| *index);
        if let Some(position) = items
            .iter()
            .enumerate()
            .position(|(position, (index, _))| *index != position + 1)
        {
            if self.options.strict {
                issues.push(RestoreError::MissingItem {
                    path: format_pointer(path),
                    index: position + 1,
                });
            } else {
                tracing::debug!(
                    path = %format_pointer(path),
                    missing = position + 1,
                    "closing gap in tuple marker numbering"
                );
            }
        }

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items {
            path.push(item_key(index));
            out.push(self.visit(item, path, issues));
            path.pop();
        }
        Value::Tuple(out)
    }
}

/// Restores tuples leniently: foreign keys inside a marker are ignored and
/// elements are taken in ascending `itemK` order.
///
/// ```
/// use serde_json::json;
/// use tuple_json::{restore_tuples, Value};
///
/// let restored = restore_tuples(json!({"@type": "tuple", "item1": 42, "item2": "foo"}));
/// assert_eq!(restored, Value::from((42, "foo")));
/// ```
pub fn restore_tuples(value: impl Into<Value>) -> Value {
    TupleRestorer::default().rebuild(value.into(), &mut Vec::new())
}

/// Restores tuples strictly, rejecting malformed markers.
pub fn try_restore_tuples(value: impl Into<Value>) -> Result<Value, RestoreError> {
    TupleRestorer::new(RestoreOptions { strict: true }).restore(value)
}
