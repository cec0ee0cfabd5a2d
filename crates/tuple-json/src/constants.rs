//! Reserved keys of the tagged-tuple marker.
//!
//! A tuple `(a, b)` travels over JSON as
//! `{"@type": "tuple", "item1": a, "item2": b}`.

/// Reserved marker key: `@type`
pub const TYPE_KEY: &str = "@type";

/// Marker value identifying a tuple: `tuple`
pub const TUPLE_TAG: &str = "tuple";

/// Prefix of the positional element keys: `item`
pub const ITEM_PREFIX: &str = "item";

/// Returns the positional key for the 1-based `index`, e.g. `item3`.
pub fn item_key(index: usize) -> String {
    format!("{ITEM_PREFIX}{index}")
}

/// Parses a positional key back into its 1-based index.
///
/// Only canonical keys are accepted: `item` followed by a decimal number
/// without leading zeros. `item0`, `item01` and `item` yield `None`.
pub fn parse_item_key(key: &str) -> Option<usize> {
    let digits = key.strip_prefix(ITEM_PREFIX)?;
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_keys_are_one_based() {
        assert_eq!(item_key(1), "item1");
        assert_eq!(item_key(12), "item12");
    }

    #[test]
    fn parse_item_key_matrix() {
        assert_eq!(parse_item_key("item1"), Some(1));
        assert_eq!(parse_item_key("item42"), Some(42));
        assert_eq!(parse_item_key("item0"), None);
        assert_eq!(parse_item_key("item01"), None);
        assert_eq!(parse_item_key("item"), None);
        assert_eq!(parse_item_key("item-1"), None);
        assert_eq!(parse_item_key("item+1"), None);
        assert_eq!(parse_item_key("Item1"), None);
        assert_eq!(parse_item_key("@type"), None);
        assert_eq!(parse_item_key("item99999999999999999999999"), None);
    }
}
