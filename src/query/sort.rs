//! Sort directives: `field DIRECTION`.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::eval::FieldValue;

/// Key an item sorts by. `price` uses the `$`-count ordinal so `$$$` ranks
/// above `$`; every other field sorts on its raw value, with an absent
/// field falling back to the empty string.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortKey {
    Level(usize),
    Num(f64),
    Text(String),
}

impl SortKey {
    pub fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Derive the sort key for one item.
pub fn sort_key(fields: &HashMap<String, FieldValue>, field: &str) -> SortKey {
    if field == "price" {
        let level = fields.get(field).map(|v| v.price_level()).unwrap_or(0);
        return SortKey::Level(level);
    }

    match fields.get(field) {
        Some(FieldValue::Num(n)) => SortKey::Num(*n),
        Some(FieldValue::Str(s)) => SortKey::Text(s.clone()),
        None => SortKey::Text(String::new()),
    }
}

/// Whether a direction token reverses the order. Only `DESC` (any case)
/// does; anything else, including nothing, sorts ascending.
pub fn is_descending(direction: &str) -> bool {
    direction.eq_ignore_ascii_case("DESC")
}

/// Split a `field DIRECTION` sort directive into its parts. Anything that
/// is not exactly two tokens is a no-op rather than an error.
pub fn parse_sort(expr: &str) -> Option<(String, bool)> {
    let parts: Vec<&str> = expr.split_whitespace().collect();
    let [field, direction] = parts.as_slice() else {
        return None;
    };
    Some((field.to_string(), is_descending(direction)))
}
