//! Evaluators for compiled tag expressions and field filters.

use std::collections::HashMap;
use std::fmt;

use super::ast::{BinaryOp, CompareOp, Filter, TagExpr};

/// A field value on a candidate item. Frontmatter scalars keep their YAML
/// type; metadata parsed out of markdown bodies is always a string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Num(f64),
}

impl FieldValue {
    /// Ordinal level of a `$`-encoded price value. Non-strings reduce to 0.
    pub fn price_level(&self) -> usize {
        match self {
            FieldValue::Str(s) => s.matches('$').count(),
            FieldValue::Num(_) => 0,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Num(n) => write!(f, "{}", n),
        }
    }
}

/// Evaluate a tag expression against an item's tag list. Membership is
/// exact and case-sensitive.
pub fn evaluate_tags(expr: &TagExpr, tags: &[String]) -> bool {
    match expr {
        TagExpr::Empty => true,

        TagExpr::Tag(value) => tags.iter().any(|tag| tag == value),

        TagExpr::Binary { op, left, right } => {
            let left = evaluate_tags(left, tags);
            let right = evaluate_tags(right, tags);
            match op {
                BinaryOp::And => left && right,
                BinaryOp::Or => left || right,
            }
        }
    }
}

/// Evaluate a filter against an item's fields. A missing field fails closed.
pub fn evaluate_filter(filter: &Filter, fields: &HashMap<String, FieldValue>) -> bool {
    let Some(actual) = fields.get(&filter.field) else {
        return false;
    };

    // `price > "$$"` compares `$`-count ordinals, not strings.
    if filter.field == "price" && filter.value.contains('$') {
        let filter_level = filter.value.matches('$').count();
        return compare(&filter.op, actual.price_level(), filter_level);
    }

    match actual {
        FieldValue::Num(n) => match filter.value.parse::<f64>() {
            Ok(wanted) => compare(&filter.op, *n, wanted),
            Err(_) => compare(&filter.op, n.to_string().as_str(), filter.value.as_str()),
        },
        FieldValue::Str(s) => compare(&filter.op, s.as_str(), filter.value.as_str()),
    }
}

fn compare<T: PartialOrd>(op: &CompareOp, left: T, right: T) -> bool {
    match op {
        CompareOp::Gt => left > right,
        CompareOp::Lt => left < right,
        CompareOp::Ge => left >= right,
        CompareOp::Le => left <= right,
        CompareOp::Eq => left == right,
        CompareOp::Other(_) => false,
    }
}
