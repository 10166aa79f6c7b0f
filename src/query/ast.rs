//! AST types for the embed query language.

use std::fmt;

/// Compiled tag expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TagExpr {
    /// Always true (absent or empty expression)
    Empty,

    /// Single tag membership test: `luxury`, `"bora bora"`
    Tag(String),

    /// Boolean combination: `a AND b`, `a OR b`
    ///
    /// Chains fold left, so `a AND b OR c` is `(a AND b) OR c`. AND and OR
    /// bind at the same level.
    Binary {
        op: BinaryOp,
        left: Box<TagExpr>,
        right: Box<TagExpr>,
    },
}

/// Boolean operator in a tag expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
}

/// Compiled field filter: `field OP value`. A single predicate; filters do
/// not compose.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: CompareOp,
    pub value: String,
}

/// Comparison operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOp {
    Eq, // =
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
    /// Any other run of comparison characters the splitter accepted
    /// (`=<`, `>>`, ...). Parses fine, never matches.
    Other(String),
}

impl CompareOp {
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => CompareOp::Eq,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Le,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Ge,
            other => CompareOp::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Le => write!(f, "<="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Ge => write!(f, ">="),
            CompareOp::Other(symbol) => write!(f, "{}", symbol),
        }
    }
}
