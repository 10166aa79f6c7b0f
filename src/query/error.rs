//! Error taxonomy for query compilation.
//!
//! Only two conditions are fatal to a directive: an unmatched opening
//! parenthesis in a tag expression, and a filter that does not split into
//! field/operator/value. Everything else degrades to a safe default so one
//! bad directive cannot abort a batch.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// Unmatched opening parenthesis in a tag expression.
    #[error("syntax error in tag expression: {0}")]
    Syntax(String),

    /// Filter expression did not split into exactly field/operator/value.
    #[error("invalid filter expression: {0}")]
    InvalidExpression(String),
}
