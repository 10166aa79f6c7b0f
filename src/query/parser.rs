//! Parsers for the two query sub-languages.
//!
//! Tag expression grammar (single precedence level, left-associative):
//!
//! expr = atom (("AND" | "OR") atom)*
//! atom = TAG | "(" expr ")"
//!
//! AND and OR bind identically, so `a AND b OR c` groups as
//! `(a AND b) OR c` in strict textual order. The only hard error is a
//! missing closing parenthesis; everything else degrades to some node.
//!
//! Filter expressions are a single `field OP value` predicate, split on the
//! one run of comparison characters.

use std::sync::LazyLock;

use regex::Regex;

use super::ast::{BinaryOp, CompareOp, Filter, TagExpr};
use super::error::QueryError;
use super::lexer::{Token, tokenize};

/// Parser state.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        tok
    }

    /// Parse expr = atom (("AND" | "OR") atom)*, folding left.
    fn parse_expr(&mut self) -> Result<TagExpr, QueryError> {
        let mut left = self.parse_atom()?;

        loop {
            let op = match self.peek() {
                Token::And => BinaryOp::And,
                Token::Or => BinaryOp::Or,
                _ => break,
            };
            self.advance(); // consume the operator
            let right = self.parse_atom()?;
            left = TagExpr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse atom = TAG | "(" expr ")".
    ///
    /// Exhausted input, a stray `)`, or a dangling operator all yield the
    /// identity node rather than an error.
    fn parse_atom(&mut self) -> Result<TagExpr, QueryError> {
        match self.peek().clone() {
            Token::Tag(value) => {
                self.advance();
                Ok(TagExpr::Tag(value))
            }
            Token::LParen => {
                self.advance(); // consume (
                let inner = self.parse_expr()?;
                match self.advance() {
                    Token::RParen => Ok(inner),
                    _ => Err(QueryError::Syntax("missing closing parenthesis".into())),
                }
            }
            _ => Ok(TagExpr::Empty),
        }
    }
}

/// Compile a tag expression like `(luxury AND "bora bora") OR beachfront`.
///
/// Tokens left over after the parse (e.g. an unbalanced `)`) are ignored.
pub fn parse_tag_expr(input: &str) -> Result<TagExpr, QueryError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(tokens);
    parser.parse_expr()
}

static COMPARE_OP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>=]+").expect("valid operator pattern"));

/// Compile a filter expression like `price > "$$$"`.
///
/// The expression must contain exactly one run of comparison characters;
/// no operator, or more than one, is an error.
pub fn parse_filter(input: &str) -> Result<Filter, QueryError> {
    let expr = input.trim();

    let mut ops = COMPARE_OP.find_iter(expr);
    let (op_match, extra) = (ops.next(), ops.next());
    let op_match = match (op_match, extra) {
        (Some(m), None) => m,
        _ => {
            return Err(QueryError::InvalidExpression(expr.to_string()));
        }
    };

    let field = expr[..op_match.start()].trim().to_string();
    let op = CompareOp::from_symbol(op_match.as_str());
    let value = strip_quotes(expr[op_match.end()..].trim()).to_string();

    Ok(Filter { field, op, value })
}

/// Strip one layer of surrounding quote characters from a filter value.
fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix(['"', '\''])
        .unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}
