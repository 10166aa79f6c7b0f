//! Lexer/tokenizer for tag expressions.

use winnow::ascii::multispace0;
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::take_till;

/// Token types for tag expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Tag(String), // bare word or quoted literal

    // Keywords (case-sensitive)
    And,
    Or,

    // Punctuation
    LParen, // (
    RParen, // )

    // End of input
    Eof,
}

// Manually define PResult for resilience against winnow version changes
type PResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

/// Lex a quoted literal: everything up to the closing quote, spaces included.
/// An unterminated quote is not an error; the partial run still becomes a tag.
fn lex_quoted(input: &mut &str) -> PResult<Token> {
    '"'.parse_next(input)?;
    let content = take_till(0.., '"').parse_next(input)?;
    opt('"').parse_next(input)?;
    Ok(Token::Tag(content.trim().to_string()))
}

/// Lex a bare word: anything up to whitespace, a quote, or a parenthesis.
fn lex_word(input: &mut &str) -> PResult<Token> {
    let word = take_till(1.., |c: char| {
        c.is_whitespace() || c == '"' || c == '(' || c == ')'
    })
    .parse_next(input)?;

    // A word cut short by a parenthesis or quote is always a tag; only a
    // word ending at whitespace or end of input can be a keyword.
    let at_delimiter = input.starts_with(['(', ')', '"']);
    match word {
        "AND" if !at_delimiter => Ok(Token::And),
        "OR" if !at_delimiter => Ok(Token::Or),
        _ => Ok(Token::Tag(word.to_string())),
    }
}

/// Lex a single token.
fn lex_token(input: &mut &str) -> PResult<Token> {
    multispace0.parse_next(input)?;

    if input.is_empty() {
        return Ok(Token::Eof);
    }

    alt((
        "(".value(Token::LParen),
        ")".value(Token::RParen),
        lex_quoted,
        lex_word,
    ))
    .parse_next(input)
}

/// Tokenize the entire input. Lexing never fails: every character either
/// starts a token or extends a word.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut remaining = input;
    let mut tokens = Vec::new();

    loop {
        match lex_token(&mut remaining) {
            Ok(Token::Eof) => break,
            // Empty quoted literals produce no token.
            Ok(Token::Tag(text)) if text.is_empty() => {}
            Ok(tok) => tokens.push(tok),
            Err(_) => break,
        }
    }

    tokens.push(Token::Eof);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("luxury AND beachfront");
        assert_eq!(
            tokens,
            vec![
                Token::Tag("luxury".into()),
                Token::And,
                Token::Tag("beachfront".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_literal_keeps_spaces() {
        let tokens = tokenize("luxury AND \"bora bora\"");
        assert_eq!(
            tokens,
            vec![
                Token::Tag("luxury".into()),
                Token::And,
                Token::Tag("bora bora".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_parens_flush_pending_word() {
        let tokens = tokenize("(luxury OR boutique)");
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Tag("luxury".into()),
                Token::Or,
                Token::Tag("boutique".into()),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = tokenize("luxury and beachfront");
        assert_eq!(
            tokens,
            vec![
                Token::Tag("luxury".into()),
                Token::Tag("and".into()),
                Token::Tag("beachfront".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_against_paren_is_a_tag() {
        // The buffer flushed at a parenthesis is always a tag, even when it
        // spells a keyword.
        let tokens = tokenize("AND(");
        assert_eq!(
            tokens,
            vec![Token::Tag("AND".into()), Token::LParen, Token::Eof]
        );
    }

    #[test]
    fn test_unterminated_quote_flushes_partial() {
        let tokens = tokenize("\"bora bora");
        assert_eq!(tokens, vec![Token::Tag("bora bora".into()), Token::Eof]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![Token::Eof]);
        assert_eq!(tokenize("   "), vec![Token::Eof]);
    }

    #[test]
    fn test_quote_splits_adjacent_word() {
        let tokens = tokenize("spa\"ocean view\"");
        assert_eq!(
            tokens,
            vec![
                Token::Tag("spa".into()),
                Token::Tag("ocean view".into()),
                Token::Eof,
            ]
        );
    }
}
