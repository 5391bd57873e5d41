use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::{ScriptError, ScriptResult};

/// Token type for the run-script language.
///
/// The grammar is line-oriented: statements are separated by newlines or
/// semicolons, and every statement is one command word followed by at most
/// one argument. Coordinates lex as a single token in either `3,4` or
/// `3x4` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Command word such as `wait` or `wall+`.
    Word(String),
    /// Non-negative integer argument.
    Int(u64),
    /// Coordinate argument `x,y`.
    Coord(i32, i32),
    /// Statement separator (newline or `;`).
    Separator,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{w}"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Coord(x, y) => write!(f, "{x},{y}"),
            Token::Separator => write!(f, "separator"),
        }
    }
}

/// Internal logos token — converted to the owned [`Token`] after lexing.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[token(";")]
    Semi,

    #[regex(r"[0-9]+[x,][0-9]+")]
    CoordPair,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*[+-]?")]
    Word,
}

/// Lex script source into `(Token, Span)` pairs.
///
/// Stops at the first lexical error; scripts are short and abort-on-error
/// is the contract for the whole surface.
pub fn lex(source: &str) -> ScriptResult<Vec<(Token, Range<usize>)>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                let token = match raw {
                    RawToken::Newline | RawToken::Semi => Token::Separator,
                    RawToken::Int => {
                        let slice = lexer.slice();
                        let value = slice.parse::<u64>().map_err(|_| {
                            ScriptError::BadArgument {
                                message: format!("integer literal out of range: {slice}"),
                                span: span.clone(),
                            }
                        })?;
                        Token::Int(value)
                    }
                    RawToken::CoordPair => {
                        let slice = lexer.slice();
                        parse_coord_pair(slice, &span)?
                    }
                    RawToken::Word => Token::Word(lexer.slice().to_string()),
                };
                tokens.push((token, span));
            }
            Err(()) => {
                return Err(ScriptError::UnexpectedCharacter {
                    text: source[span.clone()].to_string(),
                    span,
                });
            }
        }
    }

    Ok(tokens)
}

fn parse_coord_pair(slice: &str, span: &Range<usize>) -> ScriptResult<Token> {
    let (xs, ys) = slice
        .split_once([',', 'x'])
        .ok_or_else(|| bad_coord(slice, span))?;
    let x = xs.parse::<i32>().map_err(|_| bad_coord(slice, span))?;
    let y = ys.parse::<i32>().map_err(|_| bad_coord(slice, span))?;
    Ok(Token::Coord(x, y))
}

fn bad_coord(slice: &str, span: &Range<usize>) -> ScriptError {
    ScriptError::BadArgument {
        message: format!("expected a coordinate like '3,4', got '{slice}'"),
        span: span.clone(),
    }
}
