use thiserror::Error;

use crate::builtins::Arity;

/// Failure while turning the source string into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    #[error("malformed number '{literal}' at {pos}")]
    MalformedNumber { pos: usize, literal: String },
    #[error("'Math.{name}' at {pos} is not an allowed function")]
    UnknownMathMember { pos: usize, name: String },
}

/// Grammar errors. The parser never checks names; see [`EvalError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected '(' after function '{name}' at {pos}")]
    ExpectedCallParen { name: String, pos: usize },
    #[error("expected ',' or ')' in argument list, found {found} at {pos}")]
    ExpectedArgSeparator { found: String, pos: usize },
    #[error("expected ')', found {found} at {pos}")]
    ExpectedCloseParen { found: String, pos: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected {found} at {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("trailing tokens starting with {found} at {pos}")]
    TrailingTokens { found: String, pos: usize },
    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    #[error("function not allowed: {0}")]
    FunctionNotAllowed(String),
    #[error("function {name} takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: Arity,
        got: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
