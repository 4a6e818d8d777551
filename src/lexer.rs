use std::fmt;

use log::warn;

use crate::builtins::Builtin;
use crate::error::LexError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Caret,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    /// Function name that followed a `Math.` prefix.
    MathFn(String),
    Op(Operator),
    LParen,
    RParen,
    Comma,
    Eof,
}

/// A token and the byte offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// How the lexer treats input it does not recognize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Reject unknown characters, malformed numbers and unknown `Math.` members.
    #[default]
    Strict,
    /// Drop unknown characters and unknown `Math.` members, read malformed numbers
    /// up to their longest valid prefix.
    Lenient,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "number {v}"),
            Token::Ident(s) => write!(f, "identifier '{s}'"),
            Token::MathFn(s) => write!(f, "function 'Math.{s}'"),
            Token::Op(op) => write!(f, "'{op}'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::StarStar => "**",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Caret => "^",
        })
    }
}

const MATH_PREFIX: &[u8] = b"Math.";

pub(crate) struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    i: usize,
    mode: LexMode,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(s: &'a str, mode: LexMode) -> Self {
        Self {
            src: s,
            bytes: s.as_bytes(),
            i: 0,
            mode,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.i).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.i + offset).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    /// Tokenizes the whole input. The last element is always `Token::Eof`.
    pub(crate) fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            let pos = self.i;
            let Some(c) = self.peek() else {
                out.push(Spanned {
                    token: Token::Eof,
                    pos,
                });
                return Ok(out);
            };
            if let Some(token) = self.next_token(c)? {
                out.push(Spanned { token, pos });
            }
        }
    }

    fn next_token(&mut self, c: u8) -> Result<Option<Token>, LexError> {
        let single = |op| Some(Token::Op(op));
        let tok = match c {
            b'(' => Some(Token::LParen),
            b')' => Some(Token::RParen),
            b',' => Some(Token::Comma),
            b'+' => single(Operator::Plus),
            b'-' => single(Operator::Minus),
            b'/' => single(Operator::Slash),
            b'%' => single(Operator::Percent),
            b'^' => single(Operator::Caret),
            b'*' => {
                if self.peek_at(1) == Some(b'*') {
                    self.i += 2;
                    return Ok(Some(Token::Op(Operator::StarStar)));
                }
                single(Operator::Star)
            }
            c if c.is_ascii_digit() || c == b'.' => return self.lex_number().map(Some),
            c if c.is_ascii_alphabetic() || c == b'_' => return self.lex_ident(),
            _ => return self.unexpected_char(),
        };
        self.i += 1;
        Ok(tok)
    }

    fn unexpected_char(&mut self) -> Result<Option<Token>, LexError> {
        let pos = self.i;
        // Non-ASCII input is skipped as a whole char so `i` stays on a boundary.
        let ch = self.src[pos..].chars().next().unwrap_or('\u{FFFD}');
        match self.mode {
            LexMode::Strict => Err(LexError::UnexpectedChar { pos, ch }),
            LexMode::Lenient => {
                warn!("dropping unexpected character {ch:?} at {pos}");
                self.i += ch.len_utf8();
                Ok(None)
            }
        }
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.i;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'.' {
                self.i += 1;
            } else {
                break;
            }
        }
        let literal = &self.src[start..self.i];
        if let Ok(v) = literal.parse::<f64>() {
            return Ok(Token::Number(v));
        }
        match self.mode {
            LexMode::Strict => Err(LexError::MalformedNumber {
                pos: start,
                literal: literal.to_string(),
            }),
            LexMode::Lenient => {
                warn!("malformed number '{literal}' at {start}, using its valid prefix");
                Ok(Token::Number(parse_prefix(literal)))
            }
        }
    }

    fn lex_ident(&mut self) -> Result<Option<Token>, LexError> {
        if self.bytes[self.i..].starts_with(MATH_PREFIX) {
            return self.lex_math_member();
        }
        Ok(Some(Token::Ident(self.read_ident().to_string())))
    }

    fn read_ident(&mut self) -> &'a str {
        let src = self.src;
        let start = self.i;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.i += 1;
            } else {
                break;
            }
        }
        &src[start..self.i]
    }

    fn lex_math_member(&mut self) -> Result<Option<Token>, LexError> {
        let pos = self.i;
        self.i += MATH_PREFIX.len();
        let name = self.read_ident();
        if Builtin::is_allowed(name) {
            return Ok(Some(Token::MathFn(name.to_string())));
        }
        match self.mode {
            LexMode::Strict => Err(LexError::UnknownMathMember {
                pos,
                name: name.to_string(),
            }),
            LexMode::Lenient => {
                warn!("dropping unknown member 'Math.{name}' at {pos}");
                Ok(None)
            }
        }
    }
}

// Longest leading run with at most one dot; NaN if it holds no digit.
fn parse_prefix(literal: &str) -> f64 {
    let end = literal
        .match_indices('.')
        .nth(1)
        .map_or(literal.len(), |(i, _)| i);
    literal[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str, mode: LexMode) -> Vec<Token> {
        Lexer::new(s, mode)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn star_star_is_one_token() {
        assert_eq!(
            tokens("2**3*4", LexMode::Strict),
            vec![
                Token::Number(2.0),
                Token::Op(Operator::StarStar),
                Token::Number(3.0),
                Token::Op(Operator::Star),
                Token::Number(4.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let spans = Lexer::new("  ab + 1", LexMode::Strict).tokenize().unwrap();
        let pos: Vec<usize> = spans.iter().map(|s| s.pos).collect();
        assert_eq!(pos, vec![2, 5, 7, 8]);
    }

    #[test]
    fn prefix_of_malformed_number() {
        assert_eq!(parse_prefix("1.2.3"), 1.2);
        assert_eq!(parse_prefix("12..5"), 12.0);
        assert!(parse_prefix(".").is_nan());
        assert!(parse_prefix("..1").is_nan());
    }

    #[test]
    fn lenient_skips_multibyte_chars() {
        assert_eq!(
            tokens("1 € 2", LexMode::Lenient),
            vec![Token::Number(1.0), Token::Number(2.0), Token::Eof]
        );
    }
}
