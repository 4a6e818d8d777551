use crate::ast::{Ast, BinaryOp, UnaryOp};
use crate::error::ParseError;
use crate::lexer::{Operator, Spanned, Token};

pub(crate) const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a token vector produced by the lexer.
///
/// Precedence, loosest first: `+ -`, then `* / %`, then `** ^`, then unary minus.
/// All binary levels are left-associative, including exponentiation, so
/// `2 ** 3 ** 2` is `(2 ** 3) ** 2`.
pub(crate) struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub(crate) fn with_max_depth(mut tokens: Vec<Spanned>, max_depth: usize) -> Self {
        if !matches!(tokens.last(), Some(Spanned { token: Token::Eof, .. })) {
            let pos = tokens.last().map_or(0, |t| t.pos);
            tokens.push(Spanned {
                token: Token::Eof,
                pos,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn look(&self) -> &Spanned {
        // `with_max_depth` guarantees a trailing Eof and `bump` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at_op(&self, ops: &[Operator]) -> Option<Operator> {
        match self.look().token {
            Token::Op(op) if ops.contains(&op) => Some(op),
            _ => None,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Ast, ParseError> {
        let (expr, _) = self.expression()?;
        let look = self.look();
        if !matches!(look.token, Token::Eof) {
            return Err(ParseError::TrailingTokens {
                found: look.token.to_string(),
                pos: look.pos,
            });
        }
        Ok(expr)
    }

    fn too_deep(&self) -> ParseError {
        ParseError::TooDeep {
            limit: self.max_depth,
        }
    }

    // Grammar methods return each node with its height. Operator chains are parsed
    // in loops, so their height is capped here, not by the recursion counter.
    fn node(&self, ast: Ast, height: usize) -> Result<(Ast, usize), ParseError> {
        if height > self.max_depth {
            return Err(self.too_deep());
        }
        Ok((ast, height))
    }

    fn expression(&mut self) -> Result<(Ast, usize), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.too_deep());
        }
        let out = self.additive();
        self.depth -= 1;
        out
    }

    fn additive(&mut self) -> Result<(Ast, usize), ParseError> {
        let (mut node, mut height) = self.multiplicative()?;
        while let Some(op) = self.at_op(&[Operator::Plus, Operator::Minus]) {
            self.bump();
            let (rhs, rh) = self.multiplicative()?;
            let op = if op == Operator::Plus {
                BinaryOp::Add
            } else {
                BinaryOp::Sub
            };
            (node, height) = self.node(Ast::binary(op, node, rhs), height.max(rh) + 1)?;
        }
        Ok((node, height))
    }

    fn multiplicative(&mut self) -> Result<(Ast, usize), ParseError> {
        let (mut node, mut height) = self.power()?;
        while let Some(op) = self.at_op(&[Operator::Star, Operator::Slash, Operator::Percent]) {
            self.bump();
            let (rhs, rh) = self.power()?;
            let op = match op {
                Operator::Star => BinaryOp::Mul,
                Operator::Slash => BinaryOp::Div,
                _ => BinaryOp::Rem,
            };
            (node, height) = self.node(Ast::binary(op, node, rhs), height.max(rh) + 1)?;
        }
        Ok((node, height))
    }

    fn power(&mut self) -> Result<(Ast, usize), ParseError> {
        let (mut node, mut height) = self.unary()?;
        while self.at_op(&[Operator::StarStar, Operator::Caret]).is_some() {
            self.bump();
            let (rhs, rh) = self.unary()?;
            (node, height) =
                self.node(Ast::binary(BinaryOp::Pow, node, rhs), height.max(rh) + 1)?;
        }
        Ok((node, height))
    }

    fn unary(&mut self) -> Result<(Ast, usize), ParseError> {
        if self.at_op(&[Operator::Minus]).is_some() {
            self.bump();
            self.depth += 1;
            if self.depth > self.max_depth {
                return Err(self.too_deep());
            }
            let operand = self.unary();
            self.depth -= 1;
            let (operand, h) = operand?;
            return self.node(Ast::unary(UnaryOp::Neg, operand), h + 1);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<(Ast, usize), ParseError> {
        let Spanned { token, pos } = self.look().clone();
        match token {
            Token::Number(v) => {
                self.bump();
                Ok((Ast::Literal(v), 1))
            }
            Token::Ident(name) => {
                self.bump();
                if matches!(self.look().token, Token::LParen) {
                    self.call(name)
                } else {
                    Ok((Ast::Variable(name), 1))
                }
            }
            Token::MathFn(name) => {
                self.bump();
                if !matches!(self.look().token, Token::LParen) {
                    return Err(ParseError::ExpectedCallParen {
                        name,
                        pos: self.look().pos,
                    });
                }
                self.call(name)
            }
            Token::LParen => {
                self.bump();
                let e = self.expression()?;
                let look = self.look();
                match look.token {
                    Token::RParen => {
                        self.bump();
                        Ok(e)
                    }
                    Token::Eof => Err(ParseError::UnexpectedEnd),
                    ref other => Err(ParseError::ExpectedCloseParen {
                        found: other.to_string(),
                        pos: look.pos,
                    }),
                }
            }
            Token::Eof => Err(ParseError::UnexpectedEnd),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }

    // Current token is the '(' after the function name.
    fn call(&mut self, name: String) -> Result<(Ast, usize), ParseError> {
        self.bump();
        let mut args = Vec::new();
        if matches!(self.look().token, Token::RParen) {
            self.bump();
            return Ok((Ast::Call { name, args }, 1));
        }
        let mut height = 0;
        loop {
            let (arg, h) = self.expression()?;
            args.push(arg);
            height = height.max(h);
            let look = self.look();
            match look.token {
                Token::Comma => self.bump(),
                Token::RParen => {
                    self.bump();
                    return self.node(Ast::Call { name, args }, height + 1);
                }
                Token::Eof => return Err(ParseError::UnexpectedEnd),
                ref other => {
                    return Err(ParseError::ExpectedArgSeparator {
                        found: other.to_string(),
                        pos: look.pos,
                    });
                }
            }
        }
    }
}
