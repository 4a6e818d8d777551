use std::fmt;

/// Nodes of a parsed formula. Every intermediate and final value is an `f64`.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// Numeric literal (e.g. 1, 3.14)
    Literal(f64),
    /// Variable reference, resolved against the caller's bindings (e.g. p, rate)
    Variable(String),
    /// Unary operator applied to one operand (e.g. -x)
    Unary { op: UnaryOp, operand: Box<Ast> },
    /// Binary operator (e.g. a + b, a ** b)
    Binary {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    /// Function call name(args..). Only allow-listed names evaluate.
    Call { name: String, args: Vec<Ast> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Floating-point remainder, same sign as the dividend.
    Rem,
    /// Written `**` or `^`.
    Pow,
}

impl UnaryOp {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            UnaryOp::Neg => -x,
        }
    }
}

impl BinaryOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            BinaryOp::Pow => a.powf(b),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
        }
    }
}

impl Ast {
    pub(crate) fn unary(op: UnaryOp, operand: Ast) -> Ast {
        Ast::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub(crate) fn binary(op: BinaryOp, left: Ast, right: Ast) -> Ast {
        Ast::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// Fully parenthesized; parses back to an equivalent tree as long as every literal is finite.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Literal(v) if v.is_sign_negative() => write!(f, "(-{})", -v),
            Ast::Literal(v) => write!(f, "{v}"),
            Ast::Variable(name) => f.write_str(name),
            Ast::Unary {
                op: UnaryOp::Neg,
                operand,
            } => write!(f, "(-{operand})"),
            Ast::Binary { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            Ast::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
