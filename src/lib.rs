//! Safe evaluation of author-supplied arithmetic formulas.
//!
//! A formula such as `p*r/(1-((1+r)**-n))` is lexed, parsed into an [`Ast`] and
//! evaluated by walking the tree. Formulas can only read the variables the caller
//! binds and call the fixed set of math functions in [`Builtin`]; there is no way to
//! reach any other host state.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([("p".to_string(), 10.0), ("r".to_string(), 2.0)]);
//! assert_eq!(safecalc::evaluate("p * r + sqrt(16)", &vars)?, 24.0);
//! # Ok::<(), safecalc::Error>(())
//! ```

mod ast;
mod builtins;
mod collect;
mod engine;
mod error;
mod eval;
mod expr;
mod formula;
mod lexer;
#[cfg(feature = "optimize")]
mod optimizer;
mod parser;
mod scope;

pub use ast::{Ast, BinaryOp, UnaryOp};
pub use builtins::{Arity, Builtin};
pub use engine::{Engine, Options};
pub use error::{Error, EvalError, LexError, ParseError};
pub use expr::Expr;
pub use formula::Formula;
pub use lexer::LexMode;
pub use scope::{FnScope, Scope, from_fn};

/// Lex, parse and evaluate `expr` in one go with default [`Options`].
///
/// Nothing is cached: every call parses `expr` from scratch.
pub fn evaluate<S: Scope + ?Sized>(expr: &str, vars: &S) -> Result<f64, Error> {
    Engine::new().evaluate(expr, vars)
}

/// Bind `expr` to positional parameters. See [`Formula`].
pub fn create_function<P: AsRef<str>>(expr: &str, params: &[P]) -> Result<Formula, Error> {
    Engine::new().create_function(expr, params)
}
