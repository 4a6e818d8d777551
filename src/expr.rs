use std::fmt;
use std::sync::Arc;

use crate::ast::Ast;
use crate::collect::{collect_calls, collect_vars};
use crate::engine::Engine;
use crate::error::{Error, EvalError};
use crate::eval::eval;
use crate::scope::Scope;

/// A parsed formula, ready to evaluate against any number of scopes.
///
/// Cloning is cheap: the tree is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    ast: Arc<Ast>,
    /// Variables in left-to-right first-appearance order.
    vars: Vec<String>,
}

impl Expr {
    /// Parse with default [`Options`](crate::Options).
    pub fn parse(expr: &str) -> Result<Expr, Error> {
        Engine::new().parse(expr)
    }

    pub(crate) fn from_ast(ast: Arc<Ast>) -> Expr {
        let vars = collect_vars(&ast);
        Expr { ast, vars }
    }

    pub fn eval<S: Scope + ?Sized>(&self, scope: &S) -> Result<f64, EvalError> {
        eval(&self.ast, scope)
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn variables(&self) -> &[String] {
        &self.vars
    }

    /// Every function name the formula calls, including ones that would be
    /// rejected at evaluation time.
    pub fn calls(&self) -> Vec<String> {
        collect_calls(&self.ast)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.ast, f)
    }
}
