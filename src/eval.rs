use crate::ast::Ast;
use crate::builtins::Builtin;
use crate::error::EvalError;
use crate::scope::Scope;

/// Tree-walking evaluation of a parsed formula.
///
/// Arithmetic follows IEEE-754: `1/0` is `inf` and `0/0` is NaN, and such values
/// propagate instead of raising errors. The only failures are an unbound variable,
/// a call to a name outside the allow-list, and a wrong argument count.
pub(crate) fn eval<S: Scope + ?Sized>(ast: &Ast, scope: &S) -> Result<f64, EvalError> {
    match ast {
        Ast::Literal(v) => Ok(*v),
        Ast::Variable(name) => scope
            .get(name)
            .ok_or_else(|| EvalError::UnknownVariable(name.clone())),
        Ast::Unary { op, operand } => Ok(op.apply(eval(operand, scope)?)),
        Ast::Binary { op, left, right } => {
            let a = eval(left, scope)?;
            let b = eval(right, scope)?;
            Ok(op.apply(a, b))
        }
        Ast::Call { name, args } => {
            let f = Builtin::lookup(name)
                .ok_or_else(|| EvalError::FunctionNotAllowed(name.clone()))?;
            let expected = f.arity();
            if !expected.accepts(args.len()) {
                return Err(EvalError::Arity {
                    name: name.clone(),
                    expected,
                    got: args.len(),
                });
            }
            let values = args
                .iter()
                .map(|a| eval(a, scope))
                .collect::<Result<Vec<f64>, _>>()?;
            Ok(f.call(&values))
        }
    }
}
