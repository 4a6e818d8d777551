use foldhash::{HashMap, HashMapExt};

use crate::error::EvalError;
use crate::expr::Expr;
use crate::scope::Scope;

/// A formula bound to an ordered parameter list, called with positional arguments.
///
/// Useful when one formula runs many times with different inputs, e.g. once per
/// row of an amortization schedule:
///
/// ```
/// let interest = safecalc::create_function("balance * rate / 12", &["balance", "rate"])?;
/// assert_eq!(interest.call(&[1200.0, 0.25])?, 25.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Arguments missing from the end of the slice read as `0.0`; extra arguments are
/// ignored. A referenced variable that is not a parameter fails with
/// [`EvalError::UnknownVariable`].
#[derive(Clone, Debug)]
pub struct Formula {
    expr: Expr,
    params: Vec<String>,
    /// Parameter name -> argument index. A repeated name binds its last position.
    index: HashMap<String, usize>,
}

impl Formula {
    pub(crate) fn new<P: AsRef<str>>(expr: Expr, params: &[P]) -> Formula {
        let params: Vec<String> = params.iter().map(|p| p.as_ref().to_string()).collect();
        let mut index = HashMap::with_capacity(params.len());
        for (i, name) in params.iter().enumerate() {
            index.insert(name.clone(), i);
        }
        Formula {
            expr,
            params,
            index,
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn variables(&self) -> &[String] {
        self.expr.variables()
    }

    /// Variables the formula reads that no parameter supplies. Calling a formula
    /// with a non-empty result always fails.
    pub fn unbound(&self) -> Vec<&str> {
        self.expr
            .variables()
            .iter()
            .filter(|v| !self.index.contains_key(v.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn call(&self, args: &[f64]) -> Result<f64, EvalError> {
        self.expr.eval(&Args {
            index: &self.index,
            args,
        })
    }

    pub fn into_fn(self) -> impl Fn(&[f64]) -> Result<f64, EvalError> + Clone + Send + Sync {
        move |args: &[f64]| self.call(args)
    }
}

struct Args<'a> {
    index: &'a HashMap<String, usize>,
    args: &'a [f64],
}

impl Scope for Args<'_> {
    fn get(&self, name: &str) -> Option<f64> {
        let &i = self.index.get(name)?;
        Some(self.args.get(i).copied().unwrap_or(0.0))
    }
}
