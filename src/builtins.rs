use std::fmt;

/// Number of arguments an allowed function accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(k) => write!(f, "{k}"),
            Arity::AtLeast(k) => write!(f, "at least {k}"),
        }
    }
}

/// The fixed set of functions a formula may call.
///
/// There is no registration API: a name either maps to one of these variants or the
/// call fails at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Abs,
    Acos,
    Asin,
    Atan,
    Atan2,
    Ceil,
    Cos,
    Exp,
    Floor,
    Log,
    Max,
    Min,
    Pow,
    Random,
    Round,
    Sin,
    Sqrt,
    Tan,
}

#[derive(Clone, Copy)]
enum Imp {
    Nullary(fn() -> f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Variadic(fn(&[f64]) -> f64),
}

impl Builtin {
    pub const ALL: [Builtin; 18] = [
        Builtin::Abs,
        Builtin::Acos,
        Builtin::Asin,
        Builtin::Atan,
        Builtin::Atan2,
        Builtin::Ceil,
        Builtin::Cos,
        Builtin::Exp,
        Builtin::Floor,
        Builtin::Log,
        Builtin::Max,
        Builtin::Min,
        Builtin::Pow,
        Builtin::Random,
        Builtin::Round,
        Builtin::Sin,
        Builtin::Sqrt,
        Builtin::Tan,
    ];

    pub fn lookup(name: &str) -> Option<Builtin> {
        let b = match name {
            "abs" => Builtin::Abs,
            "acos" => Builtin::Acos,
            "asin" => Builtin::Asin,
            "atan" => Builtin::Atan,
            "atan2" => Builtin::Atan2,
            "ceil" => Builtin::Ceil,
            "cos" => Builtin::Cos,
            "exp" => Builtin::Exp,
            "floor" => Builtin::Floor,
            "log" => Builtin::Log,
            "max" => Builtin::Max,
            "min" => Builtin::Min,
            "pow" => Builtin::Pow,
            "random" => Builtin::Random,
            "round" => Builtin::Round,
            "sin" => Builtin::Sin,
            "sqrt" => Builtin::Sqrt,
            "tan" => Builtin::Tan,
            _ => return None,
        };
        Some(b)
    }

    pub fn is_allowed(name: &str) -> bool {
        Self::lookup(name).is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Acos => "acos",
            Builtin::Asin => "asin",
            Builtin::Atan => "atan",
            Builtin::Atan2 => "atan2",
            Builtin::Ceil => "ceil",
            Builtin::Cos => "cos",
            Builtin::Exp => "exp",
            Builtin::Floor => "floor",
            Builtin::Log => "log",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::Pow => "pow",
            Builtin::Random => "random",
            Builtin::Round => "round",
            Builtin::Sin => "sin",
            Builtin::Sqrt => "sqrt",
            Builtin::Tan => "tan",
        }
    }

    pub fn arity(self) -> Arity {
        match self.imp() {
            Imp::Nullary(_) => Arity::Exact(0),
            Imp::Unary(_) => Arity::Exact(1),
            Imp::Binary(_) => Arity::Exact(2),
            Imp::Variadic(_) => Arity::AtLeast(1),
        }
    }

    fn imp(self) -> Imp {
        match self {
            Builtin::Abs => Imp::Unary(f64::abs),
            Builtin::Acos => Imp::Unary(f64::acos),
            Builtin::Asin => Imp::Unary(f64::asin),
            Builtin::Atan => Imp::Unary(f64::atan),
            Builtin::Atan2 => Imp::Binary(f64::atan2),
            Builtin::Ceil => Imp::Unary(f64::ceil),
            Builtin::Cos => Imp::Unary(f64::cos),
            Builtin::Exp => Imp::Unary(f64::exp),
            Builtin::Floor => Imp::Unary(f64::floor),
            Builtin::Log => Imp::Unary(f64::ln),
            Builtin::Max => Imp::Variadic(max),
            Builtin::Min => Imp::Variadic(min),
            Builtin::Pow => Imp::Binary(f64::powf),
            Builtin::Random => Imp::Nullary(random),
            Builtin::Round => Imp::Unary(round_half_up),
            Builtin::Sin => Imp::Unary(f64::sin),
            Builtin::Sqrt => Imp::Unary(f64::sqrt),
            Builtin::Tan => Imp::Unary(f64::tan),
        }
    }

    /// Applies the function. Callers check [`Builtin::arity`] first; a short argument
    /// list yields NaN rather than panicking.
    pub fn call(self, args: &[f64]) -> f64 {
        match (self.imp(), args) {
            (Imp::Nullary(f), _) => f(),
            (Imp::Unary(f), [x, ..]) => f(*x),
            (Imp::Binary(f), [x, y, ..]) => f(*x, *y),
            (Imp::Variadic(f), _) => f(args),
            _ => f64::NAN,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// NaN wins, unlike f64::max.
fn max(args: &[f64]) -> f64 {
    args.iter().try_fold(f64::NEG_INFINITY, |acc, &x| {
        if x.is_nan() { None } else { Some(acc.max(x)) }
    })
    .unwrap_or(f64::NAN)
}

fn min(args: &[f64]) -> f64 {
    args.iter().try_fold(f64::INFINITY, |acc, &x| {
        if x.is_nan() { None } else { Some(acc.min(x)) }
    })
    .unwrap_or(f64::NAN)
}

fn random() -> f64 {
    rand::random::<f64>()
}

/// Halves round toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(x: f64) -> f64 {
    if x - x.floor() == 0.5 {
        x.ceil()
    } else {
        x.round()
    }
}
