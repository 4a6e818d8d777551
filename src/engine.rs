use std::sync::{Arc, PoisonError, RwLock};

use foldhash::{HashMap, HashMapExt};
use log::debug;

use crate::ast::Ast;
use crate::error::Error;
use crate::expr::Expr;
use crate::formula::Formula;
use crate::lexer::{LexMode, Lexer};
#[cfg(feature = "optimize")]
use crate::optimizer::optimize;
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use crate::scope::Scope;

/// Front-end settings shared by every expression an [`Engine`] parses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub lex_mode: LexMode,
    /// Maximum nesting of parentheses, call arguments and unary minus, and the
    /// maximum height of the parsed tree. A chain of `n` binary operators is `n + 1`
    /// levels high, so this also bounds how many terms `a + b + ...` may have.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lex_mode: LexMode::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn lex_mode(mut self, mode: LexMode) -> Self {
        self.lex_mode = mode;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Parses and evaluates formulas with a fixed set of [`Options`].
///
/// By default every call re-lexes and re-parses its input. [`Engine::with_cache`]
/// keeps parsed trees keyed by the raw expression string; results are never cached,
/// so bindings may change freely between calls.
#[derive(Default)]
pub struct Engine {
    options: Options,
    cache: Option<AstCache>,
}

struct AstCache {
    capacity: usize,
    entries: RwLock<HashMap<String, Arc<Ast>>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            cache: None,
        }
    }

    /// Enable the parse cache. Once `capacity` entries are held the cache is
    /// emptied before the next insert.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(AstCache {
            capacity: capacity.max(1),
            entries: RwLock::new(HashMap::with_capacity(capacity.min(64))),
        });
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn parse(&self, expr: &str) -> Result<Expr, Error> {
        let Some(cache) = &self.cache else {
            return Ok(Expr::from_ast(Arc::new(self.parse_ast(expr)?)));
        };
        let hit = cache
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(expr)
            .cloned();
        if let Some(ast) = hit {
            debug!("parse cache hit for {expr:?}");
            return Ok(Expr::from_ast(ast));
        }
        let ast = Arc::new(self.parse_ast(expr)?);
        let mut entries = cache
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= cache.capacity {
            debug!("parse cache full ({} entries), clearing", entries.len());
            entries.clear();
        }
        entries.insert(expr.to_string(), ast.clone());
        Ok(Expr::from_ast(ast))
    }

    fn parse_ast(&self, expr: &str) -> Result<Ast, Error> {
        let tokens = Lexer::new(expr, self.options.lex_mode).tokenize()?;
        let ast = Parser::with_max_depth(tokens, self.options.max_depth).parse()?;
        #[cfg(feature = "optimize")]
        let ast = optimize(ast);
        debug!("parsed {expr:?} as {ast}");
        Ok(ast)
    }

    pub fn evaluate<S: Scope + ?Sized>(&self, expr: &str, vars: &S) -> Result<f64, Error> {
        Ok(self.parse(expr)?.eval(vars)?)
    }

    /// Parse `expr` once and bind positional arguments to `params` on every call.
    pub fn create_function<P: AsRef<str>>(
        &self,
        expr: &str,
        params: &[P],
    ) -> Result<Formula, Error> {
        let parsed = self.parse(expr)?;
        Ok(Formula::new(parsed, params))
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    /// Number of cached parse trees; always 0 without [`Engine::with_cache`].
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| {
            c.entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        })
    }
}
