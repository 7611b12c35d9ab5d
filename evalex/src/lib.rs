//! Embeddable boolean and arithmetic expression evaluator.
//!
//! Parse a textual expression once against a host-function registry, then
//! evaluate the resulting [`Expression`] any number of times against
//! distinct parameter maps:
//!
//! ```
//! use evalex::Expression;
//! use evalex_util::value::{HostRegistry, Params, Value};
//!
//! let expr = Expression::new("a + b >= 10", true, HostRegistry::new()).unwrap();
//!
//! let mut params = Params::default();
//! params.insert("a".into(), Value::Number(4.0));
//! params.insert("b".into(), Value::Number(7.0));
//!
//! assert_eq!(expr.evaluate(&params).unwrap().as_bool(), Some(true));
//! ```

pub mod error;

pub use error::Error;
pub use evalex_util::value::{HostFn, HostRegistry, Params, Value};

use evalex_lex::Lexer;
use evalex_par::Node;

/// A parsed, immutable expression. Construction resolves host-function
/// identifiers and builds the AST once; [`Expression::evaluate`] may be
/// called any number of times with distinct parameter maps without
/// mutating the tree.
pub struct Expression {
    root: Node,
    need_check: bool,
}

impl Expression {
    /// Parses `source` against `functions`. When `need_check` is set, each
    /// operator's operand-type predicate runs at evaluation time.
    pub fn new(
        source: &str,
        need_check: bool,
        functions: impl Into<HostRegistry>,
    ) -> Result<Expression, Error> {
        let registry = functions.into();
        let tokens = Lexer::new(source, &registry).tokenize()?;
        let root = evalex_par::parse(&tokens)?;
        Ok(Expression { root, need_check })
    }

    /// Evaluates this expression against `params`, returning a single
    /// [`Value`].
    pub fn evaluate(&self, params: &Params) -> Result<Value, Error> {
        Ok(evalex_eval::evaluate(&self.root, params, self.need_check)?)
    }

    /// Evaluates this expression and coerces the result to `bool`, failing
    /// if it evaluated to any other type.
    pub fn as_bool(&self, params: &Params) -> Result<bool, Error> {
        let result = self.evaluate(params)?;
        result.as_bool().ok_or(Error::UnexpectedType {
            expected: "bool",
            result,
        })
    }

    /// Evaluates this expression and coerces the result to `String`, failing
    /// if it evaluated to any other type.
    pub fn as_str(&self, params: &Params) -> Result<String, Error> {
        let result = self.evaluate(params)?;
        match result.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(Error::UnexpectedType {
                expected: "string",
                result,
            }),
        }
    }

    /// Evaluates this expression and coerces the result to `i64`, failing if
    /// it evaluated to any other type. Mirrors [`Expression::as_f64`]'s
    /// numeric-only coercion, truncating toward zero.
    pub fn as_i64(&self, params: &Params) -> Result<i64, Error> {
        let result = self.evaluate(params)?;
        match result.as_f64() {
            Some(n) => Ok(n as i64),
            None => Err(Error::UnexpectedType {
                expected: "int64",
                result,
            }),
        }
    }

    /// Evaluates this expression and coerces the result to `f64`, failing if
    /// it evaluated to any other type.
    pub fn as_f64(&self, params: &Params) -> Result<f64, Error> {
        let result = self.evaluate(params)?;
        result.as_f64().ok_or(Error::UnexpectedType {
            expected: "float64",
            result,
        })
    }
}

/// Evaluates `source` once against `params` and `functions`, discarding the
/// parsed tree. Convenience shim over [`Expression::new`] +
/// [`Expression::evaluate`] for one-off evaluations.
pub fn eval(
    source: &str,
    need_check: bool,
    functions: impl Into<HostRegistry>,
    params: &Params,
) -> Result<Value, Error> {
    Expression::new(source, need_check, functions)?.evaluate(params)
}
