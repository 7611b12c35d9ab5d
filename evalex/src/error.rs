//! The aggregated, public error type.

use evalex_util::value::Value;
use thiserror::Error;

/// Any error this crate can produce, from lexing through evaluation.
#[derive(Debug, Error, Clone)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] evalex_lex::LexError),

    #[error(transparent)]
    Parse(#[from] evalex_par::ParseError),

    #[error(transparent)]
    Eval(#[from] evalex_eval::EvalError),

    /// Raised by [`crate::Expression::as_bool`]/`as_str`/`as_i64`/`as_f64`
    /// when the evaluated result isn't of the requested type.
    #[error("the result ({result:?}) is not of {expected} type")]
    UnexpectedType { expected: &'static str, result: Value },
}
