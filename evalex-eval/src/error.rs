//! Runtime (evaluation-time) error types.

use evalex_lex::Operator;
use evalex_util::value::HostError;
use evalex_util::Span;
use thiserror::Error;

/// An error raised while evaluating a parsed expression against a parameter
/// map.
#[derive(Debug, Error, Clone)]
pub enum EvalError {
    #[error("missing variable '{name}' at byte {}", .span.start)]
    MissingVariable { name: String, span: Span },

    #[error(
        "type-check failed for '{op}' at byte {}: left is {left_type}, right is {right_type}",
        .span.start
    )]
    TypeCheck {
        op: Operator,
        left_type: &'static str,
        right_type: &'static str,
        span: Span,
    },

    #[error("host function failed: {0}")]
    HostFunction(#[from] HostError),
}

impl EvalError {
    /// Attaches the evaluating node's span to this error, for variants that
    /// carry one. Used by the evaluator to fill in a span that a lower-level
    /// helper (which only sees `Value`s, not AST nodes) couldn't supply.
    pub fn with_span(mut self, span: Span) -> Self {
        match &mut self {
            EvalError::MissingVariable { span: s, .. } => *s = span,
            EvalError::TypeCheck { span: s, .. } => *s = span,
            EvalError::HostFunction(_) => {}
        }
        self
    }
}
