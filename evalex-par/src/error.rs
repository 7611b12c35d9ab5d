//! Syntactic and structural error types.

use thiserror::Error;

use evalex_lex::TokenKind;
use evalex_util::Span;

/// An error raised while validating the token stream or building the AST.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unbalanced parentheses: {left} '(' vs {right} ')'")]
    UnbalancedParens { left: usize, right: usize },

    #[error("unbalanced brackets: {left} '[' vs {right} ']'")]
    UnbalancedBrackets { left: usize, right: usize },

    #[error("token {next:?} may not follow {prev:?} at byte {}", .span.start)]
    InvalidSuccessor {
        prev: TokenKind,
        next: TokenKind,
        span: Span,
    },

    #[error("expression cannot start with {kind:?} at byte {}", .span.start)]
    IllegalStart { kind: TokenKind, span: Span },

    #[error("expression cannot end with {kind:?} at byte {}", .span.start)]
    IllegalEnd { kind: TokenKind, span: Span },

    #[error("unexpected end of input while parsing an expression")]
    PrematureEnd,

    #[error("expected '(' after function name at byte {}", .span.start)]
    MissingLParenAfterFunc { span: Span },

    #[error("expected ')' at byte {}", .span.start)]
    MissingRParen { span: Span },

    #[error("expected ']' at byte {}", .span.start)]
    MissingRBrack { span: Span },

    #[error("leftover tokens after top-level expression, starting at byte {}", .span.start)]
    LeftoverTokens { span: Span },
}
