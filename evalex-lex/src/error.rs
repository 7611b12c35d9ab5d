//! Lexical error types.

use evalex_util::Span;
use thiserror::Error;

/// An error raised while scanning source text into tokens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("empty input")]
    EmptyInput,

    #[error("unterminated string literal starting at byte {}", .span.start)]
    UnterminatedString { span: Span },

    #[error("illegal escape sequence '\\{ch}' at byte {}", .span.start)]
    IllegalEscape { ch: char, span: Span },

    #[error("illegal character '{ch}' at byte {}", .span.start)]
    IllegalCharacter { ch: char, span: Span },

    #[error("bare '=' is not a valid operator at byte {}; did you mean '=='?", .span.start)]
    BareEquals { span: Span },

    #[error("invalid numeric literal '{text}' at byte {}", .span.start)]
    InvalidNumber { text: String, span: Span },
}
