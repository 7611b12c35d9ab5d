//! Lexical analysis: source text to a flat token sequence.
//!
//! [`cursor::Cursor`] is the character-level scanning primitive; [`lexer::Lexer`]
//! consumes it to produce [`token::Token`]s, resolving identifiers against a
//! host-function registry as it goes (see [`token::TokenKind::Func`]).

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Operator, Token, TokenKind, TokenValue};
