//! Lexer: turns source text into a flat token sequence.
//!
//! Recognition order, matching the source grammar: whitespace is skipped,
//! then identifiers/keywords, then numeric literals, then operators (via
//! greedy longest-match), then single-quoted strings. Any other character is
//! a lexical error.

use evalex_util::value::HostRegistry;
use evalex_util::{Span, Symbol};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{is_in_keyword, keyword_bool, Operator, Token, TokenKind, TokenValue};

/// Consumes a source string against a host-function registry and produces
/// its token sequence.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    registry: &'a HostRegistry,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, registry: &'a HostRegistry) -> Self {
        Self {
            cursor: Cursor::new(source),
            registry,
            token_start: 0,
        }
    }

    /// Scans the entire source into a token vector.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        if self.cursor.source().is_empty() {
            return Err(LexError::EmptyInput);
        }

        let mut tokens = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_at_end() {
                break;
            }
            self.token_start = self.cursor.position();
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    /// The span from `token_start` to the cursor's current position,
    /// covering whatever has been consumed for the token in progress.
    fn span(&self) -> Span {
        Span::new(self.token_start, self.cursor.position())
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let c = self.cursor.current_char();
        match c {
            '(' => self.single(TokenKind::LParen, TokenValue::None),
            ')' => self.single(TokenKind::RParen, TokenValue::None),
            '[' => self.single(TokenKind::LBrack, TokenValue::None),
            ']' => self.single(TokenKind::RBrack, TokenValue::None),
            ',' => self.single(TokenKind::Comma, TokenValue::None),
            '\'' => self.lex_string(),
            '|' => Ok(self.lex_pipe()),
            '&' => Ok(self.lex_ampersand()),
            '=' => self.lex_equals(),
            '!' => Ok(self.lex_bang()),
            '<' => Ok(self.lex_less()),
            '>' => Ok(self.lex_greater()),
            '+' => Ok(self.lex_plus()),
            '-' => Ok(self.lex_minus()),
            '*' => Ok(self.lex_star()),
            '^' => Ok(self.op_advance(Operator::BitXor)),
            '/' => Ok(self.op_advance(Operator::Div)),
            '%' => Ok(self.op_advance(Operator::Mod)),
            '?' => Ok(self.op_advance(Operator::Question)),
            ':' => Ok(self.op_advance(Operator::Colon)),
            '~' => Ok(self.op_advance(Operator::BitNot)),
            c if c.is_alphabetic() => Ok(self.lex_identifier()),
            c if c.is_ascii_digit() || c == '.' => self.lex_number(),
            c => Err(LexError::IllegalCharacter {
                ch: c,
                span: Span::point(self.cursor.position()),
            }),
        }
    }

    fn single(&mut self, kind: TokenKind, raw: TokenValue) -> Result<Token, LexError> {
        self.cursor.advance();
        Ok(Token::new(kind, raw, self.span()))
    }

    fn op_advance(&mut self, op: Operator) -> Token {
        self.cursor.advance();
        Token::new(TokenKind::Op, TokenValue::Operator(op), self.span())
    }

    fn op_token(&self, op: Operator) -> Token {
        Token::new(TokenKind::Op, TokenValue::Operator(op), self.span())
    }

    /// `|` then `|` -> `||`; else `|`.
    fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            self.op_token(Operator::Or)
        } else {
            self.op_token(Operator::BitOr)
        }
    }

    /// `&` then `^` -> `&^`; `&` then `&` -> `&&`; else `&`.
    fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('^') {
            self.op_token(Operator::BitAndNot)
        } else if self.cursor.match_char('&') {
            self.op_token(Operator::And)
        } else {
            self.op_token(Operator::BitAnd)
        }
    }

    /// `=` must be followed by `=`; a bare `=` is a lexical error.
    fn lex_equals(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Ok(self.op_token(Operator::Eq))
        } else {
            Err(LexError::BareEquals { span: self.span() })
        }
    }

    /// `!` then `=` -> `!=`; else `!`.
    fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.op_token(Operator::Ne)
        } else {
            self.op_token(Operator::Not)
        }
    }

    /// `<` then `=` -> `<=`; `<` then `<` -> `<<`; else `<`.
    fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.op_token(Operator::Le)
        } else if self.cursor.match_char('<') {
            self.op_token(Operator::Shl)
        } else {
            self.op_token(Operator::Lt)
        }
    }

    /// `>` then `=` -> `>=`; `>` then `>` -> `>>`; else `>`.
    fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.op_token(Operator::Ge)
        } else if self.cursor.match_char('>') {
            self.op_token(Operator::Shr)
        } else {
            self.op_token(Operator::Gt)
        }
    }

    /// `+` then `+` -> `++`; else `+`.
    fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('+') {
            self.op_token(Operator::Inc)
        } else {
            self.op_token(Operator::Add)
        }
    }

    /// `-` then `-` -> `--`; else `-`. Unary vs. binary is decided later by
    /// the parser, based on position.
    fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            self.op_token(Operator::Dec)
        } else {
            self.op_token(Operator::Sub)
        }
    }

    /// `*` then `*` -> `**`; else `*`.
    fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            self.op_token(Operator::Pow)
        } else {
            self.op_token(Operator::Mul)
        }
    }

    /// Identifier: a maximal run of `letter | digit | underscore`, starting
    /// with a Unicode letter. Checked against the keyword set, then the host
    /// registry, falling back to a plain variable reference.
    fn lex_identifier(&mut self) -> Token {
        while {
            let c = self.cursor.current_char();
            c.is_alphanumeric() || c == '_'
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        if let Some(b) = keyword_bool(text) {
            return Token::new(TokenKind::BoolLit, TokenValue::Bool(b), self.span());
        }
        if is_in_keyword(text) {
            return self.op_token(Operator::In);
        }
        if let Some(func) = self.registry.get(text) {
            return Token::new(TokenKind::Func, TokenValue::Func(func), self.span());
        }
        Token::new(TokenKind::Var, TokenValue::Ident(Symbol::intern(text)), self.span())
    }

    /// Numeric literal: a maximal run of `digit | .`, parsed as a double. A
    /// parse failure (e.g. more than one `.`) is a lexical error.
    fn lex_number(&mut self) -> Result<Token, LexError> {
        while {
            let c = self.cursor.current_char();
            c.is_ascii_digit() || c == '.'
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        match text.parse::<f64>() {
            Ok(value) => Ok(Token::new(TokenKind::FloatLit, TokenValue::Float(value), self.span())),
            Err(_) => Err(LexError::InvalidNumber {
                text: text.to_string(),
                span: self.span(),
            }),
        }
    }

    /// Single-quoted string literal. The only recognized escape is `\'`; any
    /// other character following `\` is an error. Unterminated input is an
    /// error.
    fn lex_string(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        self.cursor.advance();

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString {
                    span: Span::new(start, self.cursor.position()),
                });
            }

            let c = self.cursor.current_char();
            if c == '\'' {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                let esc_pos = self.cursor.position();
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(LexError::UnterminatedString {
                        span: Span::new(start, self.cursor.position()),
                    });
                }
                let escaped = self.cursor.current_char();
                if escaped == '\'' {
                    content.push('\'');
                    self.cursor.advance();
                } else {
                    return Err(LexError::IllegalEscape {
                        ch: escaped,
                        span: Span::point(esc_pos),
                    });
                }
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        Ok(Token::new(TokenKind::StrLit, TokenValue::Str(content), self.span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lex(source: &str) -> Result<Vec<Token>, LexError> {
        let registry = HostRegistry::new();
        Lexer::new(source, &registry).tokenize()
    }

    #[test]
    fn empty_input_is_error() {
        assert_eq!(lex(""), Err(LexError::EmptyInput));
    }

    #[test]
    fn single_float_literal() {
        let tokens = lex("3.14").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::FloatLit);
        assert_eq!(tokens[0].span, evalex_util::Span::new(0, 4));
    }

    #[test]
    fn token_spans_cover_each_lexeme() {
        let tokens = lex("a + 22").unwrap();
        assert_eq!(tokens[0].span, evalex_util::Span::new(0, 1));
        assert_eq!(tokens[1].span, evalex_util::Span::new(2, 3));
        assert_eq!(tokens[2].span, evalex_util::Span::new(4, 6));
    }

    #[test]
    fn operators_disambiguate_longest_match() {
        let tokens = lex("a && b || c").unwrap();
        let ops: Vec<_> = tokens.iter().filter_map(|t| t.operator()).collect();
        assert_eq!(ops, vec![Operator::And, Operator::Or]);
    }

    #[test]
    fn bitwise_operator_family() {
        let tokens = lex("a & b &^ c | d ^ e << f >> g").unwrap();
        let ops: Vec<_> = tokens.iter().filter_map(|t| t.operator()).collect();
        assert_eq!(
            ops,
            vec![
                Operator::BitAnd,
                Operator::BitAndNot,
                Operator::BitOr,
                Operator::BitXor,
                Operator::Shl,
                Operator::Shr,
            ]
        );
    }

    #[test]
    fn bare_equals_is_error() {
        assert_eq!(
            lex("a = b"),
            Err(LexError::BareEquals {
                span: evalex_util::Span::new(2, 3)
            })
        );
    }

    #[test]
    fn double_equals_ok() {
        let tokens = lex("a == b").unwrap();
        assert_eq!(tokens[1].operator(), Some(Operator::Eq));
    }

    #[test]
    fn boolean_keywords_case_insensitive() {
        let tokens = lex("TRUE").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::BoolLit);
        match &tokens[0].raw {
            TokenValue::Bool(b) => assert!(*b),
            _ => panic!("expected bool"),
        }
    }

    #[test]
    fn in_keyword_becomes_operator() {
        let tokens = lex("x in y").unwrap();
        assert_eq!(tokens[1].operator(), Some(Operator::In));
    }

    #[test]
    fn string_with_escaped_quote() {
        let tokens = lex("'it\\'s'").unwrap();
        match &tokens[0].raw {
            TokenValue::Str(s) => assert_eq!(s, "it's"),
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn unterminated_string_is_error() {
        assert_eq!(
            lex("'abc"),
            Err(LexError::UnterminatedString {
                span: evalex_util::Span::new(0, 4)
            })
        );
    }

    #[test]
    fn illegal_escape_is_error() {
        assert_eq!(
            lex("'a\\nb'"),
            Err(LexError::IllegalEscape {
                ch: 'n',
                span: evalex_util::Span::point(2)
            })
        );
    }

    #[test]
    fn unresolved_identifier_is_var() {
        let tokens = lex("foo").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Var);
    }

    #[test]
    fn registered_identifier_is_func() {
        let mut registry = HostRegistry::new();
        registry.register("f", Arc::new(|_args| Ok(evalex_util::Value::Absent)));
        let tokens = Lexer::new("f(x)", &registry).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Func);
    }

    #[test]
    fn illegal_character_reports_index() {
        assert_eq!(
            lex("a @ b"),
            Err(LexError::IllegalCharacter {
                ch: '@',
                span: evalex_util::Span::point(2)
            })
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        let tokens = lex("  1   +   2 ").unwrap();
        assert_eq!(tokens.len(), 3);
    }
}
