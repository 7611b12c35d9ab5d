//! Parser: precedence-climbing recursive descent over a token stream.
//!
//! Three mutually recursive productions build the tree:
//!
//! ```text
//! binaryExpr(leftSeed, prec):
//!     left <- leftSeed or unaryExpr()
//!     while current token is a binary operator with precedence > prec:
//!         op <- current; consume
//!         right <- binaryExpr(null, precedence(op))
//!         left  <- node(op, left, right)
//!     return left
//!
//! unaryExpr:
//!     if current is one of {++, --, !, ~}: node(op, left = unaryExpr())
//!     if current is `-`: node(unary-minus, left = unaryExpr())
//!     else: primaryExpr()
//!
//! primaryExpr:
//!     literal / Var          -> leaf node
//!     Func name               -> consume; require `(`; args <- binaryExprs(until `)`); node(func, args)
//!     `(` expr `)`             -> expr
//!     `[` exprs `]`            -> comma-chain node or absent if empty
//! ```
//!
//! Before any tree-building, the whole token stream is checked for bracket
//! balance and adjacent-token legality (the successor table), so a
//! structural or syntactic error is always reported before parsing begins.
//! Every node constructed here carries the source span of the tokens it was
//! built from, for error reporting further down the pipeline.

use evalex_lex::{Operator, Token, TokenKind, TokenValue};
use evalex_util::Span;

use crate::error::ParseError;
use crate::node::{Node, NodeKind};

/// Parses a token stream into an expression tree.
pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    validate_structure(tokens)?;

    let mut parser = Parser { tokens, pos: 0 };
    let root = parser.binary_expr(None, 0)?;

    if parser.pos != parser.tokens.len() {
        return Err(ParseError::LeftoverTokens {
            span: parser.tokens[parser.pos].span,
        });
    }

    Ok(root)
}

/// Bracket-balance and successor-table checks performed before any
/// tree-building, per the structural/syntactic error taxonomy.
fn validate_structure(tokens: &[Token]) -> Result<(), ParseError> {
    let lparens = tokens.iter().filter(|t| t.kind == TokenKind::LParen).count();
    let rparens = tokens.iter().filter(|t| t.kind == TokenKind::RParen).count();
    if lparens != rparens {
        return Err(ParseError::UnbalancedParens {
            left: lparens,
            right: rparens,
        });
    }

    let lbracks = tokens.iter().filter(|t| t.kind == TokenKind::LBrack).count();
    let rbracks = tokens.iter().filter(|t| t.kind == TokenKind::RBrack).count();
    if lbracks != rbracks {
        return Err(ParseError::UnbalancedBrackets {
            left: lbracks,
            right: rbracks,
        });
    }

    if tokens.is_empty() {
        return Err(ParseError::PrematureEnd);
    }

    let first = &tokens[0];
    if !first.kind.is_valid_start() {
        return Err(ParseError::IllegalStart {
            kind: first.kind,
            span: first.span,
        });
    }

    let last = &tokens[tokens.len() - 1];
    if !last.kind.is_valid_end() {
        return Err(ParseError::IllegalEnd {
            kind: last.kind,
            span: last.span,
        });
    }

    for pair in tokens.windows(2) {
        let prev = &pair[0];
        let next = &pair[1];
        if !evalex_lex::token::is_valid_successor(prev.kind, next.kind) {
            return Err(ParseError::InvalidSuccessor {
                prev: prev.kind,
                next: next.kind,
                span: prev.span.to(next.span),
            });
        }
    }

    Ok(())
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// The span to blame when an expected token is missing: the current
    /// token's span, or a zero-width span past the end of input if the
    /// stream is exhausted.
    fn current_span(&self) -> Span {
        match self.peek() {
            Some(tok) => tok.span,
            None => self
                .tokens
                .last()
                .map(|t| Span::point(t.span.end))
                .unwrap_or(Span::DUMMY),
        }
    }

    /// The current token's operator identity, if it is an `Op` token whose
    /// arity is binary (unary-only operators never extend a `binaryExpr`
    /// loop; they are only consumed from `unaryExpr`).
    fn current_binary_op(&self) -> Option<Operator> {
        let tok = self.peek()?;
        if tok.kind != TokenKind::Op {
            return None;
        }
        let op = tok.operator()?;
        // `-` is lexed uniformly; `unaryExpr` already consumed it if it was
        // meant as unary-minus, so any `-` reaching here is binary subtract.
        // `++`/`--`/`!`/`~` never appear at this point because they are only
        // ever consumed as prefix unary operators.
        Some(op)
    }

    fn binary_expr(&mut self, left_seed: Option<Node>, prec: u8) -> Result<Node, ParseError> {
        let mut left = match left_seed {
            Some(node) => node,
            None => self.unary_expr()?,
        };

        while let Some(op) = self.current_binary_op() {
            if op.precedence() <= prec {
                break;
            }
            self.advance();
            let right = self.binary_expr(None, op.precedence())?;
            let span = left.span.to(right.span);
            left = Node::new(
                NodeKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn unary_expr(&mut self) -> Result<Node, ParseError> {
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Op {
                if let Some(op) = tok.operator() {
                    match op {
                        Operator::Inc | Operator::Dec | Operator::Not | Operator::BitNot => {
                            let op_span = tok.span;
                            self.advance();
                            let operand = self.unary_expr()?;
                            let span = op_span.to(operand.span);
                            return Ok(Node::new(
                                NodeKind::Unary {
                                    op,
                                    operand: Box::new(operand),
                                },
                                span,
                            ));
                        }
                        Operator::Sub => {
                            let op_span = tok.span;
                            self.advance();
                            let operand = self.unary_expr()?;
                            let span = op_span.to(operand.span);
                            return Ok(Node::new(
                                NodeKind::Unary {
                                    op: Operator::Neg,
                                    operand: Box::new(operand),
                                },
                                span,
                            ));
                        }
                        _ => {}
                    }
                }
            }
        }
        self.primary_expr()
    }

    fn primary_expr(&mut self) -> Result<Node, ParseError> {
        let tok = self
            .advance()
            .ok_or(ParseError::PrematureEnd)?;

        match tok.kind {
            TokenKind::FloatLit => match &tok.raw {
                TokenValue::Float(v) => Ok(Node::new(
                    NodeKind::Literal(evalex_util::Value::Number(*v)),
                    tok.span,
                )),
                _ => unreachable!("FloatLit token without a float payload"),
            },
            TokenKind::StrLit => match &tok.raw {
                TokenValue::Str(s) => Ok(Node::new(
                    NodeKind::Literal(evalex_util::Value::Str(s.clone())),
                    tok.span,
                )),
                _ => unreachable!("StrLit token without a string payload"),
            },
            TokenKind::BoolLit => match &tok.raw {
                TokenValue::Bool(b) => Ok(Node::new(
                    NodeKind::Literal(evalex_util::Value::Bool(*b)),
                    tok.span,
                )),
                _ => unreachable!("BoolLit token without a bool payload"),
            },
            TokenKind::Var => match &tok.raw {
                TokenValue::Ident(sym) => Ok(Node::new(NodeKind::Var(*sym), tok.span)),
                _ => unreachable!("Var token without an identifier payload"),
            },
            TokenKind::Func => {
                let func_span = tok.span;
                let func = match &tok.raw {
                    TokenValue::Func(f) => f.clone(),
                    _ => unreachable!("Func token without a handle payload"),
                };
                self.expect(TokenKind::LParen, |span| ParseError::MissingLParenAfterFunc {
                    span,
                })?;
                let args = if self.check(TokenKind::RParen) {
                    None
                } else {
                    Some(Box::new(self.binary_exprs()?))
                };
                let rparen = self.expect(TokenKind::RParen, |span| ParseError::MissingRParen {
                    span,
                })?;
                let span = func_span.to(rparen.span);
                Ok(Node::new(NodeKind::Call { func, args }, span))
            }
            TokenKind::LParen => {
                let lparen_span = tok.span;
                let inner = self.binary_expr(None, 0)?;
                let rparen = self.expect(TokenKind::RParen, |span| ParseError::MissingRParen {
                    span,
                })?;
                Ok(Node::new(inner.kind, lparen_span.to(rparen.span)))
            }
            TokenKind::LBrack => {
                let lbrack_span = tok.span;
                let items = if self.check(TokenKind::RBrack) {
                    None
                } else {
                    Some(Box::new(self.binary_exprs()?))
                };
                let rbrack = self.expect(TokenKind::RBrack, |span| ParseError::MissingRBrack {
                    span,
                })?;
                Ok(Node::new(
                    NodeKind::List { items },
                    lbrack_span.to(rbrack.span),
                ))
            }
            other => Err(ParseError::IllegalStart {
                kind: other,
                span: tok.span,
            }),
        }
    }

    /// Parses a comma-separated, non-empty list of `binaryExpr`s at
    /// precedence 0, folding successive parses into a left-leaning chain.
    fn binary_exprs(&mut self) -> Result<Node, ParseError> {
        let mut result = self.binary_expr(None, 0)?;
        while self.check(TokenKind::Comma) {
            self.advance();
            let next = self.binary_expr(None, 0)?;
            let span = result.span.to(next.span);
            result = Node::new(
                NodeKind::CommaFold {
                    left: Box::new(result),
                    right: Box::new(next),
                },
                span,
            );
        }
        Ok(result)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().map(|t| t.kind == kind).unwrap_or(false)
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        err: impl FnOnce(Span) -> ParseError,
    ) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().unwrap())
        } else {
            Err(err(self.current_span()))
        }
    }
}
