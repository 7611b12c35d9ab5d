//! AST node definitions.
//!
//! Rather than the generic `{ left, right, operator_id, eval_fn,
//! type_check_fn }` shape, each node shape gets its own [`NodeKind`]
//! variant; the evaluator and type-check table dispatch on the variant
//! instead of on a stored closure. Observable semantics (short-circuiting,
//! comma-folding, the `?:` two-node trick) are unchanged. Every node carries
//! the source [`Span`] it was parsed from, for error reporting.

use evalex_lex::Operator;
use evalex_util::value::{HostFn, Value};
use evalex_util::{Span, Symbol};

/// A node in the parsed expression tree: its shape plus the span of source
/// text it covers.
#[derive(Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The shape of an expression tree node.
#[derive(Clone)]
pub enum NodeKind {
    /// A literal value: number, string, or boolean.
    Literal(Value),

    /// A variable reference, resolved against the parameter map at
    /// evaluation time.
    Var(Symbol),

    /// A host function call. `args` is `None` for a zero-argument call,
    /// otherwise the (possibly comma-folded) argument expression.
    Call {
        func: HostFn,
        args: Option<Box<Node>>,
    },

    /// A list literal. `items` is `None` for an empty list, otherwise the
    /// comma-folded chain of element expressions.
    List { items: Option<Box<Node>> },

    /// A prefix unary operator.
    Unary { op: Operator, operand: Box<Node> },

    /// A binary operator, including the `?`/`:` ternary pair.
    Binary {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// The comma folder: builds a left-leaning chain used by both call
    /// argument lists and list literals. Evaluates to a single list Value.
    CommaFold { left: Box<Node>, right: Box<Node> },
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            NodeKind::Literal(v) => write!(f, "Literal({v:?})@{:?}", self.span),
            NodeKind::Var(s) => write!(f, "Var({s})@{:?}", self.span),
            NodeKind::Call { args, .. } => {
                write!(f, "Call(<host fn>, {args:?})@{:?}", self.span)
            }
            NodeKind::List { items } => write!(f, "List({items:?})@{:?}", self.span),
            NodeKind::Unary { op, operand } => {
                write!(f, "Unary({op}, {operand:?})@{:?}", self.span)
            }
            NodeKind::Binary { op, left, right } => {
                write!(f, "Binary({op}, {left:?}, {right:?})@{:?}", self.span)
            }
            NodeKind::CommaFold { left, right } => {
                write!(f, "CommaFold({left:?}, {right:?})@{:?}", self.span)
            }
        }
    }
}
