//! Post-order tree-walking evaluator.
//!
//! For each node: evaluate `left`, apply short-circuit rules for `&&`,
//! `||`, `?`, `:` (skipping `right` when already determined), otherwise
//! evaluate `right`, optionally run the type-check predicate, then apply
//! the operator's evaluator.

use evalex_lex::Operator;
use evalex_par::{Node, NodeKind};
use evalex_util::value::Params;
use evalex_util::{Span, Value};

use crate::error::EvalError;
use crate::typecheck;

/// Evaluates `node` against `params`. When `need_check` is set, each
/// operator's type-check predicate runs before its evaluator.
pub fn evaluate(node: &Node, params: &Params, need_check: bool) -> Result<Value, EvalError> {
    match &node.kind {
        NodeKind::Literal(value) => Ok(value.clone()),

        NodeKind::Var(symbol) => params.get(symbol.as_str()).cloned().ok_or_else(|| {
            EvalError::MissingVariable {
                name: symbol.to_string(),
                span: node.span,
            }
        }),

        NodeKind::Call { func, args } => {
            let arg_value = match args {
                None => None,
                Some(inner) => Some(evaluate(inner, params, need_check)?),
            };
            let call_args = match arg_value {
                None => Vec::new(),
                Some(Value::List(items)) => items,
                Some(other) => vec![other],
            };
            Ok(func(&call_args)?)
        }

        NodeKind::List { items } => match items {
            None => Ok(Value::List(Vec::new())),
            Some(inner) => match evaluate(inner, params, need_check)? {
                Value::List(items) => Ok(Value::List(items)),
                other => Ok(Value::List(vec![other])),
            },
        },

        NodeKind::Unary { op, operand } => {
            let left = evaluate(operand, params, need_check)?;
            if need_check {
                typecheck::check(*op, &left, None).map_err(|e| e.with_span(node.span))?;
            }
            eval_unary(*op, left).map_err(|e| e.with_span(node.span))
        }

        NodeKind::Binary { op, left, right } => {
            let left_val = evaluate(left, params, need_check)?;

            match op {
                Operator::And if matches!(left_val, Value::Bool(false)) => {
                    return Ok(Value::Bool(false))
                }
                Operator::Or if matches!(left_val, Value::Bool(true)) => {
                    return Ok(Value::Bool(true))
                }
                Operator::Question if matches!(left_val, Value::Bool(false)) => {
                    return Ok(Value::Absent)
                }
                Operator::Colon if !left_val.is_absent() => return Ok(left_val),
                _ => {}
            }

            let right_val = evaluate(right, params, need_check)?;
            if need_check {
                typecheck::check(*op, &left_val, Some(&right_val))
                    .map_err(|e| e.with_span(node.span))?;
            }
            eval_binary(*op, left_val, right_val).map_err(|e| e.with_span(node.span))
        }

        NodeKind::CommaFold { left, right } => {
            let left_val = evaluate(left, params, need_check)?;
            let right_val = evaluate(right, params, need_check)?;
            match left_val {
                Value::List(mut items) => {
                    items.push(right_val);
                    Ok(Value::List(items))
                }
                other => Ok(Value::List(vec![other, right_val])),
            }
        }
    }
}

fn type_err(op: Operator, left: &Value, right: Option<&Value>) -> EvalError {
    EvalError::TypeCheck {
        op,
        left_type: left.type_name(),
        right_type: right.map(Value::type_name).unwrap_or("absent"),
        // Filled in by the caller via `with_span`; this helper only sees
        // `Value`s, not the AST node being evaluated.
        span: Span::DUMMY,
    }
}

fn eval_unary(op: Operator, left: Value) -> Result<Value, EvalError> {
    match op {
        Operator::Inc => match left {
            Value::Number(n) => Ok(Value::Number(n + 1.0)),
            other => Err(type_err(op, &other, None)),
        },
        Operator::Dec => match left {
            Value::Number(n) => Ok(Value::Number(n - 1.0)),
            other => Err(type_err(op, &other, None)),
        },
        Operator::Neg => match left {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(type_err(op, &other, None)),
        },
        Operator::Not => match left {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(type_err(op, &other, None)),
        },
        Operator::BitNot => match left {
            Value::Number(n) => Ok(Value::Number(!(n as i64) as f64)),
            other => Err(type_err(op, &other, None)),
        },
        other => unreachable!("{other} is not a unary operator"),
    }
}

fn eval_binary(op: Operator, left: Value, right: Value) -> Result<Value, EvalError> {
    use Operator::*;

    match op {
        Add => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(type_err(op, &left, Some(&right))),
        },
        Sub => numeric_op(op, left, right, |a, b| a - b),
        Mul => numeric_op(op, left, right, |a, b| a * b),
        Div => numeric_op(op, left, right, |a, b| a / b),
        Mod => numeric_op(op, left, right, |a, b| a % b),
        Pow => numeric_op(op, left, right, f64::powf),
        BitOr => int_op(op, left, right, |a, b| a | b),
        BitXor => int_op(op, left, right, |a, b| a ^ b),
        BitAnd => int_op(op, left, right, |a, b| a & b),
        BitAndNot => int_op(op, left, right, |a, b| a & !b),
        Shl => int_op(op, left, right, |a, b| a.wrapping_shl(b as u32)),
        Shr => int_op(op, left, right, |a, b| a.wrapping_shr(b as u32)),

        Lt | Le | Gt | Ge => compare(op, left, right),

        Eq => Ok(Value::Bool(left == right)),
        Ne => Ok(Value::Bool(left != right)),

        And => match (&left, &right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            _ => Err(type_err(op, &left, Some(&right))),
        },
        Or => match (&left, &right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(type_err(op, &left, Some(&right))),
        },

        // `?` / `:` reach here only when the short-circuit branch above did
        // not already return; `?` with a true left yields right, `:` with
        // an absent left yields right.
        Question => Ok(right),
        Colon => Ok(right),

        In => Ok(Value::Bool(match &right {
            Value::Absent => false,
            Value::List(items) => items.iter().any(|item| *item == left),
            other => *other == left,
        })),

        other => unreachable!("{other} is not a binary operator"),
    }
}

fn numeric_op(
    op: Operator,
    left: Value,
    right: Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(*a, *b))),
        _ => Err(type_err(op, &left, Some(&right))),
    }
}

fn int_op(
    op: Operator,
    left: Value,
    right: Value,
    f: impl Fn(i64, i64) -> i64,
) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(*a as i64, *b as i64) as f64)),
        _ => Err(type_err(op, &left, Some(&right))),
    }
}

fn compare(op: Operator, left: Value, right: Value) -> Result<Value, EvalError> {
    use std::cmp::Ordering;
    let ordering = match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    };
    let Some(ordering) = ordering else {
        return Err(type_err(op, &left, Some(&right)));
    };
    let result = match op {
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Ge => ordering != Ordering::Less,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}
