//! Per-operator type-check predicate table.
//!
//! Run only when the expression's need-check flag is set. `right` is
//! `None` for unary operators (the operand is always `left`).

use evalex_lex::Operator;
use evalex_util::{Span, Value};

use crate::error::EvalError;

fn is_bool(v: &Value) -> bool {
    matches!(v, Value::Bool(_))
}

fn is_numeric(v: &Value) -> bool {
    matches!(v, Value::Number(_))
}

fn is_string(v: &Value) -> bool {
    matches!(v, Value::Str(_))
}

/// The *can-compare* predicate: both numeric, or both string.
fn can_compare(left: &Value, right: &Value) -> bool {
    (is_numeric(left) && is_numeric(right)) || (is_string(left) && is_string(right))
}

fn can_equal(left: &Value, right: &Value) -> bool {
    (is_bool(left) && is_bool(right)) || can_compare(left, right)
}

/// Checks whether `op`'s operand types are admissible, per the type-check
/// table. `right` is `None` for unary operators.
pub fn check(op: Operator, left: &Value, right: Option<&Value>) -> Result<(), EvalError> {
    use Operator::*;

    let ok = match op {
        And | Or => match right {
            Some(r) => is_bool(left) && is_bool(r),
            None => false,
        },
        Question => is_bool(left),
        Colon => true,
        Eq | Ne => match right {
            Some(r) => can_equal(left, r),
            None => false,
        },
        Lt | Le | Gt | Ge => match right {
            Some(r) => can_compare(left, r),
            None => false,
        },
        Add => match right {
            // `+` supports numeric addition and string concatenation; the
            // same predicate as ordering comparisons, not a separate one.
            Some(r) => can_compare(left, r),
            None => false,
        },
        Sub | Mul | Div | Mod | BitOr | BitXor | BitAnd | BitAndNot | Shl | Shr | Pow => {
            match right {
                Some(r) => is_numeric(left) && is_numeric(r),
                None => false,
            }
        }
        Inc | Dec | Neg | BitNot => right.is_none() && is_numeric(left),
        Not => right.is_none() && is_bool(left),
        In => true,
    };

    if ok {
        Ok(())
    } else {
        // The evaluating node's span isn't known at this layer; the
        // evaluator fills it in via `EvalError::with_span`.
        Err(EvalError::TypeCheck {
            op,
            left_type: left.type_name(),
            right_type: right.map(Value::type_name).unwrap_or("absent"),
            span: Span::DUMMY,
        })
    }
}
