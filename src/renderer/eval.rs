//! Evaluation of `@if` conditions.
//!
//! Conditions are parsed with the closed grammar in `parser/condition.pest` and
//! walked here: nothing in a template can reach the host.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use crate::context::{Context, ValueNumber, ValueRender, ValueTruthy};
use crate::errors::{Error, Result};
use crate::parser::ast::{BinaryExpr, Expr, Operator};
use crate::parser::parse_condition;

/// Parses and evaluates `source` against `context`
pub fn eval_condition(source: &str, context: &Context) -> Result<bool> {
    let expr = parse_condition(source)?;
    Ok(eval_expression(&expr, context)?.is_truthy())
}

/// Evaluates an expression to a value
pub fn eval_expression<'a>(expr: &'a Expr, context: &'a Context) -> Result<Cow<'a, Value>> {
    let res = match *expr {
        Expr::Literal(ref value) => Cow::Borrowed(value),
        Expr::Variable(ref name) => match context.get(name) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(Value::Null),
        },
        Expr::Not(ref inner) => Cow::Owned(Value::Bool(!eval_expression(inner, context)?.is_truthy())),
        Expr::Binary(ref binary) => Cow::Owned(Value::Bool(eval_binary(binary, context)?)),
    };

    Ok(res)
}

fn eval_binary(binary: &BinaryExpr, context: &Context) -> Result<bool> {
    let lhs = eval_expression(&binary.lhs, context)?;

    // && and || don't evaluate their right side when the left one decides
    match binary.operator {
        Operator::Or if lhs.is_truthy() => return Ok(true),
        Operator::And if !lhs.is_truthy() => return Ok(false),
        _ => (),
    }
    let rhs = eval_expression(&binary.rhs, context)?;

    let res = match binary.operator {
        Operator::Or | Operator::And => rhs.is_truthy(),
        Operator::Eq => loose_eq(&lhs, &rhs),
        Operator::NotEq => !loose_eq(&lhs, &rhs),
        Operator::Identical => strict_eq(&lhs, &rhs),
        Operator::NotIdentical => !strict_eq(&lhs, &rhs),
        Operator::Lt => compare(&lhs, &rhs, binary.operator)? == Ordering::Less,
        Operator::Lte => compare(&lhs, &rhs, binary.operator)? != Ordering::Greater,
        Operator::Gt => compare(&lhs, &rhs, binary.operator)? == Ordering::Greater,
        Operator::Gte => compare(&lhs, &rhs, binary.operator)? != Ordering::Less,
    };

    Ok(res)
}

/// `==`: booleans compare by truthiness, null equals anything falsy,
/// numbers and numeric strings compare numerically, the rest as text
fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Bool(_), _) | (_, Value::Bool(_)) => lhs.is_truthy() == rhs.is_truthy(),
        (Value::Null, Value::Null) => true,
        (Value::Null, other) | (other, Value::Null) => !other.is_truthy(),
        _ => match (lhs.to_number(), rhs.to_number()) {
            (Some(a), Some(b)) => a == b,
            _ => lhs.render() == rhs.render(),
        },
    }
}

/// `===`: same kind and same value
fn strict_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => lhs == rhs,
    }
}

fn compare(lhs: &Value, rhs: &Value, operator: Operator) -> Result<Ordering> {
    let ordering = match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => match (lhs.to_number(), rhs.to_number()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => Some(a.cmp(b)),
        },
        _ => match (lhs.to_number(), rhs.to_number()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => {
                return Err(Error::expression(format!(
                    "`{}` cannot be used between `{}` and `{}`",
                    operator, lhs, rhs
                )))
            }
        },
    };

    ordering.ok_or_else(|| {
        Error::expression(format!("`{}` and `{}` cannot be ordered", lhs, rhs))
    })
}
