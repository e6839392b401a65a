//! Comparison operators, generic over their operand type.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, typename, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::cmp::Ordering;
use std::sync::Arc;

fn comparison() -> ExprType {
    lambda(ExprType::Boolean, vec![typename("T"), typename("T")])
}

fn operands(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<(ExprValue, ExprValue), EvalError> {
    Ok((evaluate(&call.args[0], ctx)?, evaluate(&call.args[1], ctx)?))
}

// `==`/`!=` use value equality, never coercive equality: numbers compare
// numerically, colors componentwise, containers structurally.

fn eq_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(util::deep_equal(&left, &right)))
}

fn ne_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(!util::deep_equal(&left, &right)))
}

fn gt_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(util::compare(&left, &right) == Ordering::Greater))
}

fn ge_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(util::compare(&left, &right) != Ordering::Less))
}

fn lt_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(util::compare(&left, &right) == Ordering::Less))
}

fn le_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let (left, right) = operands(call, ctx)?;
    Ok(util::bool_value(util::compare(&left, &right) != Ordering::Greater))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new("==", comparison(), eq_eval)),
        Arc::new(OperatorDefinition::new("!=", comparison(), ne_eval)),
        Arc::new(OperatorDefinition::new(">", comparison(), gt_eval)),
        Arc::new(OperatorDefinition::new(">=", comparison(), ge_eval)),
        Arc::new(OperatorDefinition::new("<", comparison(), lt_eval)),
        Arc::new(OperatorDefinition::new("<=", comparison(), le_eval)),
    ]
}
