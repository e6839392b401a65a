//! Arithmetic operators, the 1-ary math functions, and the numeric
//! constants.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, nargs, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

/// Scheme of the folding operators: at least two numbers, then any number
/// of further numbers.
fn variadic_number() -> ExprType {
    lambda(
        ExprType::Number,
        vec![
            ExprType::Number,
            ExprType::Number,
            nargs(vec![ExprType::Number]),
        ],
    )
}

fn unary_number() -> ExprType {
    lambda(ExprType::Number, vec![ExprType::Number])
}

fn fold(
    call: &CallExpr,
    ctx: &EvalCtx<'_>,
    op: fn(f64, f64) -> f64,
) -> Result<ExprValue, EvalError> {
    let first = util::num(&evaluate(&call.args[0], ctx)?);
    call.args[1..]
        .iter()
        .try_fold(first, |acc, arg| Ok(op(acc, util::num(&evaluate(arg, ctx)?))))
        .map(|n| util::number_value(util::finite(n)))
}

fn add_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    fold(call, ctx, |a, b| a + b)
}

fn subtract_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    fold(call, ctx, |a, b| a - b)
}

fn multiply_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    fold(call, ctx, |a, b| a * b)
}

fn divide_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let first = util::num(&evaluate(&call.args[0], ctx)?);
    call.args[1..]
        .iter()
        .try_fold(first, |acc, arg| {
            util::slash(acc, util::num(&evaluate(arg, ctx)?))
        })
        .map(util::number_value)
}

fn mod_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let first = util::num(&evaluate(&call.args[0], ctx)?);
    call.args[1..]
        .iter()
        .try_fold(first, |acc, arg| {
            util::modulo(acc, util::num(&evaluate(arg, ctx)?))
        })
        .map(util::number_value)
}

fn pow_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let base = util::num(&evaluate(&call.args[0], ctx)?);
    let exponent = util::num(&evaluate(&call.args[1], ctx)?);
    Ok(util::number_value(util::finite(base.powf(exponent))))
}

fn unary(
    call: &CallExpr,
    ctx: &EvalCtx<'_>,
    op: fn(f64) -> f64,
) -> Result<ExprValue, EvalError> {
    Ok(util::number_value(util::finite(op(util::num(&evaluate(
        &call.args[0],
        ctx,
    )?)))))
}

fn ln_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::ln)
}

fn log2_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::log2)
}

fn log10_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::log10)
}

fn sin_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::sin)
}

fn cos_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::cos)
}

fn tan_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::tan)
}

fn asin_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::asin)
}

fn acos_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::acos)
}

fn atan_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    unary(call, ctx, f64::atan)
}

fn ln2_eval(_call: &CallExpr, _ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(util::number_value(std::f64::consts::LN_2))
}

fn pi_eval(_call: &CallExpr, _ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(util::number_value(std::f64::consts::PI))
}

fn e_eval(_call: &CallExpr, _ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(util::number_value(std::f64::consts::E))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new("+", variadic_number(), add_eval)),
        Arc::new(OperatorDefinition::new("-", variadic_number(), subtract_eval)),
        Arc::new(OperatorDefinition::new("*", variadic_number(), multiply_eval)),
        Arc::new(OperatorDefinition::new("/", variadic_number(), divide_eval)),
        Arc::new(OperatorDefinition::new("%", variadic_number(), mod_eval)),
        Arc::new(OperatorDefinition::new(
            "^",
            lambda(ExprType::Number, vec![ExprType::Number, ExprType::Number]),
            pow_eval,
        )),
        Arc::new(OperatorDefinition::new("ln", unary_number(), ln_eval)),
        Arc::new(OperatorDefinition::new("log2", unary_number(), log2_eval)),
        Arc::new(OperatorDefinition::new("log10", unary_number(), log10_eval)),
        Arc::new(OperatorDefinition::new("sin", unary_number(), sin_eval)),
        Arc::new(OperatorDefinition::new("cos", unary_number(), cos_eval)),
        Arc::new(OperatorDefinition::new("tan", unary_number(), tan_eval)),
        Arc::new(OperatorDefinition::new("asin", unary_number(), asin_eval)),
        Arc::new(OperatorDefinition::new("acos", unary_number(), acos_eval)),
        Arc::new(OperatorDefinition::new("atan", unary_number(), atan_eval)),
        Arc::new(OperatorDefinition::new("ln2", lambda(ExprType::Number, vec![]), ln2_eval)),
        Arc::new(OperatorDefinition::new("pi", lambda(ExprType::Number, vec![]), pi_eval)),
        Arc::new(OperatorDefinition::new("e", lambda(ExprType::Number, vec![]), e_eval)),
    ]
}
