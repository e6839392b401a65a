//! Interpolated curves.
//!
//! `["curve", interpolation, input, k0, v0, ..., kn, vn]` maps a numeric
//! input onto piecewise stops. The interpolation tokens `step`, `linear`
//! and `exponential` are `Interpolation`-typed nodes that never evaluate
//! on their own; `curve` inspects them structurally. Stop layout is
//! validated at compile time; stop outputs are realized lazily.

use crate::error::{CompileError, EvalError};
use crate::eval_ctx::{EvalCtx, Interpolation};
use crate::evaluate::evaluate;
use crate::types::{
    lambda, nargs, typename, CallExpr, ExprType, OperatorDefinition, TypedExpr,
};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

fn interpolation_of(node: &TypedExpr) -> Option<Interpolation> {
    let call = match node {
        TypedExpr::Call(call) => call,
        TypedExpr::Literal(_) => return None,
    };
    match call.name.as_str() {
        "step" => Some(Interpolation::Step),
        "linear" => Some(Interpolation::Exponential { base: 1.0 }),
        "exponential" => {
            let base = match call.args.first() {
                Some(TypedExpr::Literal(lit)) => lit.value.as_f64(),
                _ => None,
            }?;
            Some(Interpolation::Exponential { base })
        }
        _ => None,
    }
}

fn curve_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let interpolation = interpolation_of(&call.args[0])
        .ok_or_else(|| EvalError::new("Invalid interpolation type"))?;
    let input = util::num(&evaluate(&call.args[1], ctx)?);
    let mut stops: Vec<(f64, &TypedExpr)> = Vec::with_capacity((call.args.len() - 2) / 2);
    let mut i = 2;
    while i + 1 < call.args.len() {
        let key = match &call.args[i] {
            TypedExpr::Literal(lit) => lit.value.as_f64(),
            TypedExpr::Call(_) => None,
        }
        .ok_or_else(|| EvalError::new("Curve stop inputs must be literal numbers."))?;
        stops.push((key, &call.args[i + 1]));
        i += 2;
    }
    if stops.is_empty() {
        return Err(EvalError::new("Expected at least one stop."));
    }
    ctx.evaluate_curve(interpolation, input, &stops)
}

fn token_eval(call: &CallExpr, _ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Err(EvalError::new(format!(
        "\"{}\" may only appear as the first argument of \"curve\"",
        call.name
    )))
}

/// Compile-time validation of the curve's shape.
fn validate_curve(call: &CallExpr) -> Vec<CompileError> {
    let mut errors = Vec::new();

    match call.args.first() {
        Some(node @ TypedExpr::Call(token))
            if matches!(token.name.as_str(), "step" | "linear" | "exponential") =>
        {
            if token.name == "exponential" {
                match token.args.first() {
                    Some(TypedExpr::Literal(lit)) if lit.value.is_number() => {}
                    Some(other) => errors.push(CompileError::new(
                        other.key().to_string(),
                        "Exponential base must be a literal number.",
                    )),
                    None => errors.push(CompileError::new(
                        node.key().to_string(),
                        "Exponential base must be a literal number.",
                    )),
                }
            }
        }
        Some(other) => errors.push(CompileError::new(
            other.key().to_string(),
            "Invalid interpolation type",
        )),
        None => {}
    }

    // Stop inputs must be literal numbers, strictly ascending.
    let mut previous: Option<f64> = None;
    let mut i = 2;
    while i + 1 < call.args.len() {
        match &call.args[i] {
            TypedExpr::Literal(lit) if lit.value.is_number() => {
                let key = lit.value.as_f64().unwrap_or(f64::NAN);
                if let Some(prev) = previous {
                    if !(key > prev) {
                        errors.push(CompileError::new(
                            lit.key.clone(),
                            "Curve stop inputs must be in strictly ascending order.",
                        ));
                    }
                }
                previous = Some(key);
            }
            other => errors.push(CompileError::new(
                other.key().to_string(),
                "Curve stop inputs must be literal numbers.",
            )),
        }
        i += 2;
    }

    match call.ty.result_type() {
        ExprType::Number | ExprType::Color => {}
        other => errors.push(CompileError::new(
            call.key.clone(),
            format!(
                "Type {} is not interpolatable, \"curve\" can only produce Number or Color outputs.",
                other.name()
            ),
        )),
    }

    errors
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            validate: Some(validate_curve),
            ..OperatorDefinition::new(
                "curve",
                lambda(
                    typename("T"),
                    vec![
                        ExprType::Interpolation,
                        ExprType::Number,
                        ExprType::Number,
                        typename("T"),
                        nargs(vec![ExprType::Number, typename("T")]),
                    ],
                ),
                curve_eval,
            )
        }),
        Arc::new(OperatorDefinition::new(
            "step",
            lambda(ExprType::Interpolation, vec![]),
            token_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "linear",
            lambda(ExprType::Interpolation, vec![]),
            token_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "exponential",
            lambda(ExprType::Interpolation, vec![ExprType::Number]),
            token_eval,
        )),
    ]
}
