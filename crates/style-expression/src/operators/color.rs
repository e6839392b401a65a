//! Color construction and deconstruction.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{array, lambda, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use serde_json::Value;
use std::sync::Arc;

fn color_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    ctx.color(&util::str_coerce(&value))
}

fn rgb_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let r = util::num(&evaluate(&call.args[0], ctx)?);
    let g = util::num(&evaluate(&call.args[1], ctx)?);
    let b = util::num(&evaluate(&call.args[2], ctx)?);
    Ok(ctx.rgba(r, g, b, 1.0))
}

fn rgba_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let r = util::num(&evaluate(&call.args[0], ctx)?);
    let g = util::num(&evaluate(&call.args[1], ctx)?);
    let b = util::num(&evaluate(&call.args[2], ctx)?);
    let a = util::num(&evaluate(&call.args[3], ctx)?);
    Ok(ctx.rgba(r, g, b, a))
}

fn color_to_array_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    match value {
        ExprValue::Color(c) => {
            let [r, g, b, a] = c.0;
            Ok(ExprValue::Json(Value::Array(vec![
                util::f64_to_json(r * 255.0),
                util::f64_to_json(g * 255.0),
                util::f64_to_json(b * 255.0),
                util::f64_to_json(a),
            ])))
        }
        other => Err(EvalError::new(format!(
            "Expected value to be of type Color, but found {} instead.",
            ctx.type_of(&other)
        ))),
    }
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new(
            "color",
            lambda(ExprType::Color, vec![ExprType::String]),
            color_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "rgb",
            lambda(
                ExprType::Color,
                vec![ExprType::Number, ExprType::Number, ExprType::Number],
            ),
            rgb_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "rgba",
            lambda(
                ExprType::Color,
                vec![
                    ExprType::Number,
                    ExprType::Number,
                    ExprType::Number,
                    ExprType::Number,
                ],
            ),
            rgba_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "color_to_array",
            lambda(array(ExprType::Number, 4), vec![ExprType::Color]),
            color_to_array_eval,
        )),
    ]
}
