//! Type coercions and inspection.
//!
//! `string`/`number`/`boolean` force a `Value` into a primitive with the
//! usual JS coercion rules; `json_array`/`object` narrow a `Value` to a
//! container, raising an evaluation error on a mismatched shape.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, vector, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use serde_json::Value;
use std::sync::Arc;

fn string_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::string_value(util::str_coerce(&value)))
}

fn number_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::number_value(util::num(&value)))
}

fn boolean_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::bool_value(util::truthy(&value)))
}

fn typeof_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::string_value(ctx.type_of(&value).to_string()))
}

fn json_array_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(ExprValue::Json(Value::Array(ctx.as_array(&value)?)))
}

fn object_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(ExprValue::Json(Value::Object(ctx.as_object(&value)?)))
}

fn coercion(result: ExprType) -> ExprType {
    lambda(result, vec![ExprType::Value])
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new("string", coercion(ExprType::String), string_eval)),
        Arc::new(OperatorDefinition::new("number", coercion(ExprType::Number), number_eval)),
        Arc::new(OperatorDefinition::new("boolean", coercion(ExprType::Boolean), boolean_eval)),
        Arc::new(OperatorDefinition::new("typeof", coercion(ExprType::String), typeof_eval)),
        Arc::new(OperatorDefinition::new(
            "json_array",
            coercion(vector(ExprType::Value)),
            json_array_eval,
        )),
        Arc::new(OperatorDefinition::new("object", coercion(ExprType::Object), object_eval)),
    ]
}
