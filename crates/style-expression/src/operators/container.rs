//! Property access and container operators.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{
    any_array, lambda, typename, variant, vector, CallExpr, ExprType, OperatorDefinition,
};
use crate::util;
use crate::value::ExprValue;
use serde_json::Value;
use std::sync::Arc;

fn get_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let object = evaluate(&call.args[0], ctx)?;
    let key = util::str_coerce(&evaluate(&call.args[1], ctx)?);
    ctx.get(&object, &key)
}

fn has_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let object = evaluate(&call.args[0], ctx)?;
    let key = util::str_coerce(&evaluate(&call.args[1], ctx)?);
    Ok(util::bool_value(ctx.has(&object, &key)?))
}

fn at_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let container = evaluate(&call.args[0], ctx)?;
    let items = ctx.as_array(&container)?;
    let index = util::num(&evaluate(&call.args[1], ctx)?);
    // The element type may be concrete, so a missing element cannot fall
    // back to null.
    if index < 0.0 || index as usize >= items.len() {
        return Err(EvalError::new(format!(
            "Array index {} out of bounds for array of length {}",
            index,
            items.len()
        )));
    }
    Ok(ExprValue::Json(items[index as usize].clone()))
}

fn length_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    let n = match &value {
        ExprValue::Json(Value::String(s)) => s.chars().count(),
        ExprValue::Json(Value::Array(items)) => items.len(),
        _ => 0,
    };
    Ok(util::number_value(n as f64))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new(
            "get",
            lambda(ExprType::Value, vec![ExprType::Object, ExprType::String]),
            get_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "has",
            lambda(ExprType::Boolean, vec![ExprType::Object, ExprType::String]),
            has_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "at",
            lambda(
                typename("T"),
                vec![
                    variant(vec![vector(typename("T")), any_array(typename("T"))]),
                    ExprType::Number,
                ],
            ),
            at_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "length",
            lambda(
                ExprType::Number,
                vec![variant(vec![vector(ExprType::Value), ExprType::String])],
            ),
            length_eval,
        )),
    ]
}
