//! Boolean operators. `&&` and `||` short-circuit: operands after the
//! deciding one are never evaluated.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, nargs, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

fn variadic_boolean() -> ExprType {
    lambda(
        ExprType::Boolean,
        vec![
            ExprType::Boolean,
            ExprType::Boolean,
            nargs(vec![ExprType::Boolean]),
        ],
    )
}

fn and_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    for arg in &call.args {
        if !util::truthy(&evaluate(arg, ctx)?) {
            return Ok(util::bool_value(false));
        }
    }
    Ok(util::bool_value(true))
}

fn or_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    for arg in &call.args {
        if util::truthy(&evaluate(arg, ctx)?) {
            return Ok(util::bool_value(true));
        }
    }
    Ok(util::bool_value(false))
}

fn not_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::bool_value(!util::truthy(&value)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new("&&", variadic_boolean(), and_eval)),
        Arc::new(OperatorDefinition::new("||", variadic_boolean(), or_eval)),
        Arc::new(OperatorDefinition::new(
            "!",
            lambda(ExprType::Boolean, vec![ExprType::Boolean]),
            not_eval,
        )),
    ]
}
