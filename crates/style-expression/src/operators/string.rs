//! String operators.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, nargs, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

fn concat_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let mut out = String::new();
    for arg in &call.args {
        out.push_str(&util::concat_str(&evaluate(arg, ctx)?));
    }
    Ok(util::string_value(out))
}

fn upcase_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::string_value(util::str_coerce(&value).to_uppercase()))
}

fn downcase_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    let value = evaluate(&call.args[0], ctx)?;
    Ok(util::string_value(util::str_coerce(&value).to_lowercase()))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition::new(
            "concat",
            lambda(
                ExprType::String,
                vec![ExprType::Value, ExprType::Value, nargs(vec![ExprType::Value])],
            ),
            concat_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "upcase",
            lambda(ExprType::String, vec![ExprType::String]),
            upcase_eval,
        )),
        Arc::new(OperatorDefinition::new(
            "downcase",
            lambda(ExprType::String, vec![ExprType::String]),
            downcase_eval,
        )),
    ]
}
