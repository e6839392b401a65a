//! Branching operators. `case` evaluates conditions in order and realizes
//! only the output paired with the first true one.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::types::{lambda, nargs, typename, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

fn case_eval(call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    // (condition, output) pairs with a trailing fallback output.
    let mut i = 0;
    while i + 1 < call.args.len() {
        if util::truthy(&evaluate(&call.args[i], ctx)?) {
            return evaluate(&call.args[i + 1], ctx);
        }
        i += 2;
    }
    match call.args.last() {
        Some(fallback) => evaluate(fallback, ctx),
        None => Err(EvalError::new("\"case\" requires a fallback output")),
    }
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![Arc::new(OperatorDefinition::new(
        "case",
        lambda(
            typename("T"),
            vec![
                ExprType::Boolean,
                typename("T"),
                nargs(vec![ExprType::Boolean, typename("T")]),
                typename("T"),
            ],
        ),
        case_eval,
    ))]
}
