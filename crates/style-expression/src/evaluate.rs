//! The tree interpreter.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::types::TypedExpr;
use crate::value::ExprValue;

/// Evaluates a checked expression node against the evaluation context.
///
/// Operator callbacks receive their argument subtrees unevaluated and call
/// back into this function, so control operators realize only the branches
/// they need.
pub fn evaluate(node: &TypedExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    match node {
        TypedExpr::Literal(lit) => Ok(ExprValue::Json(lit.value.clone())),
        TypedExpr::Call(call) => {
            let def = ctx
                .operators
                .get(&call.name)
                .cloned()
                .ok_or_else(|| EvalError::new(format!("unknown operator {}", call.name)))?;
            (def.eval_fn)(call, ctx)
        }
    }
}
