//! Operators that read the runtime inputs. These are the only operators
//! that clear the feature/zoom constancy flags.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::types::{lambda, CallExpr, ExprType, OperatorDefinition};
use crate::util;
use crate::value::ExprValue;
use std::sync::Arc;

fn zoom_eval(_call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(util::number_value(ctx.zoom()))
}

fn properties_eval(_call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(ExprValue::Json(ctx.properties()))
}

fn geometry_type_eval(_call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(ExprValue::Json(ctx.geometry_type()))
}

fn id_eval(_call: &CallExpr, ctx: &EvalCtx<'_>) -> Result<ExprValue, EvalError> {
    Ok(ExprValue::Json(ctx.feature_id()))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            depends_on_zoom: true,
            ..OperatorDefinition::new("zoom", lambda(ExprType::Number, vec![]), zoom_eval)
        }),
        Arc::new(OperatorDefinition {
            depends_on_feature: true,
            ..OperatorDefinition::new(
                "properties",
                lambda(ExprType::Object, vec![]),
                properties_eval,
            )
        }),
        Arc::new(OperatorDefinition {
            depends_on_feature: true,
            ..OperatorDefinition::new(
                "geometry_type",
                lambda(ExprType::String, vec![]),
                geometry_type_eval,
            )
        }),
        Arc::new(OperatorDefinition {
            depends_on_feature: true,
            ..OperatorDefinition::new("id", lambda(ExprType::Value, vec![]), id_eval)
        }),
    ]
}
