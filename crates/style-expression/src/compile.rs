//! The compile driver: parse, check, validate, and package a callable.

use crate::check::check;
use crate::error::{CompileError, EvalError};
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::operators::registry;
use crate::parse::parse_expression;
use crate::types::{ExprType, OperatorMap, TypedExpr};
use crate::value::ExprValue;
use serde_json::Value;
use std::sync::Arc;

/// A successfully compiled expression: the checked tree, its declared
/// result type, and the two constancy flags. Evaluation is pure apart
/// from reading the two runtime inputs; the same inputs always produce
/// the same output.
pub struct CompiledExpression {
    root: TypedExpr,
    operators: Arc<OperatorMap>,
    ty: ExprType,
    is_feature_constant: bool,
    is_zoom_constant: bool,
}

impl CompiledExpression {
    /// The expression's declared result type.
    pub fn ty(&self) -> &ExprType {
        &self.ty
    }

    /// True when no node of the expression reads the feature input.
    pub fn is_feature_constant(&self) -> bool {
        self.is_feature_constant
    }

    /// True when no node of the expression reads the map properties.
    pub fn is_zoom_constant(&self) -> bool {
        self.is_zoom_constant
    }

    /// Evaluates against a zoom context and a feature.
    ///
    /// `map_properties.zoom` carries the zoom level; `feature.properties`,
    /// `feature.geometry` and `feature.id` default to `{}`, `{}` and
    /// `null` when missing.
    pub fn evaluate(
        &self,
        map_properties: &Value,
        feature: &Value,
    ) -> Result<ExprValue, EvalError> {
        let ctx = EvalCtx::new(map_properties, feature, Arc::clone(&self.operators));
        evaluate(&self.root, &ctx)
    }

    /// Re-emits the checked tree as JSON. Compiling the result yields an
    /// equivalent expression.
    pub fn serialize(&self) -> Value {
        self.root.serialize()
    }
}

/// Compiles a raw JSON expression. All diagnostics are collected and
/// returned; nothing panics or throws past this boundary.
pub fn compile_expression(expr: &Value) -> Result<CompiledExpression, Vec<CompileError>> {
    let operators = registry();
    let parsed = parse_expression(expr, operators).map_err(|e| vec![e])?;
    let expected = parsed.ty().clone();
    let checked = check(&expected, &parsed)?;

    let mut errors = Vec::new();
    let (is_feature_constant, is_zoom_constant) = analyze(&checked, operators, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let ty = checked.result_type().clone();
    Ok(CompiledExpression {
        root: checked,
        operators: Arc::clone(operators),
        ty,
        is_feature_constant,
        is_zoom_constant,
    })
}

/// Computes the constancy flags (the AND of each node's children, further
/// ANDed with the operator's own input dependencies) and runs operator
/// validation hooks, keyed on the offending node.
fn analyze(
    node: &TypedExpr,
    operators: &OperatorMap,
    errors: &mut Vec<CompileError>,
) -> (bool, bool) {
    match node {
        TypedExpr::Literal(_) => (true, true),
        TypedExpr::Call(call) => {
            let mut feature_constant = true;
            let mut zoom_constant = true;
            for arg in &call.args {
                let (f, z) = analyze(arg, operators, errors);
                feature_constant &= f;
                zoom_constant &= z;
            }
            if let Some(def) = operators.get(&call.name) {
                if def.depends_on_feature {
                    feature_constant = false;
                }
                if def.depends_on_zoom {
                    zoom_constant = false;
                }
                if let Some(validate) = def.validate {
                    errors.extend(validate(call));
                }
            }
            (feature_constant, zoom_constant)
        }
    }
}
