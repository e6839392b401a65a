//! Static behavior: parse failures, type checking, arity, curve shape
//! validation, constancy flags, and serialization.

use serde_json::{json, Value};
use style_expression::{compile_expression, CompileError, CompiledExpression, ExprType};

fn compile_ok(expr: &Value) -> CompiledExpression {
    compile_expression(expr).unwrap_or_else(|errs| panic!("compile({expr}) failed: {errs:?}"))
}

fn compile_err(expr: Value) -> Vec<CompileError> {
    compile_expression(&expr)
        .err()
        .unwrap_or_else(|| panic!("expected compile errors for {expr}"))
}

// ----------------------------------------------------------------- Parsing

#[test]
fn test_literal_expressions() {
    assert_eq!(compile_ok(&json!(1)).ty(), &ExprType::Number);
    assert_eq!(compile_ok(&json!("a")).ty(), &ExprType::String);
    assert_eq!(compile_ok(&json!(true)).ty(), &ExprType::Boolean);
    assert_eq!(compile_ok(&json!(null)).ty(), &ExprType::Null);
}

#[test]
fn test_unknown_function() {
    let errors = compile_err(json!(["ceil", 1.2]));
    assert_eq!(errors, vec![CompileError::new("", "unknown function ceil")]);
    let errors = compile_err(json!(["cubic-bezier", 0, 0, 1, 1]));
    assert_eq!(
        errors,
        vec![CompileError::new("", "unknown function cubic-bezier")]
    );
}

#[test]
fn test_unknown_function_in_argument() {
    let errors = compile_err(json!(["+", 1, ["bogus"]]));
    assert_eq!(errors, vec![CompileError::new(".2", "unknown function bogus")]);
}

#[test]
fn test_non_array_expression() {
    let errors = compile_err(json!({"not": "an expression"}));
    assert_eq!(
        errors,
        vec![CompileError::new("", "expected an array, but found object instead.")]
    );
}

// ----------------------------------------------------------------- Type checking

#[test]
fn test_add_type() {
    let compiled = compile_ok(&json!(["+", 1, 2, 3]));
    assert_eq!(compiled.ty(), &ExprType::Number);
    assert!(compiled.is_feature_constant());
    assert!(compiled.is_zoom_constant());
}

#[test]
fn test_argument_type_mismatch() {
    let errors = compile_err(json!(["+", 1, "two"]));
    assert_eq!(
        errors,
        vec![CompileError::new(".2", "Expected Number but found String instead.")]
    );
}

#[test]
fn test_nested_argument_type_mismatch() {
    let errors = compile_err(json!(["+", 1, ["concat", "a", "b"]]));
    assert_eq!(
        errors,
        vec![CompileError::new(".2", "Expected Number but found String instead.")]
    );
}

#[test]
fn test_arity_mismatch() {
    let errors = compile_err(json!(["+", 1]));
    assert_eq!(
        errors,
        vec![CompileError::new("", "Expected 2 arguments, but found 1 instead.")]
    );
    let errors = compile_err(json!(["!", true, false]));
    assert_eq!(
        errors,
        vec![CompileError::new("", "Expected 1 arguments, but found 2 instead.")]
    );
}

#[test]
fn test_case_infers_output_type() {
    let compiled = compile_ok(&json!(["case", true, "a", "b"]));
    assert_eq!(compiled.ty(), &ExprType::String);
}

#[test]
fn test_case_mismatched_outputs() {
    let errors = compile_err(json!(["case", true, "a", 1]));
    assert_eq!(
        errors,
        vec![CompileError::new(".3", "Expected String but found Number instead.")]
    );
}

#[test]
fn test_comparison_binds_operand_type() {
    assert_eq!(compile_ok(&json!(["==", 1, 2])).ty(), &ExprType::Boolean);
    let errors = compile_err(json!(["==", 1, "one"]));
    assert_eq!(
        errors,
        vec![CompileError::new(".2", "Expected Number but found String instead.")]
    );
}

#[test]
fn test_unresolved_result_typename() {
    // `at` over a bare Value container cannot bind its item type.
    let errors = compile_err(json!(["at", ["get", ["properties"], "arr"], 0]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, "");
    assert!(
        errors[0].error.starts_with("Could not resolve T."),
        "got: {}",
        errors[0].error
    );
    // Coercing the container resolves the item type to Value.
    let compiled = compile_ok(&json!(["at", ["json_array", ["get", ["properties"], "arr"]], 0]));
    assert_eq!(compiled.ty(), &ExprType::Value);
}

#[test]
fn test_value_is_top_type() {
    // Null, numbers, strings, booleans and vectors all flow into Value
    // slots; `typeof` observes the runtime type.
    compile_ok(&json!(["typeof", null]));
    compile_ok(&json!(["typeof", ["literal", [1, "a"]]]));
    compile_ok(&json!(["string", ["get", ["properties"], "x"]]));
}

#[test]
fn test_value_does_not_narrow_implicitly() {
    // A Value cannot be used where a Number is required without a
    // conversion.
    let errors = compile_err(json!(["+", 1, ["get", ["properties"], "x"]]));
    assert_eq!(
        errors,
        vec![CompileError::new(".2", "Expected Number but found Value instead.")]
    );
    compile_ok(&json!(["+", 1, ["number", ["get", ["properties"], "x"]]]));
}

// ----------------------------------------------------------------- Curve shape

#[test]
fn test_curve_output_types() {
    let compiled = compile_ok(&json!(["curve", ["linear"], ["zoom"], 0, 0, 10, 100]));
    assert_eq!(compiled.ty(), &ExprType::Number);
    let compiled = compile_ok(&json!([
        "curve", ["linear"], ["zoom"], 0, ["rgb", 0, 0, 0], 10, ["rgb", 255, 255, 255]
    ]));
    assert_eq!(compiled.ty(), &ExprType::Color);
}

#[test]
fn test_curve_rejects_non_interpolatable_output() {
    let errors = compile_err(json!(["curve", ["step"], ["zoom"], 0, "a", 10, "b"]));
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].error.starts_with("Type String is not interpolatable"),
        "got: {}",
        errors[0].error
    );
}

#[test]
fn test_curve_rejects_descending_stops() {
    let errors = compile_err(json!(["curve", ["linear"], ["zoom"], 10, 1, 5, 2]));
    assert_eq!(
        errors,
        vec![CompileError::new(
            ".5",
            "Curve stop inputs must be in strictly ascending order."
        )]
    );
    let errors = compile_err(json!(["curve", ["linear"], ["zoom"], 0, 1, 0, 2]));
    assert_eq!(
        errors,
        vec![CompileError::new(
            ".5",
            "Curve stop inputs must be in strictly ascending order."
        )]
    );
}

#[test]
fn test_curve_rejects_computed_stop_inputs() {
    let errors = compile_err(json!(["curve", ["linear"], ["zoom"], ["+", 1, 2], 1, 10, 2]));
    assert_eq!(
        errors,
        vec![CompileError::new(".3", "Curve stop inputs must be literal numbers.")]
    );
}

#[test]
fn test_curve_rejects_computed_exponential_base() {
    let errors = compile_err(json!([
        "curve", ["exponential", ["+", 1, 1]], ["zoom"], 0, 0, 10, 100
    ]));
    assert_eq!(
        errors,
        vec![CompileError::new(".1.1", "Exponential base must be a literal number.")]
    );
}

#[test]
fn test_curve_rejects_non_interpolation_first_argument() {
    let errors = compile_err(json!(["curve", 5, ["zoom"], 0, 0]));
    assert_eq!(
        errors,
        vec![CompileError::new(".1", "Expected Interpolation but found Number instead.")]
    );
}

#[test]
fn test_curve_requires_stops() {
    let errors = compile_err(json!(["curve", ["linear"], ["zoom"]]));
    assert_eq!(
        errors,
        vec![CompileError::new("", "Expected 4 arguments, but found 2 instead.")]
    );
}

// ----------------------------------------------------------------- Constancy flags

#[test]
fn test_feature_constancy() {
    assert!(compile_ok(&json!(["+", 1, 2])).is_feature_constant());
    assert!(!compile_ok(&json!(["get", ["properties"], "x"])).is_feature_constant());
    assert!(!compile_ok(&json!(["geometry_type"])).is_feature_constant());
    assert!(!compile_ok(&json!(["string", ["id"]])).is_feature_constant());
    assert!(compile_ok(&json!(["get", ["properties"], "x"])).is_zoom_constant());
}

#[test]
fn test_zoom_constancy() {
    assert!(compile_ok(&json!(["+", 1, 2])).is_zoom_constant());
    let curve = compile_ok(&json!(["curve", ["linear"], ["zoom"], 0, 0, 10, 100]));
    assert!(!curve.is_zoom_constant());
    assert!(curve.is_feature_constant());
}

#[test]
fn test_case_scenario_flags() {
    let compiled = compile_ok(&json!(["case", ["==", ["get", ["properties"], "x"], 1], "a", "b"]));
    assert!(!compiled.is_feature_constant());
    assert!(compiled.is_zoom_constant());
}

// ----------------------------------------------------------------- Serialization

fn roundtrip(expr: Value) {
    let compiled = compile_ok(&expr);
    let serialized = compiled.serialize();
    let recompiled = compile_ok(&serialized);
    assert_eq!(
        serialized,
        recompiled.serialize(),
        "serialization not idempotent for {expr}"
    );
    assert_eq!(compiled.ty(), recompiled.ty());
    assert_eq!(compiled.is_feature_constant(), recompiled.is_feature_constant());
    assert_eq!(compiled.is_zoom_constant(), recompiled.is_zoom_constant());
}

#[test]
fn test_serialize_roundtrip() {
    roundtrip(json!(["+", 1, 2, 3]));
    roundtrip(json!(["case", [">", ["number", ["get", ["properties"], "x"]], 3], "big", "small"]));
    roundtrip(json!(["curve", ["exponential", 2], ["zoom"], 0, 0, 10, 100]));
    roundtrip(json!(["at", ["literal", [1, 2, 3]], 1]));
    roundtrip(json!(["concat", "a", null, 3]));
}

#[test]
fn test_serialize_quotes_container_literals() {
    let compiled = compile_ok(&json!(["length", ["literal", [1, 2, 3]]]));
    assert_eq!(compiled.serialize(), json!(["length", ["literal", [1, 2, 3]]]));
}
