//! Lifts raw JSON into the expression tree.

use crate::error::CompileError;
use crate::types::{vector, CallExpr, ExprType, LiteralExpr, OperatorMap, TypedExpr};
use serde_json::Value;

/// JSON type word used in parse diagnostics.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The type a JSON value denotes when used as a literal.
fn literal_type(value: &Value) -> ExprType {
    match value {
        Value::Null => ExprType::Null,
        Value::Bool(_) => ExprType::Boolean,
        Value::Number(_) => ExprType::Number,
        Value::String(_) => ExprType::String,
        Value::Array(_) => vector(ExprType::Value),
        Value::Object(_) => ExprType::Object,
    }
}

/// Parses a raw JSON expression into an untyped tree. Each node receives a
/// dotted path key for diagnostics; operator schemes are attached with
/// their generics unresolved. No inference happens here.
pub fn parse_expression(expr: &Value, operators: &OperatorMap) -> Result<TypedExpr, CompileError> {
    parse_node(expr, String::new(), operators)
}

fn parse_node(
    expr: &Value,
    key: String,
    operators: &OperatorMap,
) -> Result<TypedExpr, CompileError> {
    match expr {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Ok(TypedExpr::Literal(LiteralExpr {
                value: expr.clone(),
                ty: literal_type(expr),
                key,
            }))
        }
        Value::Array(items) => {
            let head = match items.first() {
                Some(head) => head,
                None => {
                    return Err(CompileError::new(
                        key,
                        "expected an array with at least one element",
                    ))
                }
            };
            let name = match head {
                Value::String(s) => s.as_str(),
                other => {
                    return Err(CompileError::new(
                        key,
                        format!(
                            "expected a string operator name, but found {} instead.",
                            json_type_name(other)
                        ),
                    ))
                }
            };
            if name == "literal" {
                // `["literal", v]` quotes `v`: containers become
                // container-typed literal nodes instead of applications.
                if items.len() != 2 {
                    return Err(CompileError::new(key, "\"literal\" expects one argument"));
                }
                return Ok(TypedExpr::Literal(LiteralExpr {
                    value: items[1].clone(),
                    ty: literal_type(&items[1]),
                    key,
                }));
            }
            let def = operators
                .get(name)
                .ok_or_else(|| CompileError::new(key.clone(), format!("unknown function {name}")))?;
            let mut args = Vec::with_capacity(items.len() - 1);
            for (i, item) in items.iter().enumerate().skip(1) {
                args.push(parse_node(item, format!("{key}.{i}"), operators)?);
            }
            Ok(TypedExpr::Call(CallExpr {
                name: name.to_string(),
                ty: def.ty.clone(),
                args,
                key,
            }))
        }
        other => Err(CompileError::new(
            key,
            format!(
                "expected an array, but found {} instead.",
                json_type_name(other)
            ),
        )),
    }
}
