//! The type algebra, the typed expression tree, and the registry types.

use crate::error::{CompileError, EvalError};
use crate::eval_ctx::EvalCtx;
use crate::value::ExprValue;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// The closed set of expression types.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprType {
    Null,
    Number,
    String,
    Boolean,
    Color,
    Object,
    /// The top type: any primitive except `Interpolation`, or a vector of
    /// values that are themselves assignable to `Value`.
    Value,
    /// The phantom type of the `step`/`linear`/`exponential` tokens; only
    /// `curve` consumes it.
    Interpolation,
    /// An ordered sequence of unconstrained length.
    Vector(Box<ExprType>),
    /// An ordered sequence of exactly `N` items.
    Array(Box<ExprType>, usize),
    /// Matches `Array<T, N>` for any `N`.
    AnyArray(Box<ExprType>),
    /// A union; assignable from the first member that matches.
    Variant(Vec<ExprType>),
    /// A generic placeholder, resolved during checking.
    Typename(String),
    /// A variadic argument pattern consuming repeating tuples of the inner
    /// types. Only valid inside a lambda's argument list.
    NArgs(Vec<ExprType>),
    /// An operator's type scheme.
    Lambda {
        result: Box<ExprType>,
        args: Vec<ExprType>,
    },
}

/// Typename bindings accumulated while checking a single application.
pub type TypenameMap = HashMap<String, ExprType>;

pub fn vector(item: ExprType) -> ExprType {
    ExprType::Vector(Box::new(item))
}

pub fn array(item: ExprType, len: usize) -> ExprType {
    ExprType::Array(Box::new(item), len)
}

pub fn any_array(item: ExprType) -> ExprType {
    ExprType::AnyArray(Box::new(item))
}

pub fn variant(members: Vec<ExprType>) -> ExprType {
    ExprType::Variant(members)
}

pub fn typename(name: &str) -> ExprType {
    ExprType::Typename(name.to_string())
}

pub fn nargs(types: Vec<ExprType>) -> ExprType {
    ExprType::NArgs(types)
}

pub fn lambda(result: ExprType, args: Vec<ExprType>) -> ExprType {
    ExprType::Lambda {
        result: Box::new(result),
        args,
    }
}

impl ExprType {
    /// The spelling used verbatim in diagnostics.
    pub fn name(&self) -> String {
        match self {
            ExprType::Null => "Null".to_string(),
            ExprType::Number => "Number".to_string(),
            ExprType::String => "String".to_string(),
            ExprType::Boolean => "Boolean".to_string(),
            ExprType::Color => "Color".to_string(),
            ExprType::Object => "Object".to_string(),
            ExprType::Value => "Value".to_string(),
            ExprType::Interpolation => "Interpolation".to_string(),
            ExprType::Vector(item) => format!("Vector<{}>", item.name()),
            ExprType::Array(item, len) => format!("Array<{}, {}>", item.name(), len),
            ExprType::AnyArray(item) => format!("Array<{}>", item.name()),
            ExprType::Variant(members) => {
                let names: Vec<String> = members.iter().map(ExprType::name).collect();
                format!("({})", names.join(" | "))
            }
            ExprType::Typename(name) => name.clone(),
            ExprType::NArgs(types) => {
                let names: Vec<String> = types.iter().map(ExprType::name).collect();
                format!("{}, ...", names.join(", "))
            }
            ExprType::Lambda { result, args } => {
                let names: Vec<String> = args.iter().map(ExprType::name).collect();
                format!("({}) => {}", names.join(", "), result.name())
            }
        }
    }

    /// True iff a `Typename` occurs anywhere within the type.
    pub fn is_generic(&self) -> bool {
        match self {
            ExprType::Typename(_) => true,
            ExprType::Vector(item) | ExprType::Array(item, _) | ExprType::AnyArray(item) => {
                item.is_generic()
            }
            ExprType::Variant(members) | ExprType::NArgs(members) => {
                members.iter().any(ExprType::is_generic)
            }
            ExprType::Lambda { result, args } => {
                result.is_generic() || args.iter().any(ExprType::is_generic)
            }
            _ => false,
        }
    }

    /// The result type if this is a lambda scheme, otherwise the type
    /// itself.
    pub fn result_type(&self) -> &ExprType {
        match self {
            ExprType::Lambda { result, .. } => result,
            other => other,
        }
    }
}

/// Recursively substitutes bound typenames into `ty`.
pub fn resolve(ty: &ExprType, typenames: &TypenameMap) -> ExprType {
    match ty {
        ExprType::Typename(name) => typenames.get(name).cloned().unwrap_or_else(|| ty.clone()),
        ExprType::Vector(item) => vector(resolve(item, typenames)),
        ExprType::Array(item, len) => array(resolve(item, typenames), *len),
        ExprType::AnyArray(item) => any_array(resolve(item, typenames)),
        ExprType::Variant(members) => {
            ExprType::Variant(members.iter().map(|m| resolve(m, typenames)).collect())
        }
        ExprType::NArgs(types) => {
            ExprType::NArgs(types.iter().map(|t| resolve(t, typenames)).collect())
        }
        ExprType::Lambda { result, args } => ExprType::Lambda {
            result: Box::new(resolve(result, typenames)),
            args: args.iter().map(|a| resolve(a, typenames)).collect(),
        },
        other => other.clone(),
    }
}

/// Returns `None` if `actual` is assignable to `expected`, otherwise the
/// diagnostic text. When a typename map is supplied, generic placeholders
/// on either side are bound as a side effect of matching.
pub fn match_type_error(
    expected: &ExprType,
    actual: &ExprType,
    mut typenames: Option<&mut TypenameMap>,
) -> Option<String> {
    // Operators are represented by their result type.
    let actual = actual.result_type();

    if let ExprType::Typename(name) = expected {
        if let Some(map) = typenames.as_deref_mut() {
            if !map.contains_key(name) && !actual.is_generic() {
                map.insert(name.clone(), actual.clone());
            }
            // The binding itself witnesses the match.
            return None;
        }
    }
    if let ExprType::Typename(name) = actual {
        if let Some(map) = typenames.as_deref_mut() {
            let bound = if let Some(b) = map.get(name) {
                Some(b.clone())
            } else if !expected.is_generic() {
                map.insert(name.clone(), expected.clone());
                Some(expected.clone())
            } else {
                None
            };
            if let Some(bound) = bound {
                return match_type_error(expected, &bound, typenames);
            }
        }
    }

    if expected == actual {
        return None;
    }

    let mismatch = Some(format!(
        "Expected {} but found {} instead.",
        expected.name(),
        actual.name()
    ));
    let nest = |inner: String| {
        Some(format!(
            "Expected {} but found {} instead. ({})",
            expected.name(),
            actual.name(),
            inner
        ))
    };

    match (expected, actual) {
        (ExprType::Value, ExprType::Null)
        | (ExprType::Value, ExprType::Number)
        | (ExprType::Value, ExprType::String)
        | (ExprType::Value, ExprType::Boolean)
        | (ExprType::Value, ExprType::Color)
        | (ExprType::Value, ExprType::Object) => None,
        (ExprType::Value, ExprType::Vector(item)) => {
            match_type_error(&ExprType::Value, item, typenames).and_then(nest)
        }
        (ExprType::Vector(expected_item), ExprType::Vector(actual_item)) => {
            match_type_error(expected_item, actual_item, typenames).and_then(nest)
        }
        (ExprType::Array(expected_item, expected_len), ExprType::Array(actual_item, actual_len)) => {
            if expected_len != actual_len {
                return mismatch;
            }
            match_type_error(expected_item, actual_item, typenames).and_then(nest)
        }
        (ExprType::AnyArray(expected_item), ExprType::Array(actual_item, _))
        | (ExprType::AnyArray(expected_item), ExprType::AnyArray(actual_item)) => {
            match_type_error(expected_item, actual_item, typenames).and_then(nest)
        }
        (ExprType::Variant(members), _) => {
            // Left-biased: the first member to match wins. Bindings made
            // while trying a member must not leak out of a failed attempt.
            match typenames {
                Some(map) => {
                    for member in members {
                        let mut speculative = map.clone();
                        if match_type_error(member, actual, Some(&mut speculative)).is_none() {
                            *map = speculative;
                            return None;
                        }
                    }
                    mismatch
                }
                None => {
                    for member in members {
                        if match_type_error(member, actual, None).is_none() {
                            return None;
                        }
                    }
                    mismatch
                }
            }
        }
        (_, ExprType::Variant(members)) => {
            // A variant actual is assignable only if every member is.
            for member in members {
                if match_type_error(expected, member, typenames.as_deref_mut()).is_some() {
                    return mismatch;
                }
            }
            None
        }
        _ => mismatch,
    }
}

/// A parsed (and, after checking, fully typed) expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedExpr {
    Literal(LiteralExpr),
    Call(CallExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Value,
    pub ty: ExprType,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    /// The operator's `Lambda` scheme; concrete after checking.
    pub ty: ExprType,
    pub args: Vec<TypedExpr>,
    pub key: String,
}

impl TypedExpr {
    pub fn ty(&self) -> &ExprType {
        match self {
            TypedExpr::Literal(lit) => &lit.ty,
            TypedExpr::Call(call) => &call.ty,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            TypedExpr::Literal(lit) => &lit.key,
            TypedExpr::Call(call) => &call.key,
        }
    }

    /// The value type this node produces (a call's lambda result).
    pub fn result_type(&self) -> &ExprType {
        self.ty().result_type()
    }

    /// Re-emits the node as JSON. Primitive literals serialize as plain
    /// values; container literals are wrapped in `["literal", ...]` so the
    /// output parses back to the same tree.
    pub fn serialize(&self) -> Value {
        match self {
            TypedExpr::Literal(lit) => match &lit.value {
                Value::Array(_) | Value::Object(_) => Value::Array(vec![
                    Value::String("literal".to_string()),
                    lit.value.clone(),
                ]),
                value => value.clone(),
            },
            TypedExpr::Call(call) => {
                let mut out = Vec::with_capacity(call.args.len() + 1);
                out.push(Value::String(call.name.clone()));
                out.extend(call.args.iter().map(TypedExpr::serialize));
                Value::Array(out)
            }
        }
    }
}

/// The type of an operator's evaluation callback.
///
/// The callback receives the checked call node with *unevaluated* argument
/// subtrees and recurses through [`crate::evaluate::evaluate`], which is
/// what gives `case`, `&&`, `||` and curve stops their lazy semantics.
pub type EvalFn = fn(&CallExpr, &EvalCtx<'_>) -> Result<ExprValue, EvalError>;

/// Optional compile-time validation hook, run by the compile driver on the
/// checked node. Used by `curve` to validate its stop layout.
pub type ValidateFn = fn(&CallExpr) -> Vec<CompileError>;

/// A registry entry: an operator's type scheme and behavior.
pub struct OperatorDefinition {
    pub name: &'static str,
    /// The operator's type scheme (always a `Lambda`).
    pub ty: ExprType,
    pub eval_fn: EvalFn,
    pub validate: Option<ValidateFn>,
    /// Set when evaluation reads the feature input.
    pub depends_on_feature: bool,
    /// Set when evaluation reads the map-properties input.
    pub depends_on_zoom: bool,
}

impl OperatorDefinition {
    pub fn new(name: &'static str, ty: ExprType, eval_fn: EvalFn) -> Self {
        OperatorDefinition {
            name,
            ty,
            eval_fn,
            validate: None,
            depends_on_feature: false,
            depends_on_zoom: false,
        }
    }
}

/// Map of operator name -> definition.
pub type OperatorMap = HashMap<String, Arc<OperatorDefinition>>;

/// Builds an `OperatorMap` from a list of operator definitions.
pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name.to_string(), Arc::clone(&op));
    }
    map
}
