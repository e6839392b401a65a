//! The type checker: resolves generics, expands variadic argument
//! patterns, validates each node against its expected type, and produces a
//! fully typed tree or a list of diagnostics.

use crate::error::CompileError;
use crate::types::{
    match_type_error, resolve, CallExpr, ExprType, TypedExpr, TypenameMap,
};

/// Checks `node` against `expected`, returning a new tree in which every
/// type is concrete, or the list of diagnostics. The input is not mutated.
pub fn check(expected: &ExprType, node: &TypedExpr) -> Result<TypedExpr, Vec<CompileError>> {
    match node {
        TypedExpr::Literal(lit) => match match_type_error(expected, &lit.ty, None) {
            Some(error) => Err(vec![CompileError::new(lit.key.clone(), error)]),
            None => Ok(node.clone()),
        },
        TypedExpr::Call(call) => check_call(expected, call),
    }
}

fn check_call(expected: &ExprType, call: &CallExpr) -> Result<TypedExpr, Vec<CompileError>> {
    let (expected_result, expected_args) = match expected {
        ExprType::Lambda { result, args } => (result.as_ref(), args.as_slice()),
        other => {
            let scheme_args = match &call.ty {
                ExprType::Lambda { args, .. } => args.as_slice(),
                // The parser always attaches a lambda scheme.
                _ => &[],
            };
            (other, scheme_args)
        }
    };

    let mut errors: Vec<CompileError> = Vec::new();
    let mut typenames = TypenameMap::new();

    // The node's declared result must be assignable to the expected
    // result; this also seeds typename bindings flowing in from the
    // caller.
    if let Some(error) =
        match_type_error(expected_result, call.ty.result_type(), Some(&mut typenames))
    {
        errors.push(CompileError::new(call.key.clone(), error));
    }

    // Expand NArgs patterns against the actual argument list. Plain slots
    // match for typename binding only; their mismatches are reported by
    // the recursive check below, with the argument's own key.
    let mut expanded: Vec<ExprType> = Vec::new();
    let mut vi = 0usize;
    for slot in expected_args {
        match slot {
            ExprType::NArgs(tuple) => {
                let mut j = 0usize;
                let mut pending: Vec<ExprType> = Vec::new();
                let mut tentative = typenames.clone();
                while vi < call.args.len()
                    && match_type_error(
                        &tuple[j % tuple.len()],
                        call.args[vi].ty(),
                        Some(&mut tentative),
                    )
                    .is_none()
                {
                    pending.push(tuple[j % tuple.len()].clone());
                    vi += 1;
                    j += 1;
                    if j % tuple.len() == 0 {
                        // A full tuple was consumed: commit it along with
                        // its typename bindings.
                        expanded.append(&mut pending);
                        typenames = tentative.clone();
                    }
                }
                // Rewind a partially consumed tuple so a trailing fixed
                // slot can claim those arguments.
                vi -= j % tuple.len();
            }
            plain => {
                if vi < call.args.len() {
                    let _ = match_type_error(plain, call.args[vi].ty(), Some(&mut typenames));
                }
                expanded.push(plain.clone());
                vi += 1;
            }
        }
    }

    let result_ty = resolve(expected_result, &typenames);
    if expanded.len() != call.args.len() {
        errors.push(CompileError::new(
            call.key.clone(),
            format!(
                "Expected {} arguments, but found {} instead.",
                expanded.len(),
                call.args.len()
            ),
        ));
    } else if let ExprType::Typename(name) = &result_ty {
        // A typename in the result position must have been bound by one
        // of the arguments by now.
        let serialized = TypedExpr::Call(call.clone()).serialize();
        errors.push(CompileError::new(
            call.key.clone(),
            format!(
                "Could not resolve {}. This expression must be wrapped in a type conversion, e.g. [\"string\", {}].",
                name,
                serde_json::to_string(&serialized).unwrap_or_default()
            ),
        ));
    }

    // An already-invalid application would only cascade noise from its
    // arguments.
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut checked_args = Vec::with_capacity(call.args.len());
    let mut resolved_args = Vec::with_capacity(expanded.len());
    for (slot, arg) in expanded.iter().zip(call.args.iter()) {
        let resolved_slot = resolve(slot, &typenames);
        match check(&resolved_slot, arg) {
            Ok(checked) => checked_args.push(checked),
            Err(mut errs) => errors.append(&mut errs),
        }
        resolved_args.push(resolved_slot);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TypedExpr::Call(CallExpr {
        name: call.name.clone(),
        ty: ExprType::Lambda {
            result: Box::new(result_ty),
            args: resolved_args,
        },
        args: checked_args,
        key: call.key.clone(),
    }))
}
