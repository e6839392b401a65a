//! The operator registry: the closed set of built-in operators, grouped by
//! family.

pub mod arithmetic;
pub mod branching;
pub mod color;
pub mod comparison;
pub mod container;
pub mod curve;
pub mod input;
pub mod logical;
pub mod string;
pub mod type_ops;

use crate::types::{operators_to_map, OperatorDefinition, OperatorMap};
use std::sync::{Arc, OnceLock};

/// All operator definitions combined.
pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(arithmetic::operators());
    ops.extend(comparison::operators());
    ops.extend(logical::operators());
    ops.extend(string::operators());
    ops.extend(type_ops::operators());
    ops.extend(container::operators());
    ops.extend(input::operators());
    ops.extend(branching::operators());
    ops.extend(color::operators());
    ops.extend(curve::operators());
    ops
}

/// Builds a fresh operator map from all operators.
pub fn operators_map() -> OperatorMap {
    operators_to_map(all_operators())
}

/// The process-wide registry: built on first use, read-only thereafter.
pub fn registry() -> &'static Arc<OperatorMap> {
    static REGISTRY: OnceLock<Arc<OperatorMap>> = OnceLock::new();
    REGISTRY.get_or_init(|| Arc::new(operators_map()))
}
