//! The runtime helpers referenced by operator callbacks.

use crate::error::EvalError;
use crate::evaluate::evaluate;
use crate::types::{OperatorMap, TypedExpr};
use crate::util;
use crate::value::ExprValue;
use serde_json::{Map, Value};
use std::sync::Arc;
use style_color::{lerp, Color};

/// How a curve maps its input onto the interval between two stops. The
/// `linear` token is exponential interpolation with base 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolation {
    Step,
    Exponential { base: f64 },
}

/// The execution context passed to every operator callback.
///
/// Borrows the two runtime inputs of the compiled callable and holds the
/// operator map used for recursive evaluation.
pub struct EvalCtx<'a> {
    pub map_properties: &'a Value,
    pub feature: &'a Value,
    pub operators: Arc<OperatorMap>,
}

impl<'a> EvalCtx<'a> {
    pub fn new(map_properties: &'a Value, feature: &'a Value, operators: Arc<OperatorMap>) -> Self {
        EvalCtx {
            map_properties,
            feature,
            operators,
        }
    }

    /// `feature.properties`, defaulting to an empty object.
    pub fn properties(&self) -> Value {
        match self.feature.get("properties") {
            Some(v @ Value::Object(_)) => v.clone(),
            _ => Value::Object(Map::new()),
        }
    }

    /// `feature.geometry.type`, or null when the feature has no geometry.
    pub fn geometry_type(&self) -> Value {
        self.feature
            .get("geometry")
            .and_then(|g| g.get("type"))
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// `feature.id`, or null.
    pub fn feature_id(&self) -> Value {
        self.feature.get("id").cloned().unwrap_or(Value::Null)
    }

    /// `mapProperties.zoom`, coerced to a number.
    pub fn zoom(&self) -> f64 {
        let zoom = self
            .map_properties
            .get("zoom")
            .cloned()
            .unwrap_or(Value::Null);
        util::num(&ExprValue::Json(zoom))
    }

    /// Narrows a value to an array, or raises an evaluation error.
    pub fn as_array(&self, value: &ExprValue) -> Result<Vec<Value>, EvalError> {
        match value {
            ExprValue::Json(Value::Array(items)) => Ok(items.clone()),
            other => Err(EvalError::new(format!(
                "Expected value to be of type Vector<Value>, but found {} instead.",
                self.type_of(other)
            ))),
        }
    }

    /// Narrows a value to an object, or raises an evaluation error.
    pub fn as_object(&self, value: &ExprValue) -> Result<Map<String, Value>, EvalError> {
        match value {
            ExprValue::Json(Value::Object(entries)) => Ok(entries.clone()),
            other => Err(EvalError::new(format!(
                "Expected value to be of type Object, but found {} instead.",
                self.type_of(other)
            ))),
        }
    }

    /// Property lookup. The object must be an actual object and the key
    /// must be present.
    pub fn get(&self, object: &ExprValue, key: &str) -> Result<ExprValue, EvalError> {
        let entries = self.as_object(object)?;
        match entries.get(key) {
            Some(v) => Ok(ExprValue::Json(v.clone())),
            None => {
                let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                Err(EvalError::new(format!(
                    "Property {} not found in object with keys: [{}]",
                    key,
                    keys.join(", ")
                )))
            }
        }
    }

    /// Key-ownership check.
    pub fn has(&self, object: &ExprValue, key: &str) -> Result<bool, EvalError> {
        Ok(self.as_object(object)?.contains_key(key))
    }

    /// The runtime type name, as reported by `typeof`.
    pub fn type_of(&self, value: &ExprValue) -> &'static str {
        match value {
            ExprValue::Color(_) => "Color",
            ExprValue::Json(v) => match v {
                Value::Null => "Null",
                Value::Bool(_) => "Boolean",
                Value::Number(_) => "Number",
                Value::String(_) => "String",
                Value::Array(_) => "Vector<Value>",
                Value::Object(_) => "Object",
            },
        }
    }

    /// Parses a CSS color string; unparseable input is an evaluation
    /// error.
    pub fn color(&self, input: &str) -> Result<ExprValue, EvalError> {
        style_color::parse(input)
            .map(ExprValue::Color)
            .map_err(|_| EvalError::new(format!("Could not parse color from value '{input}'")))
    }

    /// Builds a color from 0-255 channel values and a unit alpha. Always
    /// allocates a fresh quadruple; the caller's values are never aliased.
    pub fn rgba(&self, r: f64, g: f64, b: f64, a: f64) -> ExprValue {
        ExprValue::Color(Color::new(r / 255.0, g / 255.0, b / 255.0, a))
    }

    /// Evaluates an interpolated curve: clamps to the first and last
    /// stops, locates the bracketing stops by binary search, and realizes
    /// only the stop outputs it needs.
    pub fn evaluate_curve(
        &self,
        interpolation: Interpolation,
        input: f64,
        stops: &[(f64, &TypedExpr)],
    ) -> Result<ExprValue, EvalError> {
        if stops.is_empty() {
            return Err(EvalError::new("Expected at least one stop."));
        }
        let last = stops.len() - 1;
        if input <= stops[0].0 {
            return evaluate(stops[0].1, self);
        }
        if input >= stops[last].0 {
            return evaluate(stops[last].1, self);
        }
        let index = find_stop_less_than_or_equal(stops, input);
        match interpolation {
            Interpolation::Step => evaluate(stops[index].1, self),
            Interpolation::Exponential { base } => {
                let (lower_key, lower) = stops[index];
                let (upper_key, upper) = stops[index + 1];
                let t = interpolation_factor(base, input, lower_key, upper_key);
                let from = evaluate(lower, self)?;
                let to = evaluate(upper, self)?;
                interpolate(&from, &to, t)
            }
        }
    }
}

/// Binary search for the index of the largest stop key `<= input`. Exact
/// matches return that stop's index; inputs below the first key return 0.
fn find_stop_less_than_or_equal(stops: &[(f64, &TypedExpr)], input: f64) -> usize {
    let mut lower = 0usize;
    let mut upper = stops.len() - 1;
    while lower < upper {
        let mid = (lower + upper + 1) / 2;
        if stops[mid].0 <= input {
            lower = mid;
        } else {
            upper = mid - 1;
        }
    }
    lower
}

/// The normalized interpolation parameter for an input between two stop
/// keys. Base 1 degenerates to the linear ratio.
fn interpolation_factor(base: f64, input: f64, lower: f64, upper: f64) -> f64 {
    let difference = upper - lower;
    let progress = input - lower;
    if base == 1.0 {
        progress / difference
    } else {
        (base.powf(progress) - 1.0) / (base.powf(difference) - 1.0)
    }
}

fn interpolate(from: &ExprValue, to: &ExprValue, t: f64) -> Result<ExprValue, EvalError> {
    match (from, to) {
        (ExprValue::Color(a), ExprValue::Color(b)) => Ok(ExprValue::Color(a.lerp(b, t))),
        (a, b) => Ok(util::number_value(lerp(util::num(a), util::num(b), t))),
    }
}
