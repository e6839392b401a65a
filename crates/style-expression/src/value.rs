use serde_json::Value;
use style_color::Color;

/// A runtime value produced by evaluating an expression: any JSON value,
/// or a color (which has no JSON representation of its own).
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    /// Any JSON-compatible value.
    Json(Value),
    /// A normalized RGBA color.
    Color(Color),
}
