use thiserror::Error;

/// A compile-time diagnostic, keyed by the dotted path of the node that
/// produced it. The root node's key is the empty string; the second
/// argument of the root operator has key `".2"`, and so on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{key}: {error}")]
pub struct CompileError {
    pub key: String,
    pub error: String,
}

impl CompileError {
    pub fn new(key: impl Into<String>, error: impl Into<String>) -> Self {
        CompileError {
            key: key.into(),
            error: error.into(),
        }
    }
}

/// A runtime evaluation failure.
///
/// Raised by `get` on a null object or missing key, by `at` on an
/// out-of-range index, by the array/object coercions on a mismatched
/// shape, by `color` on an unparseable string, and by division or modulo
/// by zero. The callable makes no attempt to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ExpressionEvaluationError: {message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
        }
    }
}
