#![forbid(unsafe_code)]

//! Lexed command arguments with an eagerly inferred primitive kind

use std::fmt;

/// Primitive kind of an argument, inferred once at tokenization time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    String,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgumentKind::String => "string",
            ArgumentKind::Int => "int",
            ArgumentKind::Float => "float",
            ArgumentKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Typed value carried by an argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    String,
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ArgumentValue {
    /// Infer a value from raw text
    ///
    /// Priority order: Int, then Float, then Bool, falling back to String.
    pub fn infer(raw: &str) -> Self {
        if let Some(value) = parse_int(raw) {
            return ArgumentValue::Int(value);
        }
        if let Some(value) = parse_float(raw) {
            return ArgumentValue::Float(value);
        }
        if raw.eq_ignore_ascii_case("true") {
            return ArgumentValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return ArgumentValue::Bool(false);
        }
        ArgumentValue::String
    }

    pub fn kind(&self) -> ArgumentKind {
        match self {
            ArgumentValue::String => ArgumentKind::String,
            ArgumentValue::Int(_) => ArgumentKind::Int,
            ArgumentValue::Float(_) => ArgumentKind::Float,
            ArgumentValue::Bool(_) => ArgumentKind::Bool,
        }
    }
}

/// Base-10 integer with an optional leading `-` that fits in an i64
fn parse_int(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    // Keeps words like "inf" and "NaN" out of the numeric kinds
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// One lexed argument: its raw text and the value inferred from it
///
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentToken {
    raw: String,
    value: ArgumentValue,
}

impl ArgumentToken {
    /// Creates a token, inferring its kind from the raw text
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = ArgumentValue::infer(&raw);
        ArgumentToken { raw, value }
    }

    /// The raw text exactly as lexed (quotes and escapes already resolved)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    pub fn kind(&self) -> ArgumentKind {
        self.value.kind()
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            ArgumentValue::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Float value of the token; Int tokens widen to Float
    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            ArgumentValue::Float(value) => Some(value),
            ArgumentValue::Int(value) => Some(value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            ArgumentValue::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
