//! Runtime values for dynamic dispatch
//!
//! Defines the parameter bag passed across the reflection boundary: every
//! dynamic call, property access and signal emission moves `Value`s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signature::ValueType;

/// A dynamically typed value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Unit/void value
    Unit,
    /// Boolean
    Bool(bool),
    /// Integer (64-bit signed)
    Int(i64),
    /// Float (64-bit)
    Float(f64),
    /// String
    Str(String),
}

impl Value {
    /// Get the type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Unit => ValueType::Void,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::Str,
        }
    }

    /// Check if this is the unit value
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Get as bool, coercing numbers (non-zero is true)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            Self::Float(f) => Some(*f != 0.0),
            Self::Str(s) => s.parse().ok(),
            Self::Unit => None,
        }
    }

    /// Get as integer, coercing floats and bools
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) => Some(*f as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Str(s) => s.parse().ok(),
            Self::Unit => None,
        }
    }

    /// Get as float, coercing integers and bools
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Str(s) => s.parse().ok(),
            Self::Unit => None,
        }
    }

    /// Get as string slice (strings only, no coercion)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Render for return-value marshaling; `Unit` renders empty
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Unit => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => (a - b).abs() < f64::EPSILON,
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

/// Bridge between concrete Rust types and the dynamic value model
///
/// Implemented for every type that can cross the reflection boundary.
/// Generated adapters (typed methods, properties, slots) use this to build
/// their marshaling code and signatures at compile time.
pub trait ReflectValue: Sized + 'static {
    /// Type tag used in signatures
    fn value_type() -> ValueType;

    /// Convert into a dynamic value
    fn into_value(self) -> Value;

    /// Convert from a dynamic value; `None` if not convertible
    fn from_value(value: &Value) -> Option<Self>;
}

impl ReflectValue for () {
    fn value_type() -> ValueType {
        ValueType::Void
    }

    fn into_value(self) -> Value {
        Value::Unit
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.is_unit().then_some(())
    }
}

impl ReflectValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ReflectValue for i32 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int().and_then(|n| i32::try_from(n).ok())
    }
}

impl ReflectValue for i64 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl ReflectValue for f32 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float().map(|f| f as f32)
    }
}

impl ReflectValue for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl ReflectValue for String {
    fn value_type() -> ValueType {
        ValueType::Str
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}
