//! Callable signatures
//!
//! A `Signature` encodes the shape of a callable (return type plus ordered
//! parameter types). Structural equality is the sole compatibility key used
//! when wiring signals to slots and when matching dynamic call requests to
//! bound methods. The canonical string form (`"void(int,float)"`) exists for
//! the scripting boundary, where signatures travel as text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type tag for a single parameter or return slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Void,
    Bool,
    Int,
    Float,
    Str,
}

impl ValueType {
    /// Canonical name used in signature strings
    pub fn name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
        }
    }

    /// Parse a canonical name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "void" => Some(Self::Void),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "string" => Some(Self::Str),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a callable: return type plus ordered parameter types
///
/// Same declared shape always encodes to the same signature; two distinct
/// semantic types with the same shape are indistinguishable by design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Return type
    pub ret: ValueType,
    /// Parameter types, in declaration order
    pub params: Vec<ValueType>,
}

impl Signature {
    /// Create a signature from return and parameter types
    pub fn new(ret: ValueType, params: &[ValueType]) -> Self {
        Self {
            ret,
            params: params.to_vec(),
        }
    }

    /// Signature of a void callable with the given parameters
    pub fn action(params: &[ValueType]) -> Self {
        Self::new(ValueType::Void, params)
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parse the canonical string form, e.g. `"int(float,string)"`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let open = s.find('(')?;
        if !s.ends_with(')') {
            return None;
        }
        let ret = ValueType::parse(s[..open].trim())?;
        let inner = s[open + 1..s.len() - 1].trim();
        let params = if inner.is_empty() {
            Vec::new()
        } else {
            inner
                .split(',')
                .map(|p| ValueType::parse(p.trim()))
                .collect::<Option<Vec<_>>>()?
        };
        Some(Self { ret, params })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ret)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", p)?;
        }
        f.write_str(")")
    }
}

/// Error returned when a signature string fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSignatureError;

impl fmt::Display for ParseSignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("malformed signature string")
    }
}

impl std::error::Error for ParseSignatureError {}

impl FromStr for Signature {
    type Err = ParseSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ParseSignatureError)
    }
}
