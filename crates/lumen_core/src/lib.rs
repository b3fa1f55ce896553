//! # lumen_core - Lumen Reflection Core Primitives
//!
//! Foundational types shared by every reflection crate:
//! - **Value**: tagged-variant parameter bag for dynamic calls
//! - **ReflectValue**: compile-time bridge between Rust types and `Value`
//! - **Signature**: canonical encoding of a callable's shape, the
//!   compatibility key for dynamic dispatch and signal wiring

pub mod signature;
pub mod value;

pub use signature::*;
pub use value::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::signature::{Signature, ValueType};
    pub use crate::value::{ReflectValue, Value};
}
