//! # lumen_reflect - Runtime Class Metadata
//!
//! Name-keyed introspection over live objects:
//! - **Object**: the trait every reflectable type implements
//! - **Descriptors**: per-member metadata (properties, methods, signals,
//!   slots) with type-erased accessors built from typed projections
//! - **ClassInfo / ClassBuilder**: explicit class registration, no static
//!   initialization side effects
//! - **ClassRegistry**: process-wide name → metadata table
//!
//! A caller holding nothing but a `&mut dyn Object` can read and write
//! properties, invoke methods and wire signals by name; every lookup miss is
//! an `Option::None`, never a panic.

pub mod class;
pub mod descriptor;
pub mod error;
pub mod object;
pub mod registry;

pub use class::{ClassBuilder, ClassInfo};
pub use descriptor::{
    BoundMethod, BoundProperty, MemberInfo, MethodDesc, PropertyDesc, SignalDesc, SlotDesc,
};
pub use error::{RegistryError, Result};
pub use object::Object;
pub use registry::{registry, ClassRegistry};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::class::{ClassBuilder, ClassInfo};
    pub use crate::descriptor::{MethodDesc, PropertyDesc, SignalDesc, SlotDesc};
    pub use crate::error::{RegistryError, Result};
    pub use crate::object::Object;
    pub use crate::registry::{registry, ClassRegistry};
    pub use lumen_core::prelude::*;
    pub use lumen_event::prelude::*;
}
