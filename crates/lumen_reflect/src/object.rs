//! The Object trait and dynamic access helpers

use std::any::Any;
use std::sync::Arc;

use lumen_core::Value;
use lumen_event::{Signal, Slot};

use crate::class::ClassInfo;
use crate::registry::registry;

/// Base trait for every reflectable type
///
/// `class_name` must return the qualified name the type was registered
/// under; the any-casts give descriptors their way back to the concrete type.
pub trait Object: Any {
    /// Qualified class name, e.g. `"Engine.Config"`
    fn class_name(&self) -> &str;

    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Object {
    /// Downcast to a concrete type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcast to a mutable concrete type
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Check the concrete type
    pub fn is<T: 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Metadata for this object's class, if registered
    pub fn class(&self) -> Option<Arc<ClassInfo>> {
        registry().lookup(self.class_name())
    }

    /// Read a property by name, resolving through the class chain
    pub fn get(&self, name: &str) -> Option<Value> {
        let desc = registry().find_property(self.class_name(), name)?;
        desc.get_value(self)
    }

    /// Write a property by name; false on unknown name, read-only property
    /// or inconvertible value
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        let Some(desc) = registry().find_property(self.class_name(), name) else {
            return false;
        };
        desc.set_value(self, value)
    }

    /// Invoke a method by name; `None` if the method is unknown or the
    /// arguments do not fit (no call is performed in that case)
    pub fn call(&mut self, name: &str, args: &[Value]) -> Option<Value> {
        let desc = registry().find_method(self.class_name(), name)?;
        desc.invoke(self, args)
    }

    /// Access a declared signal by name
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        let desc = registry().find_signal(self.class_name(), name)?;
        desc.project(self)
    }

    /// Access a declared slot by name
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        let desc = registry().find_slot(self.class_name(), name)?;
        desc.project(self)
    }
}
