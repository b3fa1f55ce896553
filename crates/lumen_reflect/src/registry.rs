//! Process-wide class registry

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::class::ClassInfo;
use crate::descriptor::{MethodDesc, PropertyDesc, SignalDesc, SlotDesc};
use crate::error::{RegistryError, Result};
use crate::object::Object;

static GLOBAL: Lazy<ClassRegistry> = Lazy::new(ClassRegistry::new);

/// The process-wide registry
///
/// Convenience for the common case; embedders and tests can keep their own
/// `ClassRegistry` instances instead.
pub fn registry() -> &'static ClassRegistry {
    &GLOBAL
}

/// Name → class metadata table
///
/// Registered classes live until process exit. All methods take `&self`;
/// the table is internally locked.
pub struct ClassRegistry {
    classes: RwLock<HashMap<String, Arc<ClassInfo>>>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
        }
    }

    /// Register a class
    ///
    /// Duplicate names are an error, never a silent overwrite: colliding
    /// registrations across plugins are a bug worth surfacing.
    pub fn register(&self, info: ClassInfo) -> Result<Arc<ClassInfo>> {
        let mut classes = self.classes.write();
        if classes.contains_key(info.name()) {
            log::warn!("duplicate class registration: {}", info.name());
            return Err(RegistryError::DuplicateClass(info.name().into()));
        }
        let info = Arc::new(info);
        classes.insert(info.name().to_owned(), info.clone());
        Ok(info)
    }

    /// Look up a class by qualified name; `None` on miss
    pub fn lookup(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.classes.read().get(name).cloned()
    }

    /// Check whether a class is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classes.read().contains_key(name)
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Snapshot of all registered classes
    pub fn classes(&self) -> Vec<Arc<ClassInfo>> {
        self.classes.read().values().cloned().collect()
    }

    /// True if `class` is `ancestor` or transitively derives from it
    pub fn is_derived_from(&self, class: &str, ancestor: &str) -> bool {
        self.walk_chain(class, |info| (info.name() == ancestor).then_some(()))
            .is_some()
    }

    /// Construct an instance of a registered class by name
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Object>> {
        let info = self
            .lookup(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.into()))?;
        info.create()
            .ok_or_else(|| RegistryError::NotConstructible(name.into()))
    }

    /// Find a property on `class` or any class in its base chain
    pub fn find_property(&self, class: &str, name: &str) -> Option<Arc<PropertyDesc>> {
        self.walk_chain(class, |info| info.property(name).cloned())
    }

    /// Find a method on `class` or any class in its base chain
    pub fn find_method(&self, class: &str, name: &str) -> Option<Arc<MethodDesc>> {
        self.walk_chain(class, |info| info.method(name).cloned())
    }

    /// Find a signal on `class` or any class in its base chain
    pub fn find_signal(&self, class: &str, name: &str) -> Option<Arc<SignalDesc>> {
        self.walk_chain(class, |info| info.signal(name).cloned())
    }

    /// Find a slot on `class` or any class in its base chain
    pub fn find_slot(&self, class: &str, name: &str) -> Option<Arc<SlotDesc>> {
        self.walk_chain(class, |info| info.slot(name).cloned())
    }

    /// Apply `f` to each class in the base chain, root-most last, returning
    /// the first hit. Tolerates unregistered bases and cyclic base links.
    fn walk_chain<R>(&self, class: &str, f: impl Fn(&ClassInfo) -> Option<R>) -> Option<R> {
        let mut visited: Vec<String> = Vec::new();
        let mut current = class.to_owned();
        loop {
            let info = self.lookup(&current)?;
            if let Some(hit) = f(&info) {
                return Some(hit);
            }
            visited.push(current);
            let base = info.base()?;
            if visited.iter().any(|v| v == base) {
                log::warn!("cyclic base chain at class '{}'", base);
                return None;
            }
            current = base.to_owned();
        }
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassBuilder;

    #[test]
    fn test_lookup_miss_returns_none() {
        let registry = ClassRegistry::new();
        assert!(registry.lookup("Nonexistent").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.find_property("Nonexistent", "Speed").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_an_error() {
        let registry = ClassRegistry::new();
        registry.register(ClassBuilder::new("Dup").build()).unwrap();

        let err = registry
            .register(ClassBuilder::new("Dup").build())
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateClass(name) if name == "Dup"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_derivation_chain() {
        let registry = ClassRegistry::new();
        registry
            .register(ClassBuilder::new("Base").build())
            .unwrap();
        registry
            .register(ClassBuilder::new("Mid").base("Base").build())
            .unwrap();
        registry
            .register(ClassBuilder::new("Leaf").base("Mid").build())
            .unwrap();

        assert!(registry.is_derived_from("Leaf", "Base"));
        assert!(registry.is_derived_from("Leaf", "Leaf"));
        assert!(!registry.is_derived_from("Base", "Leaf"));
        assert!(!registry.is_derived_from("Leaf", "Nonexistent"));
    }

    #[test]
    fn test_cyclic_base_chain_terminates() {
        let registry = ClassRegistry::new();
        registry
            .register(ClassBuilder::new("A").base("B").build())
            .unwrap();
        registry
            .register(ClassBuilder::new("B").base("A").build())
            .unwrap();

        assert!(!registry.is_derived_from("A", "C"));
        assert!(registry.find_property("A", "anything").is_none());
    }

    #[test]
    fn test_instantiate_errors() {
        let registry = ClassRegistry::new();
        registry
            .register(ClassBuilder::new("NoCtor").build())
            .unwrap();

        assert!(matches!(
            registry.instantiate("Missing"),
            Err(RegistryError::UnknownClass(_))
        ));
        assert!(matches!(
            registry.instantiate("NoCtor"),
            Err(RegistryError::NotConstructible(_))
        ));
    }
}
