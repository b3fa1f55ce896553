//! Class metadata and the registration builder

use std::fmt;
use std::sync::Arc;

use crate::descriptor::{MethodDesc, PropertyDesc, SignalDesc, SlotDesc};
use crate::error::Result;
use crate::object::Object;
use crate::registry::ClassRegistry;

type Factory = Box<dyn Fn() -> Box<dyn Object> + Send + Sync>;

/// Metadata for one registered class
///
/// Created once through `ClassBuilder`, then owned by the registry for the
/// process lifetime. The base class is a single logical name: reflection
/// sees one inheritance chain regardless of how the concrete Rust type is
/// composed.
pub struct ClassInfo {
    name: String,
    module: String,
    base: Option<String>,
    description: String,
    properties: Vec<Arc<PropertyDesc>>,
    methods: Vec<Arc<MethodDesc>>,
    signals: Vec<Arc<SignalDesc>>,
    slots: Vec<Arc<SlotDesc>>,
    factory: Option<Factory>,
}

impl ClassInfo {
    /// Qualified class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module/namespace tag
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Logical base class name, if any
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Free-text description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared properties, in registration order
    pub fn properties(&self) -> &[Arc<PropertyDesc>] {
        &self.properties
    }

    /// Declared methods, in registration order
    pub fn methods(&self) -> &[Arc<MethodDesc>] {
        &self.methods
    }

    /// Declared signals, in registration order
    pub fn signals(&self) -> &[Arc<SignalDesc>] {
        &self.signals
    }

    /// Declared slots, in registration order
    pub fn slots(&self) -> &[Arc<SlotDesc>] {
        &self.slots
    }

    /// Find a property declared on this class (base chain not consulted)
    pub fn property(&self, name: &str) -> Option<&Arc<PropertyDesc>> {
        self.properties.iter().find(|d| d.name() == name)
    }

    /// Find a method declared on this class
    pub fn method(&self, name: &str) -> Option<&Arc<MethodDesc>> {
        self.methods.iter().find(|d| d.name() == name)
    }

    /// Find a signal declared on this class
    pub fn signal(&self, name: &str) -> Option<&Arc<SignalDesc>> {
        self.signals.iter().find(|d| d.name() == name)
    }

    /// Find a slot declared on this class
    pub fn slot(&self, name: &str) -> Option<&Arc<SlotDesc>> {
        self.slots.iter().find(|d| d.name() == name)
    }

    /// True if a default constructor was registered
    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// Construct a fresh instance, if a factory was registered
    pub fn create(&self) -> Option<Box<dyn Object>> {
        self.factory.as_ref().map(|f| f())
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("base", &self.base)
            .field("properties", &self.properties.len())
            .field("methods", &self.methods.len())
            .field("signals", &self.signals.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Fluent builder for class registration
///
/// Registration is an explicit call made during an initialization phase;
/// there are no static registration side effects to order.
pub struct ClassBuilder {
    info: ClassInfo,
}

impl ClassBuilder {
    /// Start describing a class
    pub fn new(name: &str) -> Self {
        Self {
            info: ClassInfo {
                name: name.into(),
                module: String::new(),
                base: None,
                description: String::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                signals: Vec::new(),
                slots: Vec::new(),
                factory: None,
            },
        }
    }

    /// Set the module/namespace tag
    pub fn module(mut self, module: &str) -> Self {
        self.info.module = module.into();
        self
    }

    /// Set the logical base class
    pub fn base(mut self, base: &str) -> Self {
        self.info.base = Some(base.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: &str) -> Self {
        self.info.description = description.into();
        self
    }

    /// Declare a property
    pub fn property(mut self, desc: PropertyDesc) -> Self {
        self.info.properties.push(Arc::new(desc));
        self
    }

    /// Declare a method
    pub fn method(mut self, desc: MethodDesc) -> Self {
        self.info.methods.push(Arc::new(desc));
        self
    }

    /// Declare a signal
    pub fn signal(mut self, desc: SignalDesc) -> Self {
        self.info.signals.push(Arc::new(desc));
        self
    }

    /// Declare a slot
    pub fn slot(mut self, desc: SlotDesc) -> Self {
        self.info.slots.push(Arc::new(desc));
        self
    }

    /// Provide a default constructor
    pub fn factory(mut self, f: impl Fn() -> Box<dyn Object> + Send + Sync + 'static) -> Self {
        self.info.factory = Some(Box::new(f));
        self
    }

    /// Provide a default constructor from `Default`
    pub fn default_factory<T: Object + Default>(self) -> Self {
        self.factory(|| -> Box<dyn Object> { Box::new(T::default()) })
    }

    /// Finish without registering (useful for tests and tooling)
    pub fn build(self) -> ClassInfo {
        self.info
    }

    /// Register with the given registry
    pub fn register(self, registry: &ClassRegistry) -> Result<Arc<ClassInfo>> {
        registry.register(self.info)
    }
}
