//! Member descriptors
//!
//! Immutable per-member metadata created at class registration time. Each
//! descriptor pairs a name/description/annotation block with a type-erased
//! accessor generated from a typed projection, so callers never need the
//! concrete type at the call site. Binding a descriptor to an object that is
//! not an instance of the declaring class yields `None`.

use std::fmt;

use lumen_core::{ReflectValue, Signature, Value, ValueType};
use lumen_event::{Signal, Slot};

use crate::object::Object;

type Getter = Box<dyn Fn(&dyn Object) -> Option<Value> + Send + Sync>;
type Setter = Box<dyn Fn(&mut dyn Object, Value) -> bool + Send + Sync>;
type Invoker = Box<dyn Fn(&mut dyn Object, &[Value]) -> Option<Value> + Send + Sync>;
type Applies = fn(&dyn Object) -> bool;
type SignalProjection = Box<dyn for<'a> Fn(&'a dyn Object) -> Option<&'a Signal> + Send + Sync>;
type SlotProjection = Box<dyn for<'a> Fn(&'a dyn Object) -> Option<&'a Slot> + Send + Sync>;

fn applies_to<T: Object>(obj: &dyn Object) -> bool {
    obj.as_any().is::<T>()
}

/// Metadata common to every member kind
#[derive(Debug, Clone, Default)]
pub struct MemberInfo {
    /// Member name, unique within the owning class
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Free-form annotation
    pub annotation: String,
}

impl MemberInfo {
    fn named(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Descriptor for a reflected property
pub struct PropertyDesc {
    info: MemberInfo,
    value_type: ValueType,
    applies: Applies,
    getter: Getter,
    setter: Option<Setter>,
}

impl PropertyDesc {
    /// Describe a read/write property via typed accessors
    pub fn new<T: Object, V: ReflectValue>(
        name: &str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> Self {
        let mut desc = Self::read_only(name, get);
        desc.setter = Some(Box::new(move |obj: &mut dyn Object, value: Value| {
            let Some(target) = obj.as_any_mut().downcast_mut::<T>() else {
                return false;
            };
            let Some(value) = V::from_value(&value) else {
                return false;
            };
            set(target, value);
            true
        }));
        desc
    }

    /// Describe a read-only property
    pub fn read_only<T: Object, V: ReflectValue>(name: &str, get: fn(&T) -> V) -> Self {
        Self {
            info: MemberInfo::named(name),
            value_type: V::value_type(),
            applies: applies_to::<T>,
            getter: Box::new(move |obj: &dyn Object| {
                obj.as_any()
                    .downcast_ref::<T>()
                    .map(|t| get(t).into_value())
            }),
            setter: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = description.into();
        self
    }

    /// Attach an annotation
    pub fn with_annotation(mut self, annotation: &str) -> Self {
        self.info.annotation = annotation.into();
        self
    }

    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// The property's value type tag
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// True if the property has no setter
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    /// Read from an instance; `None` if `obj` is not of the declaring class
    pub fn get_value(&self, obj: &dyn Object) -> Option<Value> {
        (self.getter)(obj)
    }

    /// Write to an instance; false on wrong class, read-only property or
    /// inconvertible value
    pub fn set_value(&self, obj: &mut dyn Object, value: Value) -> bool {
        match &self.setter {
            Some(setter) => setter(obj, value),
            None => false,
        }
    }

    /// Obtain a transient accessor bound to one instance
    pub fn bind<'a>(&'a self, object: &'a mut dyn Object) -> Option<BoundProperty<'a>> {
        if !(self.applies)(object) {
            return None;
        }
        Some(BoundProperty { desc: self, object })
    }
}

impl fmt::Debug for PropertyDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDesc")
            .field("name", &self.info.name)
            .field("type", &self.value_type)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

/// A property accessor bound to one instance
pub struct BoundProperty<'a> {
    desc: &'a PropertyDesc,
    object: &'a mut dyn Object,
}

impl BoundProperty<'_> {
    pub fn desc(&self) -> &PropertyDesc {
        self.desc
    }

    pub fn get(&self) -> Option<Value> {
        self.desc.get_value(self.object)
    }

    pub fn set(&mut self, value: Value) -> bool {
        self.desc.set_value(self.object, value)
    }
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// Descriptor for a reflected method
pub struct MethodDesc {
    info: MemberInfo,
    signature: Signature,
    applies: Applies,
    invoker: Invoker,
}

macro_rules! typed_method_ctor {
    ($(#[$doc:meta])* $name:ident, $($arg:ident: $ty:ident),*) => {
        $(#[$doc])*
        pub fn $name<T, $($ty,)* R>(name: &str, f: fn(&mut T, $($ty),*) -> R) -> Self
        where
            T: Object,
            $($ty: ReflectValue,)*
            R: ReflectValue,
        {
            let params: Vec<ValueType> = vec![$(<$ty as ReflectValue>::value_type()),*];
            let signature = Signature::new(R::value_type(), &params);
            let arity = params.len();
            Self {
                info: MemberInfo::named(name),
                signature,
                applies: applies_to::<T>,
                invoker: Box::new(move |obj: &mut dyn Object, args: &[Value]| {
                    if args.len() != arity {
                        return None;
                    }
                    let target = obj.as_any_mut().downcast_mut::<T>()?;
                    let mut args = args.iter();
                    $(
                        let $arg = args.next().and_then(|v| <$ty>::from_value(v))?;
                    )*
                    let _ = &mut args;
                    Some(f(target, $($arg),*).into_value())
                }),
            }
        }
    };
}

impl MethodDesc {
    typed_method_ctor!(
        /// Describe a nullary method
        new0,
    );
    typed_method_ctor!(
        /// Describe a unary method; the signature derives from `A` and `R`
        new1, a: A
    );
    typed_method_ctor!(
        /// Describe a binary method
        new2, a: A, b: B
    );
    typed_method_ctor!(
        /// Describe a ternary method
        new3, a: A, b: B, c: C
    );

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = description.into();
        self
    }

    /// Attach an annotation
    pub fn with_annotation(mut self, annotation: &str) -> Self {
        self.info.annotation = annotation.into();
        self
    }

    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke on an instance. `None` means no call happened: wrong class,
    /// wrong arity or an argument that would not convert.
    pub fn invoke(&self, obj: &mut dyn Object, args: &[Value]) -> Option<Value> {
        (self.invoker)(obj, args)
    }

    /// Obtain a transient callable bound to one instance
    pub fn bind<'a>(&'a self, object: &'a mut dyn Object) -> Option<BoundMethod<'a>> {
        if !(self.applies)(object) {
            return None;
        }
        Some(BoundMethod { desc: self, object })
    }
}

impl fmt::Debug for MethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDesc")
            .field("name", &self.info.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

/// A method bound to one instance
pub struct BoundMethod<'a> {
    desc: &'a MethodDesc,
    object: &'a mut dyn Object,
}

impl BoundMethod<'_> {
    pub fn desc(&self) -> &MethodDesc {
        self.desc
    }

    pub fn signature(&self) -> &Signature {
        &self.desc.signature
    }

    /// Call with a structured parameter bag
    pub fn call(&mut self, args: &[Value]) -> Option<Value> {
        self.desc.invoke(self.object, args)
    }
}

// ---------------------------------------------------------------------------
// Signals and slots
// ---------------------------------------------------------------------------

/// Descriptor for a signal declared as a field of the class
pub struct SignalDesc {
    info: MemberInfo,
    signature: Signature,
    project: SignalProjection,
}

impl SignalDesc {
    /// Describe a signal via a typed field projection
    ///
    /// `signature` must match the signature the field is constructed with;
    /// the registry has no way to inspect an instance at registration time.
    pub fn new<T: Object>(name: &str, signature: Signature, project: fn(&T) -> &Signal) -> Self {
        Self {
            info: MemberInfo::named(name),
            signature,
            project: Box::new(move |obj| obj.as_any().downcast_ref::<T>().map(project)),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = description.into();
        self
    }

    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Resolve the signal on an instance of the declaring class
    pub fn project<'a>(&self, obj: &'a dyn Object) -> Option<&'a Signal> {
        (self.project)(obj)
    }
}

impl fmt::Debug for SignalDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDesc")
            .field("name", &self.info.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

/// Descriptor for a slot declared as a field of the class
pub struct SlotDesc {
    info: MemberInfo,
    signature: Signature,
    project: SlotProjection,
}

impl SlotDesc {
    /// Describe a slot via a typed field projection
    pub fn new<T: Object>(name: &str, signature: Signature, project: fn(&T) -> &Slot) -> Self {
        Self {
            info: MemberInfo::named(name),
            signature,
            project: Box::new(move |obj| obj.as_any().downcast_ref::<T>().map(project)),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = description.into();
        self
    }

    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Resolve the slot on an instance of the declaring class
    pub fn project<'a>(&self, obj: &'a dyn Object) -> Option<&'a Slot> {
        (self.project)(obj)
    }
}

impl fmt::Debug for SlotDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDesc")
            .field("name", &self.info.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Probe {
        speed: f32,
        calls: u32,
    }

    impl Object for Probe {
        fn class_name(&self) -> &str {
            "Test.Probe"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Other;

    impl Object for Other {
        fn class_name(&self) -> &str {
            "Test.Other"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn speed_desc() -> PropertyDesc {
        PropertyDesc::new("Speed", |p: &Probe| p.speed, |p, v| p.speed = v)
    }

    #[test]
    fn test_property_round_trip() {
        let desc = speed_desc();
        let mut probe = Probe {
            speed: 1.0,
            calls: 0,
        };

        assert_eq!(desc.get_value(&probe), Some(Value::Float(1.0)));
        assert!(desc.set_value(&mut probe, Value::Float(2.5)));
        assert_eq!(probe.speed, 2.5);

        // Int coerces into a float property.
        assert!(desc.set_value(&mut probe, Value::Int(4)));
        assert_eq!(probe.speed, 4.0);
    }

    #[test]
    fn test_property_rejects_wrong_class_and_bad_value() {
        let desc = speed_desc();
        let mut other = Other;

        assert_eq!(desc.get_value(&other), None);
        assert!(!desc.set_value(&mut other, Value::Float(1.0)));
        assert!(desc.bind(&mut other).is_none());

        let mut probe = Probe {
            speed: 0.0,
            calls: 0,
        };
        assert!(!desc.set_value(&mut probe, Value::Unit));
        assert_eq!(probe.speed, 0.0);
    }

    #[test]
    fn test_read_only_property() {
        let desc = PropertyDesc::read_only("Calls", |p: &Probe| p.calls as i64);
        let mut probe = Probe {
            speed: 0.0,
            calls: 3,
        };

        assert!(desc.is_read_only());
        assert_eq!(desc.get_value(&probe), Some(Value::Int(3)));
        assert!(!desc.set_value(&mut probe, Value::Int(9)));
        assert_eq!(probe.calls, 3);
    }

    #[test]
    fn test_method_invoke_and_failure_modes() {
        let desc = MethodDesc::new1("Bump", |p: &mut Probe, by: i64| -> i64 {
            p.calls += by as u32;
            p.calls as i64
        });
        assert_eq!(desc.signature().to_string(), "int(int)");

        let mut probe = Probe {
            speed: 0.0,
            calls: 0,
        };

        assert_eq!(desc.invoke(&mut probe, &[Value::Int(2)]), Some(Value::Int(2)));

        // Wrong arity and inconvertible argument: no call performed.
        assert_eq!(desc.invoke(&mut probe, &[]), None);
        assert_eq!(desc.invoke(&mut probe, &[Value::Unit]), None);
        assert_eq!(probe.calls, 2);

        let mut other = Other;
        assert_eq!(desc.invoke(&mut other, &[Value::Int(1)]), None);
        assert!(desc.bind(&mut other).is_none());
    }

    #[test]
    fn test_void_method_reports_success() {
        let desc = MethodDesc::new0("Reset", |p: &mut Probe| {
            p.calls = 0;
        });
        assert_eq!(desc.signature().to_string(), "void()");

        let mut probe = Probe {
            speed: 0.0,
            calls: 7,
        };
        assert_eq!(desc.invoke(&mut probe, &[]), Some(Value::Unit));
        assert_eq!(probe.calls, 0);
    }
}
