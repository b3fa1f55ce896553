//! # lumen_marshal - Dynamic Calling Conventions
//!
//! Adapters for the boundary where callers do not hold typed values:
//! script engines passing text-encoded parameter lists, and serializers
//! passing XML elements. Both conventions resolve against the callee's
//! signature before anything runs; a payload that does not fit performs no
//! call and, for the with-return variants, yields an empty string.

pub mod text;
pub mod xml;

pub use text::{format_return, parse_args};
pub use xml::parse_args_from_node;

use lumen_core::Value;
use lumen_event::Signal;
use lumen_reflect::BoundMethod;

/// Text calling convention for bound methods
pub trait TextCall {
    /// Call with a text-encoded parameter list; `None` if no call happened
    fn call_text(&mut self, args: &str) -> Option<Value>;

    /// Like `call_text`, marshaling the return value to a string.
    /// Empty on failure or void return.
    fn call_text_with_return(&mut self, args: &str) -> String;
}

impl TextCall for BoundMethod<'_> {
    fn call_text(&mut self, args: &str) -> Option<Value> {
        let Some(args) = text::parse_args(args, self.signature()) else {
            log::debug!("dropped text call on {}", self.signature());
            return None;
        };
        self.call(&args)
    }

    fn call_text_with_return(&mut self, args: &str) -> String {
        match self.call_text(args) {
            Some(value) => text::format_return(&value),
            None => String::new(),
        }
    }
}

/// XML calling convention for bound methods
pub trait XmlCall {
    /// Call with parameters extracted from an element's attributes
    fn call_xml(&mut self, node: roxmltree::Node) -> Option<Value>;

    /// Like `call_xml`, marshaling the return value to a string
    fn call_xml_with_return(&mut self, node: roxmltree::Node) -> String;
}

impl XmlCall for BoundMethod<'_> {
    fn call_xml(&mut self, node: roxmltree::Node) -> Option<Value> {
        let Some(args) = xml::parse_args_from_node(node, self.signature()) else {
            log::debug!("dropped xml call on {}", self.signature());
            return None;
        };
        self.call(&args)
    }

    fn call_xml_with_return(&mut self, node: roxmltree::Node) -> String {
        match self.call_xml(node) {
            Some(value) => text::format_return(&value),
            None => String::new(),
        }
    }
}

/// Text emission convention for signals
pub trait TextEmit {
    /// Emit with a text-encoded parameter list; a payload that does not
    /// match the signature emits nothing
    fn emit_text(&self, args: &str);
}

impl TextEmit for Signal {
    fn emit_text(&self, args: &str) {
        if let Some(args) = text::parse_args(args, self.signature()) {
            self.emit(&args);
        }
    }
}

/// XML emission convention for signals
pub trait XmlEmit {
    /// Emit with parameters extracted from an element's attributes
    fn emit_xml(&self, node: roxmltree::Node);
}

impl XmlEmit for Signal {
    fn emit_xml(&self, node: roxmltree::Node) {
        if let Some(args) = xml::parse_args_from_node(node, self.signature()) {
            self.emit(&args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use lumen_core::ValueType;
    use lumen_event::Slot;
    use lumen_reflect::{MethodDesc, Object};

    #[derive(Default)]
    struct Counter {
        total: i64,
    }

    impl Object for Counter {
        fn class_name(&self) -> &str {
            "Test.Counter"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn add_desc() -> MethodDesc {
        MethodDesc::new2("Add", |c: &mut Counter, a: i64, b: i64| -> i64 {
            c.total += a + b;
            c.total
        })
    }

    #[test]
    fn test_call_text() {
        let desc = add_desc();
        let mut counter = Counter::default();
        let mut bound = desc.bind(&mut counter).unwrap();

        assert_eq!(bound.call_text("2, 3"), Some(Value::Int(5)));
        assert_eq!(bound.call_text_with_return("10, 20"), "35");

        // Malformed payloads: no call, empty return, no state change.
        assert_eq!(bound.call_text("garbage, not, matching, arity"), None);
        assert_eq!(bound.call_text_with_return("x, y"), "");
        drop(bound);
        assert_eq!(counter.total, 35);
    }

    #[test]
    fn test_call_xml() {
        let desc = add_desc();
        let mut counter = Counter::default();
        let mut bound = desc.bind(&mut counter).unwrap();

        let doc = roxmltree::Document::parse(r#"<Add arg0="4" arg1="6"/>"#).unwrap();
        assert_eq!(bound.call_xml_with_return(doc.root_element()), "10");

        let bad = roxmltree::Document::parse(r#"<Add arg0="4"/>"#).unwrap();
        assert_eq!(bound.call_xml(bad.root_element()), None);
        assert_eq!(bound.call_xml_with_return(bad.root_element()), "");
    }

    #[test]
    fn test_emit_text_and_xml() {
        let signal = Signal::action(&[ValueType::Int]);
        let seen = Arc::new(AtomicU32::new(0));
        let s = seen.clone();
        let slot = Slot::from_fn1(move |n: i64| {
            s.fetch_add(n as u32, Ordering::SeqCst);
        });
        signal.connect(&slot);

        signal.emit_text("5");
        signal.emit_text("not an int");
        assert_eq!(seen.load(Ordering::SeqCst), 5);

        let doc = roxmltree::Document::parse(r#"<OnTick arg0="7"/>"#).unwrap();
        signal.emit_xml(doc.root_element());
        assert_eq!(seen.load(Ordering::SeqCst), 12);
    }
}
