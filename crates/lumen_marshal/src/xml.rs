//! XML-encoded parameter lists
//!
//! Serializers hand a call site a whole element; parameters are read from
//! positional attributes `arg0..argN`. Anything that does not fit the
//! signature (missing attribute, surplus positional attribute, ill-typed
//! text) produces no call.

use lumen_core::{Signature, Value};

use crate::text::parse_scalar;

/// Extract a parameter list from an element's positional attributes
pub fn parse_args_from_node(node: roxmltree::Node, signature: &Signature) -> Option<Vec<Value>> {
    // A surplus positional attribute means the payload was written for a
    // different arity; treat it like any other shape mismatch.
    if node.attribute(arg_name(signature.arity()).as_str()).is_some() {
        return None;
    }

    signature
        .params
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let raw = node.attribute(arg_name(i).as_str())?;
            parse_scalar(raw, *ty)
        })
        .collect()
}

fn arg_name(index: usize) -> String {
    format!("arg{index}")
}
