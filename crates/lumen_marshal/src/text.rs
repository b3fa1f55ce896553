//! Text-encoded parameter lists
//!
//! Grammar: a comma-separated list of scalars. Strings may be double-quoted
//! (required when they contain commas or leading/trailing whitespace), with
//! `\"` and `\\` escapes. The list is checked against a signature before any
//! call happens; a payload that does not fit produces no call at all.

use lumen_core::{Signature, Value, ValueType};

enum Field {
    Bare(String),
    Quoted(String),
}

/// Parse a parameter payload against a signature
///
/// `None` on wrong arity, unterminated quote, or any scalar that does not
/// parse as its declared type.
pub fn parse_args(input: &str, signature: &Signature) -> Option<Vec<Value>> {
    let fields = split_fields(input)?;
    if fields.len() != signature.arity() {
        return None;
    }
    fields
        .iter()
        .zip(signature.params.iter())
        .map(|(field, ty)| match field {
            Field::Quoted(text) => {
                // Quotes force string typing.
                (*ty == ValueType::Str).then(|| Value::Str(text.clone()))
            }
            Field::Bare(text) => parse_scalar(text, *ty),
        })
        .collect()
}

/// Parse one unquoted scalar as the given type
pub(crate) fn parse_scalar(text: &str, ty: ValueType) -> Option<Value> {
    match ty {
        ValueType::Void => None,
        ValueType::Bool => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        ValueType::Int => text.parse().ok().map(Value::Int),
        ValueType::Float => text.parse().ok().map(Value::Float),
        ValueType::Str => Some(Value::Str(text.to_owned())),
    }
}

/// Render a return value for the string calling convention
///
/// `Unit` (and failure, by convention at the call sites) renders empty.
pub fn format_return(value: &Value) -> String {
    value.to_display_string()
}

fn split_fields(input: &str) -> Option<Vec<Field>> {
    let mut fields = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        // Skip leading whitespace of the next field.
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek() {
            None => break,
            Some('"') => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next()? {
                        '\\' => match chars.next()? {
                            '"' => text.push('"'),
                            '\\' => text.push('\\'),
                            other => {
                                text.push('\\');
                                text.push(other);
                            }
                        },
                        '"' => break,
                        c => text.push(c),
                    }
                }
                // Only whitespace may follow up to the next separator.
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                match chars.next() {
                    None | Some(',') => {}
                    Some(_) => return None,
                }
                fields.push(Field::Quoted(text));
            }
            Some(_) => {
                let mut text = String::new();
                for c in chars.by_ref() {
                    if c == ',' {
                        break;
                    }
                    text.push(c);
                }
                fields.push(Field::Bare(text.trim_end().to_owned()));
            }
        }
    }

    Some(fields)
}
