//! The runtime value model (spec §3, §4.3).

use std::fmt::Write as _;

/// A type tag, as produced by `typeof` and the `string`/`int`/`bool`/`type`/
/// `list` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Int,
    Bool,
    Type,
    List,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Int => "int",
            TypeTag::Bool => "bool",
            TypeTag::Type => "type",
            TypeTag::List => "list",
        }
    }

    pub fn from_name(name: &str) -> Option<TypeTag> {
        match name {
            "string" => Some(TypeTag::String),
            "int" => Some(TypeTag::Int),
            "bool" => Some(TypeTag::Bool),
            "type" => Some(TypeTag::Type),
            "list" => Some(TypeTag::List),
            _ => None,
        }
    }
}

/// A runtime value (spec §3). `List` is heterogeneous and may nest
/// arbitrarily; equality is derived, which for `List` is element-wise and
/// therefore already the deep structural comparison spec §3/§8 requires.
///
/// `Void` is never pushed onto the operand stack by this implementation; it
/// exists only for parity with the spec's data model (a transient sentinel
/// the original implementation used as a zero value before a variant was
/// chosen).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    TypeTag(TypeTag),
    List(Vec<Value>),
    Void,
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Str(_) => TypeTag::String,
            Value::Bool(_) => TypeTag::Bool,
            Value::TypeTag(_) => TypeTag::Type,
            Value::List(_) => TypeTag::List,
            Value::Void => unreachable!("Void is never observable on the stack"),
        }
    }

    /// The `puts`/`print` form: top-level formatting (spec §4.3).
    pub fn to_puts_string(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::TypeTag(t) => format!("<{}>", t.name()),
            Value::List(items) => format_list(items),
            Value::Void => String::new(),
        }
    }

    /// The form an element takes when printed *inside* a list: strings are
    /// quoted, type tags lose their angle brackets (spec §4.3).
    fn to_list_element_string(&self) -> String {
        match self {
            Value::Str(s) => format!("'{s}'"),
            Value::TypeTag(t) => t.name().to_string(),
            Value::List(items) => format_list(items),
            other => other.to_puts_string(),
        }
    }
}

fn format_list(items: &[Value]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", item.to_list_element_string());
    }
    out.push(']');
    out
}
