// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{Debug, Display, Formatter, Write},
    rc::Rc,
};

use lilt::{BlockStatement, Parameter, TypeName};

use crate::{
    builtin::{BuiltinFunction, BuiltinMethod},
    Scope,
};

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
    Map(HashMap<MapKey, MapEntry>),
    Function(Rc<FunctionValue>),
    Builtin(&'static BuiltinFunction),
    BoundMethod {
        receiver: Box<Value>,
        method: &'static BuiltinMethod,
    },
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Integer(..) => ValueKind::Integer,
            Self::Float(..) => ValueKind::Float,
            Self::Bool(..) => ValueKind::Boolean,
            Self::Str(..) => ValueKind::Str,
            Self::List(..) => ValueKind::List,
            Self::Map(..) => ValueKind::Map,
            Self::Function(..) | Self::Builtin(..) | Self::BoundMethod { .. } => {
                ValueKind::Function
            }
        }
    }

    /// Everything is truthy except `Null` and `false`; zero and the empty
    /// string count as true.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }

    /// The hashable form of this value, for map keys. `None` for kinds that
    /// cannot be keys.
    #[must_use]
    pub fn map_key(&self) -> Option<MapKey> {
        let raw = match self {
            Self::Integer(value) => *value as u64,
            Self::Bool(value) => *value as u64,
            Self::Float(value) => value.to_bits(),
            Self::Str(value) => fnv1a(value.as_bytes()),
            _ => return None,
        };

        Some(MapKey {
            kind: self.kind(),
            raw,
        })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(value) => Display::fmt(value, f),
            Self::Float(value) => f.write_fmt(format_args!("{value:.6}")),
            Self::Bool(value) => Display::fmt(value, f),
            Self::Str(value) => f.write_str(value),

            Self::List(elements) => {
                f.write_char('[')?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx != 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(element, f)?;
                }
                f.write_char(']')
            }

            Self::Map(pairs) => {
                f.write_char('{')?;
                for (idx, entry) in pairs.values().enumerate() {
                    if idx != 0 {
                        f.write_str(", ")?;
                    }
                    f.write_fmt(format_args!("{}: {}", entry.key, entry.value))?;
                }
                f.write_char('}')
            }

            Self::Function(function) => Display::fmt(function, f),
            Self::Builtin(..) => f.write_str("builtin function"),
            Self::BoundMethod { .. } => f.write_str("builtin method"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Integer,
    Float,
    Boolean,
    Str,
    Function,
    List,
    Map,
}

impl ValueKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::Str => "STRING",
            Self::Function => "FUNCTION",
            Self::List => "LIST",
            Self::Map => "MAP",
        }
    }

    /// The runtime kind a declared type name checks against. Absent and
    /// unknown names check as `NULL`.
    #[must_use]
    pub const fn of_declared(type_name: Option<TypeName>) -> Self {
        match type_name {
            Some(TypeName::Int) => Self::Integer,
            Some(TypeName::Float) => Self::Float,
            Some(TypeName::String) => Self::Str,
            Some(TypeName::Bool) => Self::Boolean,
            Some(TypeName::Func) => Self::Function,
            Some(TypeName::List) => Self::List,
            Some(TypeName::Map) => Self::Map,
            Some(TypeName::Void) | None => Self::Null,
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A `(kind, u64)` pair identifying a map key: integers as themselves,
/// booleans as 0/1, floats by bit pattern, strings by FNV-1a of their bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapKey {
    kind: ValueKind,
    raw: u64,
}

#[derive(Clone, Debug)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// A user function: its signature, body and the scope it closed over.
#[derive(Clone)]
pub struct FunctionValue {
    pub name: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeName,
    pub body: BlockStatement,
    pub scope: Rc<RefCell<Scope>>,
}

impl Display for FunctionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("fn ")?;
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }

        f.write_char('(')?;
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(parameter, f)?;
        }
        f.write_fmt(format_args!(") {}", self.return_type))
    }
}

// The captured scope can reach this function again through a named binding,
// so Debug must not descend into it.
impl Debug for FunctionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .field("scope", &Rc::as_ptr(&self.scope))
            .finish_non_exhaustive()
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_by_kind() {
        assert!(Value::Integer(4).map_key().is_some());
        assert!(Value::Bool(false).map_key().is_some());
        assert!(Value::Float(0.75).map_key().is_some());
        assert!(Value::Str("one".to_string()).map_key().is_some());

        assert!(Value::Null.map_key().is_none());
        assert!(Value::List(Vec::new()).map_key().is_none());
        assert!(Value::Map(HashMap::new()).map_key().is_none());
    }

    #[test]
    fn equal_values_share_a_key() {
        assert_eq!(
            Value::Str("three".to_string()).map_key(),
            Value::Str(format!("thr{}", "ee")).map_key(),
        );
        assert_eq!(Value::Integer(4).map_key(), Value::Integer(4).map_key());
    }

    #[test]
    fn keys_of_different_kinds_never_collide() {
        assert_ne!(Value::Integer(1).map_key(), Value::Bool(true).map_key());
        assert_ne!(Value::Integer(0).map_key(), Value::Float(0.0).map_key());
    }

    #[test]
    fn float_keys_hash_by_bit_pattern() {
        assert_ne!(Value::Float(0.0).map_key(), Value::Float(-0.0).map_key());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Float(2.5).to_string(), "2.500000");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("raw".to_string()).to_string(), "raw");
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::Str("a".to_string())]).to_string(),
            "[1, a]"
        );
    }
}
