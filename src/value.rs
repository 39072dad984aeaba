// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::Serialize;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::ser::Serializer;

use crate::constants::*;
use crate::util::escape_string;
use crate::Number;
use crate::Temporal;

/// Object members in document order. Duplicate keys are kept as stored.
pub type Object<'a> = Vec<(Cow<'a, str>, Value<'a>)>;

/// An opaque value whose field type has no JSON counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque<'a> {
    /// The MySQL column type code the bytes were stored from
    pub field_type: u8,
    pub data: Cow<'a, [u8]>,
}

impl Display for Opaque<'_> {
    /// Formats as `base64:type<N>:<data>`.
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}:{}",
            OPAQUE_PREFIX,
            self.field_type,
            STANDARD.encode(&self.data)
        )
    }
}

/// Represents a value decoded from a binary JSON document.
///
/// Besides the standard JSON types, opaque payloads decode to `Temporal`
/// values, exact decimals inside `Number`, or raw `Opaque` bytes.
/// Strings and keys borrow from the input buffer whenever they are valid UTF-8.
#[derive(Clone, Default, PartialEq)]
pub enum Value<'a> {
    /// Represents a JSON null value
    #[default]
    Null,
    /// Represents a JSON boolean value (true or false)
    Bool(bool),
    /// Represents a JSON string value
    String(Cow<'a, str>),
    /// Represents a JSON number value with various internal representations
    Number(Number),
    /// Opaque date, time, datetime or timestamp
    Temporal(Temporal),
    /// Opaque value of any other field type
    Opaque(Opaque<'a>),
    /// Represents a JSON array of values
    Array(Vec<Value<'a>>),
    /// Represents a JSON object as key-value pairs in document order
    Object(Object<'a>),
}

impl Debug for Value<'_> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match *self {
            Value::Null => formatter.debug_tuple("Null").finish(),
            Value::Bool(v) => formatter.debug_tuple("Bool").field(&v).finish(),
            Value::Number(ref v) => Debug::fmt(v, formatter),
            Value::String(ref v) => formatter.debug_tuple("String").field(v).finish(),
            Value::Temporal(ref v) => formatter.debug_tuple("Temporal").field(v).finish(),
            Value::Opaque(ref v) => formatter.debug_tuple("Opaque").field(v).finish(),
            Value::Array(ref v) => {
                formatter.write_str("Array(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
            Value::Object(ref v) => {
                formatter.write_str("Object(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
        }
    }
}

impl Display for Value<'_> {
    /// Formats the value as compact JSON text.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => {
                if *v {
                    write!(f, "true")
                } else {
                    write!(f, "false")
                }
            }
            Value::Number(ref v) => write!(f, "{}", v),
            Value::String(ref v) => escape_string(v, f),
            Value::Temporal(v) => write!(f, "\"{}\"", v),
            Value::Opaque(v) => write!(f, "\"{}\"", v),
            Value::Array(ref vs) => {
                write!(f, "[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Object(ref vs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    escape_string(k, f)?;
                    write!(f, ":")?;
                    write!(f, "{v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Number(v) => v.serialize(serializer),
            Value::Temporal(v) => serializer.collect_str(v),
            Value::Opaque(v) => serializer.collect_str(v),
            Value::Array(vs) => {
                let mut seq = serializer.serialize_seq(Some(vs.len()))?;
                for v in vs {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Object(vs) => {
                let mut map = serializer.serialize_map(Some(vs.len()))?;
                for (k, v) in vs {
                    map.serialize_entry(k.as_ref(), v)?;
                }
                map.end()
            }
        }
    }
}

impl<'a> Value<'a> {
    pub fn is_scalar(&self) -> bool {
        !self.is_array() && !self.is_object()
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_v))
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self {
            Value::Object(ref obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_v))
    }

    pub fn as_array(&self) -> Option<&Vec<Value<'a>>> {
        match self {
            Value::Array(ref array) => Some(array),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn as_str(&self) -> Option<&Cow<'a, str>> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_i64(&self) -> bool {
        self.as_i64().is_some()
    }

    pub fn is_u64(&self) -> bool {
        self.as_u64().is_some()
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Value::Number(Number::Float64(_)))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_v))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_null(&self) -> Option<()> {
        match self {
            Value::Null => Some(()),
            _ => None,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Value::Temporal(_v))
    }

    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            Value::Temporal(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Value::Opaque(_v))
    }

    pub fn as_opaque(&self) -> Option<&Opaque<'a>> {
        match self {
            Value::Opaque(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the name of the JSON type of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => TYPE_NULL,
            Value::Bool(_) => TYPE_BOOLEAN,
            Value::Number(_) => TYPE_NUMBER,
            Value::String(_) | Value::Temporal(_) => TYPE_STRING,
            Value::Opaque(_) => TYPE_OPAQUE,
            Value::Array(_) => TYPE_ARRAY,
            Value::Object(_) => TYPE_OBJECT,
        }
    }

    /// Returns the first member named `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&Value<'a>> {
        match self {
            Value::Object(obj) => obj.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Value<'a>> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    pub fn array_length(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.len()),
            _ => None,
        }
    }

    pub fn object_keys(&self) -> Option<Vec<&str>> {
        match self {
            Value::Object(obj) => Some(obj.iter().map(|(k, _)| k.as_ref()).collect()),
            _ => None,
        }
    }

    /// Detaches the value from the input buffer it was decoded from.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(v),
            Value::String(v) => Value::String(Cow::Owned(v.into_owned())),
            Value::Number(v) => Value::Number(v),
            Value::Temporal(v) => Value::Temporal(v),
            Value::Opaque(v) => Value::Opaque(Opaque {
                field_type: v.field_type,
                data: Cow::Owned(v.data.into_owned()),
            }),
            Value::Array(arr) => Value::Array(arr.into_iter().map(Value::into_owned).collect()),
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
        }
    }
}
