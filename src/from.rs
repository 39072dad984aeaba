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

use ethnum::i256;
use serde_json::Map as JsonMap;
use serde_json::Number as JsonNumber;
use serde_json::Value as JsonValue;

use crate::number::Decimal;
use crate::value::Value;
use crate::Number;

macro_rules! from_signed_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::Int64(n as i64))
                }
            }
        )*
    };
}

macro_rules! from_unsigned_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::UInt64(n as u64))
                }
            }
        )*
    };
}

from_signed_integer! {
    i8 i16 i32 i64 isize
}

from_unsigned_integer! {
    u8 u16 u32 u64 usize
}

impl<'a> From<f64> for Value<'a> {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float64(f))
    }
}

impl<'a> From<bool> for Value<'a> {
    fn from(f: bool) -> Self {
        Value::Bool(f)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(f: &'a str) -> Self {
        Value::String(Cow::from(f))
    }
}

impl<'a> From<String> for Value<'a> {
    fn from(f: String) -> Self {
        Value::String(Cow::from(f))
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(f: Vec<T>) -> Self {
        Value::Array(f.into_iter().map(Into::into).collect())
    }
}

fn decimal_to_json(d: &Decimal) -> JsonValue {
    #[cfg(feature = "arbitrary_precision")]
    if let Ok(n) = d.to_string().parse::<JsonNumber>() {
        return JsonValue::Number(n);
    }
    if d.scale == 0 {
        if d.value >= i256::from(i64::MIN) && d.value <= i256::from(i64::MAX) {
            return JsonValue::Number(d.value.as_i64().into());
        }
        if d.value > i256::ZERO && d.value <= i256::from(u64::MAX) {
            return JsonValue::Number(d.value.as_u64().into());
        }
    }
    match JsonNumber::from_f64(d.to_float64()) {
        Some(n) => JsonValue::Number(n),
        None => JsonValue::Null,
    }
}

/// Converts a decoded value into a `serde_json` value.
///
/// Temporal and opaque values become strings with the same text `Display`
/// writes. Objects keep document order, a duplicated key keeps the position
/// of its first occurrence and the value of its last.
impl<'a> From<Value<'a>> for JsonValue {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(v),
            Value::Number(v) => match v {
                Number::Int64(n) => JsonValue::Number(n.into()),
                Number::UInt64(n) => JsonValue::Number(n.into()),
                Number::Float64(n) => match JsonNumber::from_f64(n) {
                    Some(n) => JsonValue::Number(n),
                    // If the value is NaN or Infinity, fallback to NULL
                    None => JsonValue::Null,
                },
                Number::Decimal(ref d) => decimal_to_json(d),
            },
            Value::String(v) => JsonValue::String(v.into_owned()),
            Value::Temporal(v) => JsonValue::String(v.to_string()),
            Value::Opaque(v) => JsonValue::String(v.to_string()),
            Value::Array(arr) => JsonValue::Array(arr.into_iter().map(Into::into).collect()),
            Value::Object(obj) => {
                let mut map = JsonMap::with_capacity(obj.len());
                for (k, v) in obj {
                    map.insert(k.into_owned(), v.into());
                }
                JsonValue::Object(map)
            }
        }
    }
}
