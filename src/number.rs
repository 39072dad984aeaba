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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use ethnum::i256;
use serde::ser::Serialize;
#[cfg(feature = "arbitrary_precision")]
use serde::ser::SerializeStruct;
use serde::ser::Serializer;

#[cfg(feature = "arbitrary_precision")]
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Represents an exact decimal number stored as a MySQL `DECIMAL` opaque value.
///
/// The value is kept as an integer scaled by `10^scale`, wide enough for the
/// 65 digits a MySQL decimal can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    /// Total number of significant digits declared by the column type
    pub precision: u8,
    /// Number of digits after the decimal point
    pub scale: u8,
    /// The actual value, scaled by 10^scale (e.g., 12345 for 123.45 with scale=2)
    pub value: i256,
}

impl Decimal {
    /// Converts the decimal value to a floating-point representation.
    ///
    /// Precision loss may occur, f64 holds far fewer digits than a decimal.
    pub fn to_float64(&self) -> f64 {
        let div = 10_f64.powi(self.scale as i32);
        self.value.as_f64() / div
    }
}

/// Represents a JSON number decoded from one of the binary numeric types.
///
/// - `Int64` holds the signed integer types (`int16`, `int32`, `int64`)
/// - `UInt64` holds the unsigned integer types (`uint16`, `uint32`, `uint64`)
/// - `Float64` holds `double` values
/// - `Decimal` holds exact decimals stored as opaque values
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Decimal(Decimal),
}

impl Serialize for Number {
    /// Serializes the number as a JSON integer or float.
    ///
    /// With `arbitrary_precision` decimals are emitted as the exact number
    /// token `Display` writes, otherwise as floats.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Int64(v) => serializer.serialize_i64(*v),
            Number::UInt64(v) => serializer.serialize_u64(*v),
            Number::Float64(v) => serializer.serialize_f64(*v),
            #[cfg(feature = "arbitrary_precision")]
            Number::Decimal(v) => {
                let mut serialize_struct = serializer.serialize_struct(NUMBER_TOKEN, 1)?;
                let val = v.to_string();
                serialize_struct.serialize_field(NUMBER_TOKEN, val.as_str())?;
                serialize_struct.end()
            }
            #[cfg(not(feature = "arbitrary_precision"))]
            Number::Decimal(v) => serializer.serialize_f64(v.to_float64()),
        }
    }
}

impl Number {
    /// Returns the i64 representation of the number, if possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int64(v) => Some(*v),
            Number::UInt64(v) => i64::try_from(*v).ok(),
            Number::Float64(_) | Number::Decimal(_) => None,
        }
    }

    /// Returns the u64 representation of the number, if possible.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Int64(v) => u64::try_from(*v).ok(),
            Number::UInt64(v) => Some(*v),
            Number::Float64(_) | Number::Decimal(_) => None,
        }
    }

    /// Returns the f64 representation of the number.
    ///
    /// This may lose precision for very large integers and decimals.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int64(v) => *v as f64,
            Number::UInt64(v) => *v as f64,
            Number::Float64(v) => *v,
            Number::Decimal(v) => v.to_float64(),
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Number::Decimal(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.scale == 0 {
            write!(f, "{}", self.value)
        } else {
            let pow_scale = i256::from(10).pow(self.scale as u32);
            // -1/10 = 0
            if self.value >= i256::ZERO {
                write!(
                    f,
                    "{}.{:0>width$}",
                    self.value / pow_scale,
                    (self.value % pow_scale).abs(),
                    width = self.scale as usize
                )
            } else {
                write!(
                    f,
                    "-{}.{:0>width$}",
                    -self.value / pow_scale,
                    (self.value % pow_scale).abs(),
                    width = self.scale as usize
                )
            }
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Number::Int64(v) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*v))
            }
            Number::UInt64(v) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*v))
            }
            // NaN and infinities have no JSON form
            Number::Float64(v) if !v.is_finite() => f.write_str("null"),
            Number::Float64(v) => {
                let mut buffer = ryu::Buffer::new();
                f.write_str(buffer.format_finite(*v))
            }
            Number::Decimal(v) => Display::fmt(v, f),
        }
    }
}
