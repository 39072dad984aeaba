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

use byteorder::ByteOrder;
use byteorder::LittleEndian;
use ethnum::i256;

use super::constants::*;
use super::depth::DepthTracker;
use crate::error::Error;
use crate::error::Result;
use crate::number::Decimal;
use crate::number::Number;
use crate::temporal::Temporal;
use crate::temporal::TemporalKind;
use crate::value::Opaque;
use crate::value::Value;

/// Returns the temporal kind stored under an opaque field type.
pub(crate) fn temporal_kind(field_type: u8) -> Option<TemporalKind> {
    match field_type {
        FIELD_TYPE_DATE => Some(TemporalKind::Date),
        FIELD_TYPE_TIME => Some(TemporalKind::Time),
        FIELD_TYPE_DATETIME => Some(TemporalKind::DateTime),
        FIELD_TYPE_TIMESTAMP => Some(TemporalKind::Timestamp),
        _ => None,
    }
}

/// Decodes the payload of an opaque value according to its field type.
///
/// A temporal payload takes one level of depth.
pub(crate) fn decode_opaque(
    field_type: u8,
    payload: &[u8],
    depth: DepthTracker,
) -> Result<Value<'_>> {
    if let Some(kind) = temporal_kind(field_type) {
        depth.descend()?;
        let temporal = decode_temporal(kind, payload)?;
        return Ok(Value::Temporal(temporal));
    }
    if field_type == FIELD_TYPE_NEWDECIMAL {
        let decimal = decode_decimal(payload)?;
        return Ok(Value::Number(Number::Decimal(decimal)));
    }
    tracing::trace!(
        field_type,
        len = payload.len(),
        "opaque value kept as raw bytes"
    );
    Ok(Value::Opaque(Opaque {
        field_type,
        data: Cow::Borrowed(payload),
    }))
}

fn decode_temporal(kind: TemporalKind, payload: &[u8]) -> Result<Temporal> {
    if payload.len() != PACKED_TEMPORAL_SIZE {
        return Err(Error::CorruptTemporal);
    }
    let packed = LittleEndian::read_i64(payload);
    let temporal = match kind {
        TemporalKind::Time => Temporal::from_packed_time(packed),
        _ => Temporal::from_packed_datetime(kind, packed),
    };
    Ok(temporal)
}

/// Decodes `precision(1) scale(1) digits(..)` in the MySQL binary decimal
/// layout.
///
/// Digits are grouped by nine into 4-byte big-endian words, with shorter
/// words for the leading integer and trailing fraction digits. The sign bit
/// of the first byte is flipped, negative values have every byte inverted.
pub(crate) fn decode_decimal(payload: &[u8]) -> Result<Decimal> {
    let (&precision, rest) = payload.split_first().ok_or(Error::CorruptDecimal)?;
    let (&scale, digits) = rest.split_first().ok_or(Error::CorruptDecimal)?;
    if precision == 0
        || precision > DECIMAL_MAX_PRECISION
        || scale > DECIMAL_MAX_SCALE
        || scale > precision
    {
        return Err(Error::CorruptDecimal);
    }

    let intg = (precision - scale) as usize;
    let frac = scale as usize;
    let intg0 = intg / DIGITS_PER_WORD;
    let intg0x = intg % DIGITS_PER_WORD;
    let frac0 = frac / DIGITS_PER_WORD;
    let frac0x = frac % DIGITS_PER_WORD;
    let size =
        (intg0 + frac0) * WORD_SIZE + DIG2BYTES[intg0x] + DIG2BYTES[frac0x];
    if digits.len() != size {
        return Err(Error::CorruptDecimal);
    }

    let mut buf = digits.to_vec();
    let negative = buf[0] & 0x80 == 0;
    buf[0] ^= 0x80;
    if negative {
        for byte in buf.iter_mut() {
            *byte = !*byte;
        }
    }

    let mut words = DigitWords { buf: &buf, pos: 0 };
    let mut value = i256::ZERO;
    if intg0x > 0 {
        value = i256::from(words.next(intg0x)?);
    }
    for _ in 0..intg0 {
        value = value * i256::from(DIGIT_WORD_BASE) + i256::from(words.next(DIGITS_PER_WORD)?);
    }
    for _ in 0..frac0 {
        value = value * i256::from(DIGIT_WORD_BASE) + i256::from(words.next(DIGITS_PER_WORD)?);
    }
    if frac0x > 0 {
        let scale = i256::from(10).pow(frac0x as u32);
        value = value * scale + i256::from(words.next(frac0x)?);
    }
    if negative {
        value = -value;
    }

    Ok(Decimal {
        precision,
        scale,
        value,
    })
}

struct DigitWords<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl DigitWords<'_> {
    /// Reads the word holding the next `digits` digits.
    fn next(&mut self, digits: usize) -> Result<u32> {
        let size = DIG2BYTES[digits];
        let bytes = self
            .buf
            .get(self.pos..self.pos + size)
            .ok_or(Error::CorruptDecimal)?;
        self.pos += size;
        let word = bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        if word >= 10u32.pow(digits as u32) {
            return Err(Error::CorruptDecimal);
        }
        Ok(word)
    }
}
