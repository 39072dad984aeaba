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

use byteorder::ByteOrder;
use byteorder::LittleEndian;

use super::constants::*;
use super::depth::DepthTracker;
use super::header::ContainerHeader;
use super::header::ContainerKind;
use super::opaque::decode_opaque;
use crate::error::Error;
use crate::error::Result;
use crate::number::Number;
use crate::options::DecodeOptions;
use crate::value::Value;

/// `Decoder` turns binary JSON documents into [`Value`] trees.
///
/// The decoder holds only its options, it can be shared freely between
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes a stored document, whose first byte is the type tag of the
    /// root value.
    pub fn decode_document<'a>(&self, data: &'a [u8]) -> Result<Value<'a>> {
        let Some((&type_tag, value)) = data.split_first() else {
            tracing::debug!("empty binary JSON document");
            return Err(Error::Truncated);
        };
        self.decode(type_tag, value)
    }

    /// Decodes a value of type `type_tag` stored in `data`.
    pub fn decode<'a>(&self, type_tag: u8, data: &'a [u8]) -> Result<Value<'a>> {
        let depth = DepthTracker::new(self.options.max_depth);
        decode_value(type_tag, data, depth).inspect_err(|err| {
            tracing::debug!(
                error = %err,
                type_tag,
                len = data.len(),
                "failed to decode binary JSON value"
            );
        })
    }
}

/// Decodes a stored binary JSON document with the default options.
///
/// The first byte of `data` is the type tag of the root value.
///
/// # Examples
///
/// ```rust
/// let data = b"\x00\x01\x00\x0C\x00\x0B\x00\x01\x00\x05\x01\x00a";
/// let value = mysql_jsonb::from_slice(data).unwrap();
/// assert_eq!(value.to_string(), r#"{"a":1}"#);
/// ```
pub fn from_slice(data: &[u8]) -> Result<Value<'_>> {
    Decoder::default().decode_document(data)
}

/// Decodes a value of type `type_tag` with the default options.
pub fn decode(type_tag: u8, data: &[u8]) -> Result<Value<'_>> {
    Decoder::default().decode(type_tag, data)
}

/// Converts a stored binary JSON document to compact JSON text.
pub fn to_string(data: &[u8]) -> Result<String> {
    let value = from_slice(data)?;
    Ok(value.to_string())
}

/// Dispatches on the type tag.
///
/// Containers take one level of depth, scalars are leaves and only the
/// temporal opaque payloads count, so a document nests the same whatever
/// layout its scalars are stored in.
pub(crate) fn decode_value(
    type_tag: u8,
    data: &[u8],
    depth: DepthTracker,
) -> Result<Value<'_>> {
    match ContainerKind::from_type_tag(type_tag) {
        Some((kind, large)) => decode_container(kind, data, large, depth.descend()?),
        None => decode_scalar(type_tag, data, depth),
    }
}

fn decode_container(
    kind: ContainerKind,
    data: &[u8],
    large: bool,
    depth: DepthTracker,
) -> Result<Value<'_>> {
    let header = ContainerHeader::read(kind, data, large)?;
    match kind {
        ContainerKind::Object => {
            let mut object = Vec::with_capacity(header.element_count);
            for index in 0..header.element_count {
                let key = header.key(index)?;
                let value = decode_element(&header, index, depth)?;
                object.push((key, value));
            }
            Ok(Value::Object(object))
        }
        ContainerKind::Array => {
            let mut array = Vec::with_capacity(header.element_count);
            for index in 0..header.element_count {
                array.push(decode_element(&header, index, depth)?);
            }
            Ok(Value::Array(array))
        }
    }
}

fn decode_element<'a>(
    header: &ContainerHeader<'a>,
    index: usize,
    depth: DepthTracker,
) -> Result<Value<'a>> {
    let entry = header.value_entry(index)?;
    if entry.inlined {
        decode_scalar(entry.type_tag, entry.data, depth)
    } else {
        decode_value(entry.type_tag, entry.data, depth)
    }
}

/// Decodes a non-container value from the start of `data`.
pub(crate) fn decode_scalar(
    type_tag: u8,
    data: &[u8],
    depth: DepthTracker,
) -> Result<Value<'_>> {
    let value = match type_tag {
        LITERAL_TAG => match *data.first().ok_or(Error::Truncated)? {
            LITERAL_NULL => Value::Null,
            LITERAL_TRUE => Value::Bool(true),
            LITERAL_FALSE => Value::Bool(false),
            other => return Err(Error::CorruptLiteral(other)),
        },
        INT16_TAG => Value::Number(Number::Int64(LittleEndian::read_i16(take(data, 2)?).into())),
        UINT16_TAG => Value::Number(Number::UInt64(LittleEndian::read_u16(take(data, 2)?).into())),
        INT32_TAG => Value::Number(Number::Int64(LittleEndian::read_i32(take(data, 4)?).into())),
        UINT32_TAG => Value::Number(Number::UInt64(LittleEndian::read_u32(take(data, 4)?).into())),
        INT64_TAG => Value::Number(Number::Int64(LittleEndian::read_i64(take(data, 8)?))),
        UINT64_TAG => Value::Number(Number::UInt64(LittleEndian::read_u64(take(data, 8)?))),
        DOUBLE_TAG => Value::Number(Number::Float64(LittleEndian::read_f64(take(data, 8)?))),
        STRING_TAG => {
            let bytes = read_length_prefixed(data)?;
            Value::String(String::from_utf8_lossy(bytes))
        }
        OPAQUE_TAG => {
            let (&field_type, rest) = data.split_first().ok_or(Error::Truncated)?;
            let payload = read_length_prefixed(rest)?;
            decode_opaque(field_type, payload, depth)?
        }
        other => return Err(Error::UnknownType(other)),
    };
    Ok(value)
}

#[inline]
fn take(data: &[u8], len: usize) -> Result<&[u8]> {
    data.get(..len).ok_or(Error::Truncated)
}

/// Returns the bytes following a variable length prefix.
fn read_length_prefixed(data: &[u8]) -> Result<&[u8]> {
    let (length, prefix_len) = read_variable_length(data)?;
    data[prefix_len..].get(..length).ok_or(Error::Truncated)
}

/// Reads a variable length integer of up to 5 bytes, 7 bits per byte with
/// the high bit set on every byte but the last.
///
/// Returns the length and the number of bytes it occupies.
pub(crate) fn read_variable_length(data: &[u8]) -> Result<(usize, usize)> {
    let mut length: u64 = 0;
    for i in 0..MAX_VARIABLE_LENGTH_BYTES {
        let byte = *data.get(i).ok_or(Error::Truncated)?;
        length |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            let length = u32::try_from(length).map_err(|_| Error::LengthOverflow)?;
            return Ok((length as usize, i + 1));
        }
    }
    Err(Error::LengthOverflow)
}
