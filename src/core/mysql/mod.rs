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

pub mod constants;
mod de;
mod depth;
mod header;
mod iterator;
mod opaque;

pub use de::*;
pub use iterator::*;

use std::borrow::Cow;

use constants::*;
use depth::DepthTracker;
use header::ContainerHeader;
use header::ContainerKind;

use crate::error::*;
use crate::DecodeOptions;
use crate::RawJsonb;
use crate::Value;
use crate::ValueType;

impl<'a> RawJsonb<'a> {
    /// Returns the type of the value, reading only its header.
    pub fn value_type(&self) -> Result<ValueType> {
        if let Some((kind, large)) = ContainerKind::from_type_tag(self.type_tag) {
            let header = ContainerHeader::read(kind, self.data, large)?;
            return Ok(match kind {
                ContainerKind::Object => ValueType::Object(header.element_count),
                ContainerKind::Array => ValueType::Array(header.element_count),
            });
        }
        match self.type_tag {
            LITERAL_TAG => match *self.data.first().ok_or(Error::Truncated)? {
                LITERAL_NULL => Ok(ValueType::Null),
                LITERAL_TRUE | LITERAL_FALSE => Ok(ValueType::Boolean),
                other => Err(Error::CorruptLiteral(other)),
            },
            INT16_TAG | UINT16_TAG | INT32_TAG | UINT32_TAG | INT64_TAG | UINT64_TAG
            | DOUBLE_TAG => Ok(ValueType::Number),
            STRING_TAG => Ok(ValueType::String),
            OPAQUE_TAG => {
                let field_type = *self.data.first().ok_or(Error::Truncated)?;
                if opaque::temporal_kind(field_type).is_some() {
                    Ok(ValueType::Temporal)
                } else if field_type == FIELD_TYPE_NEWDECIMAL {
                    Ok(ValueType::Number)
                } else {
                    Ok(ValueType::Opaque)
                }
            }
            other => Err(Error::UnknownType(other)),
        }
    }

    /// Returns the number of elements if the value is an array.
    pub fn array_length(&self) -> Result<Option<usize>> {
        Ok(ArrayIterator::new(*self)?.map(|iter| iter.len()))
    }

    /// Returns the keys in document order if the value is an object.
    pub fn object_keys(&self) -> Result<Option<Vec<Cow<'a, str>>>> {
        let Some((ContainerKind::Object, large)) = ContainerKind::from_type_tag(self.type_tag)
        else {
            return Ok(None);
        };
        let header = ContainerHeader::read(ContainerKind::Object, self.data, large)?;
        let keys = (0..header.element_count)
            .map(|index| header.key(index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(keys))
    }

    /// Returns the element at `index` if the value is an array holding one.
    pub fn get_by_index(&self, index: usize) -> Result<Option<RawJsonb<'a>>> {
        let Some((ContainerKind::Array, large)) = ContainerKind::from_type_tag(self.type_tag)
        else {
            return Ok(None);
        };
        let header = ContainerHeader::read(ContainerKind::Array, self.data, large)?;
        if index >= header.element_count {
            return Ok(None);
        }
        let entry = header.value_entry(index)?;
        Ok(Some(RawJsonb::new(entry.type_tag, entry.data)))
    }

    /// Returns the first member named `name` if the value is an object.
    ///
    /// Keys are compared bytewise and scanned in document order, so the
    /// lookup does not depend on how the encoder sorted them.
    pub fn get_by_key(&self, name: &str) -> Result<Option<RawJsonb<'a>>> {
        let Some((ContainerKind::Object, large)) = ContainerKind::from_type_tag(self.type_tag)
        else {
            return Ok(None);
        };
        let header = ContainerHeader::read(ContainerKind::Object, self.data, large)?;
        for index in 0..header.element_count {
            if header.key_bytes(index)? == name.as_bytes() {
                let entry = header.value_entry(index)?;
                return Ok(Some(RawJsonb::new(entry.type_tag, entry.data)));
            }
        }
        Ok(None)
    }

    /// Iterates the elements if the value is an array.
    pub fn array_values(&self) -> Result<Option<ArrayIterator<'a>>> {
        ArrayIterator::new(*self)
    }

    /// Iterates the members if the value is an object.
    pub fn object_each(&self) -> Result<Option<ObjectIterator<'a>>> {
        ObjectIterator::new(*self)
    }

    /// Decodes the value with the default options.
    pub fn to_value(&self) -> Result<Value<'a>> {
        self.to_value_with(&DecodeOptions::default())
    }

    /// Decodes the value, this value counts as the root for the depth limit.
    pub fn to_value_with(&self, options: &DecodeOptions) -> Result<Value<'a>> {
        de::decode_value(self.type_tag, self.data, DepthTracker::new(options.max_depth))
    }

    /// Converts the value to compact JSON text.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        Ok(self.to_value()?.to_string())
    }
}
