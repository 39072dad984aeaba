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

use super::constants::*;
use crate::error::Error;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    /// Returns the container kind and offset width selected by a type tag.
    pub(crate) fn from_type_tag(type_tag: u8) -> Option<(ContainerKind, bool)> {
        match type_tag {
            SMALL_OBJECT_TAG => Some((ContainerKind::Object, false)),
            LARGE_OBJECT_TAG => Some((ContainerKind::Object, true)),
            SMALL_ARRAY_TAG => Some((ContainerKind::Array, false)),
            LARGE_ARRAY_TAG => Some((ContainerKind::Array, true)),
            _ => None,
        }
    }
}

#[inline]
pub(crate) fn offset_size(large: bool) -> usize {
    if large {
        LARGE_OFFSET_SIZE
    } else {
        SMALL_OFFSET_SIZE
    }
}

#[inline]
fn key_entry_size(large: bool) -> usize {
    2 * offset_size(large)
}

#[inline]
fn value_entry_size(large: bool) -> usize {
    1 + offset_size(large)
}

/// Reads a 2 or 4 byte little-endian offset or size field at `index`.
pub(crate) fn read_offset_or_size(data: &[u8], index: usize, large: bool) -> Result<usize> {
    let end = index
        .checked_add(offset_size(large))
        .ok_or(Error::Truncated)?;
    let bytes = data.get(index..end).ok_or(Error::Truncated)?;
    let value = if large {
        LittleEndian::read_u32(bytes) as usize
    } else {
        LittleEndian::read_u16(bytes) as usize
    };
    Ok(value)
}

/// Returns whether a value of `type_tag` is stored inside its value entry.
///
/// Literals and 16-bit integers always fit the payload slot, 32-bit
/// integers only fit the 4-byte slot of large containers.
#[inline]
pub(crate) fn is_inlined(type_tag: u8, large: bool) -> bool {
    match type_tag {
        LITERAL_TAG | INT16_TAG | UINT16_TAG => true,
        INT32_TAG | UINT32_TAG => large,
        _ => false,
    }
}

/// Size of the length fields plus the key and value entry tables.
pub(crate) fn header_size(kind: ContainerKind, element_count: usize, large: bool) -> Option<usize> {
    let mut entry_size = value_entry_size(large);
    if kind == ContainerKind::Object {
        entry_size += key_entry_size(large);
    }
    element_count
        .checked_mul(entry_size)?
        .checked_add(2 * offset_size(large))
}

/// One value entry of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValueEntry<'a> {
    pub(crate) type_tag: u8,
    /// Whether `data` is the payload slot of the entry itself
    pub(crate) inlined: bool,
    /// The payload slot for inlined values, otherwise the bytes from the
    /// value offset up to the end of the container.
    pub(crate) data: &'a [u8],
}

/// The validated header of an object or array.
///
/// `data` is cut to the declared byte length, so every key and value
/// resolved through the header stays inside the container.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContainerHeader<'a> {
    pub(crate) kind: ContainerKind,
    pub(crate) large: bool,
    pub(crate) element_count: usize,
    header_size: usize,
    data: &'a [u8],
}

impl<'a> ContainerHeader<'a> {
    pub(crate) fn read(kind: ContainerKind, data: &'a [u8], large: bool) -> Result<Self> {
        let offset_size = offset_size(large);
        // Both length fields must be present.
        if data.len() < 2 * offset_size {
            return Err(Error::Truncated);
        }
        let element_count = read_offset_or_size(data, 0, large)?;
        let byte_length = read_offset_or_size(data, offset_size, large)?;
        if byte_length > data.len() {
            return Err(Error::Truncated);
        }
        let header_size = match header_size(kind, element_count, large) {
            Some(size) if size <= byte_length => size,
            _ => return Err(Error::CorruptHeader),
        };

        Ok(Self {
            kind,
            large,
            element_count,
            header_size,
            data: &data[..byte_length],
        })
    }

    #[inline]
    fn offset_size(&self) -> usize {
        offset_size(self.large)
    }

    /// Keys and out-of-line values live after the entry tables, an offset
    /// into the header would let a value contain itself.
    #[inline]
    fn check_data_offset(&self, offset: usize) -> Result<()> {
        if offset < self.header_size {
            return Err(Error::CorruptHeader);
        }
        Ok(())
    }

    fn key_entry_offset(&self, index: usize) -> usize {
        2 * self.offset_size() + index * key_entry_size(self.large)
    }

    fn value_entry_offset(&self, index: usize) -> usize {
        let mut offset = 2 * self.offset_size();
        if self.kind == ContainerKind::Object {
            offset += self.element_count * key_entry_size(self.large);
        }
        offset + index * value_entry_size(self.large)
    }

    /// Returns the raw bytes of the key at `index`.
    pub(crate) fn key_bytes(&self, index: usize) -> Result<&'a [u8]> {
        debug_assert_eq!(self.kind, ContainerKind::Object);
        let entry_offset = self.key_entry_offset(index);
        let key_offset = read_offset_or_size(self.data, entry_offset, self.large)?;
        let key_length =
            read_offset_or_size(self.data, entry_offset + self.offset_size(), self.large)?;
        self.check_data_offset(key_offset)?;
        let end = key_offset
            .checked_add(key_length)
            .ok_or(Error::Truncated)?;
        self.data.get(key_offset..end).ok_or(Error::Truncated)
    }

    /// Returns the key at `index`, invalid UTF-8 is replaced.
    pub(crate) fn key(&self, index: usize) -> Result<Cow<'a, str>> {
        let bytes = self.key_bytes(index)?;
        Ok(String::from_utf8_lossy(bytes))
    }

    /// Reads the value entry at `index` and resolves its payload.
    pub(crate) fn value_entry(&self, index: usize) -> Result<ValueEntry<'a>> {
        let entry_offset = self.value_entry_offset(index);
        let type_tag = *self.data.get(entry_offset).ok_or(Error::Truncated)?;
        let payload_offset = entry_offset + 1;
        if is_inlined(type_tag, self.large) {
            let end = payload_offset + self.offset_size();
            let data = self
                .data
                .get(payload_offset..end)
                .ok_or(Error::Truncated)?;
            return Ok(ValueEntry {
                type_tag,
                inlined: true,
                data,
            });
        }
        let value_offset = read_offset_or_size(self.data, payload_offset, self.large)?;
        self.check_data_offset(value_offset)?;
        let data = self.data.get(value_offset..).ok_or(Error::Truncated)?;
        Ok(ValueEntry {
            type_tag,
            inlined: false,
            data,
        })
    }
}
