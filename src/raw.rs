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

use crate::error::Error;
use crate::error::Result;

/// The type of an encoded value, read without decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    /// Date, time, datetime or timestamp opaque value
    Temporal,
    /// Opaque value kept as raw bytes
    Opaque,
    /// Array with the number of elements
    Array(usize),
    /// Object with the number of members
    Object(usize),
}

/// Represents one binary JSON value wrapped around a raw, immutable slice of bytes.
///
/// It does not own the underlying data, so nested values can be inspected
/// and picked out of a document *without copying* or decoding the rest.
/// `data` starts at the value and may extend past its end, every length is
/// taken from the encoding itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJsonb<'a> {
    /// The type tag of the value.
    pub(crate) type_tag: u8,
    /// The bytes of the value.
    pub(crate) data: &'a [u8],
}

impl<'a> RawJsonb<'a> {
    /// Creates a new RawJsonb from a type tag and the value bytes.
    pub fn new(type_tag: u8, data: &'a [u8]) -> Self {
        Self { type_tag, data }
    }

    /// Creates a RawJsonb from a stored document, whose first byte is the
    /// type tag of the root value.
    pub fn from_document(document: &'a [u8]) -> Result<Self> {
        let (&type_tag, data) = document.split_first().ok_or(Error::Truncated)?;
        Ok(Self { type_tag, data })
    }

    pub fn type_tag(&self) -> u8 {
        self.type_tag
    }

    /// Checks if the value bytes are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the value bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Allows accessing the underlying value bytes as a reference.
impl AsRef<[u8]> for RawJsonb<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}
