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

use super::header::ContainerHeader;
use super::header::ContainerKind;
use crate::error::Result;
use crate::RawJsonb;

/// Iterates the elements of an array without decoding them.
pub struct ArrayIterator<'a> {
    header: ContainerHeader<'a>,
    index: usize,
}

impl<'a> ArrayIterator<'a> {
    pub(crate) fn new(raw_jsonb: RawJsonb<'a>) -> Result<Option<Self>> {
        match ContainerKind::from_type_tag(raw_jsonb.type_tag) {
            Some((ContainerKind::Array, large)) => {
                let header = ContainerHeader::read(ContainerKind::Array, raw_jsonb.data, large)?;
                Ok(Some(Self { header, index: 0 }))
            }
            _ => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.header.element_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Iterator for ArrayIterator<'a> {
    type Item = Result<RawJsonb<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.header.element_count {
            return None;
        }
        let item = self
            .header
            .value_entry(self.index)
            .map(|entry| RawJsonb::new(entry.type_tag, entry.data));
        self.index += 1;
        Some(item)
    }
}

/// Iterates the members of an object in document order without decoding
/// the values.
pub struct ObjectIterator<'a> {
    header: ContainerHeader<'a>,
    index: usize,
}

impl<'a> ObjectIterator<'a> {
    pub(crate) fn new(raw_jsonb: RawJsonb<'a>) -> Result<Option<Self>> {
        match ContainerKind::from_type_tag(raw_jsonb.type_tag) {
            Some((ContainerKind::Object, large)) => {
                let header = ContainerHeader::read(ContainerKind::Object, raw_jsonb.data, large)?;
                Ok(Some(Self { header, index: 0 }))
            }
            _ => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.header.element_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_member(&self, index: usize) -> Result<(Cow<'a, str>, RawJsonb<'a>)> {
        let key = self.header.key(index)?;
        let entry = self.header.value_entry(index)?;
        Ok((key, RawJsonb::new(entry.type_tag, entry.data)))
    }
}

impl<'a> Iterator for ObjectIterator<'a> {
    type Item = Result<(Cow<'a, str>, RawJsonb<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.header.element_count {
            return None;
        }
        let item = self.read_member(self.index);
        self.index += 1;
        Some(item)
    }
}
