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

// Binary JSON type tags
pub const SMALL_OBJECT_TAG: u8 = 0x00;
pub const LARGE_OBJECT_TAG: u8 = 0x01;
pub const SMALL_ARRAY_TAG: u8 = 0x02;
pub const LARGE_ARRAY_TAG: u8 = 0x03;
pub const LITERAL_TAG: u8 = 0x04;
pub const INT16_TAG: u8 = 0x05;
pub const UINT16_TAG: u8 = 0x06;
pub const INT32_TAG: u8 = 0x07;
pub const UINT32_TAG: u8 = 0x08;
pub const INT64_TAG: u8 = 0x09;
pub const UINT64_TAG: u8 = 0x0A;
pub const DOUBLE_TAG: u8 = 0x0B;
pub const STRING_TAG: u8 = 0x0C;
pub const OPAQUE_TAG: u8 = 0x0F;

// Literal payload bytes
pub const LITERAL_NULL: u8 = 0x00;
pub const LITERAL_TRUE: u8 = 0x01;
pub const LITERAL_FALSE: u8 = 0x02;

// Offset and size field widths
pub(crate) const SMALL_OFFSET_SIZE: usize = 2;
pub(crate) const LARGE_OFFSET_SIZE: usize = 4;

// A variable length fits in 5 bytes of 7 bits each
pub(crate) const MAX_VARIABLE_LENGTH_BYTES: usize = 5;

// Opaque field types, numbered after the MySQL column types
pub const FIELD_TYPE_TIMESTAMP: u8 = 7;
pub const FIELD_TYPE_DATE: u8 = 10;
pub const FIELD_TYPE_TIME: u8 = 11;
pub const FIELD_TYPE_DATETIME: u8 = 12;
pub const FIELD_TYPE_NEWDECIMAL: u8 = 246;

// Packed temporal values
pub(crate) const PACKED_TEMPORAL_SIZE: usize = 8;

// Binary decimals
pub(crate) const DECIMAL_MAX_PRECISION: u8 = 65;
pub(crate) const DECIMAL_MAX_SCALE: u8 = 30;
pub(crate) const DIGITS_PER_WORD: usize = 9;
pub(crate) const WORD_SIZE: usize = 4;
pub(crate) const DIG2BYTES: [usize; 10] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];
pub(crate) const DIGIT_WORD_BASE: u32 = 1_000_000_000;
