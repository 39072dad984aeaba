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

//! `mysql-jsonb` decodes the binary `JSON` format MySQL uses to store `JSON` columns and to ship them in row-based replication events. It turns a stored document into a [`Value`] tree that renders as standard `JSON` text.
//!
//! ## Features
//!
//! - Zero copy: strings and keys borrow from the input buffer whenever they are valid UTF-8.
//! - Safe on untrusted input: every offset and length is bounds checked, malformed documents fail with a typed [`Error`] and never panic.
//! - Bounded nesting: the decoder tracks depth explicitly and rejects documents nested deeper than [`DecodeOptions::max_depth`].
//! - Lazy inspection: [`RawJsonb`] reads types, lengths, keys and members straight from the encoding without decoding the rest.
//!
//! ## Encoding format
//!
//! A document is one type byte followed by the value. Objects and arrays come in a small
//! variant with 2-byte offsets and a large variant with 4-byte offsets, all integers are little-endian.
//!
//! - Type tags: `0x00` small object, `0x01` large object, `0x02` small array, `0x03` large array,
//!   `0x04` literal, `0x05` int16, `0x06` uint16, `0x07` int32, `0x08` uint32, `0x09` int64,
//!   `0x0A` uint64, `0x0B` double, `0x0C` string, `0x0F` opaque.
//! - Container: element count, total byte length, then one key entry `(offset, length)` per member
//!   for objects, one value entry `(type, offset or inlined value)` per element, then the keys and
//!   out-of-line values. Offsets are relative to the start of the container.
//! - Inlining: literals and 16-bit integers are stored inside their value entry, 32-bit integers only
//!   in large containers.
//! - Strings: a variable length prefix of up to 5 bytes, 7 bits each, followed by UTF-8 bytes.
//! - Opaque: a MySQL field type byte, a variable length prefix and the payload. Dates, times and
//!   decimals are decoded, anything else is rendered as `"base64:type<N>:<data>"`.
//!
//! #### An encoding example
//!
//! ```text
//! // JSON value
//! {"a":1}
//!
//! // binary encoding
//! 0x00          small object type
//! 0x0100        element count (1)
//! 0x0c00        byte length (12)
//! 0x0b00 0x0100 key entry (offset 11, length 1)
//! 0x05 0x0100   value entry (int16, inlined value 1)
//! 0x61          key ("a")
//! ```
//!
//! ```rust
//! let data = b"\x00\x01\x00\x0C\x00\x0B\x00\x01\x00\x05\x01\x00a";
//! assert_eq!(mysql_jsonb::to_string(data).unwrap(), r#"{"a":1}"#);
//!
//! let raw = mysql_jsonb::RawJsonb::from_document(data).unwrap();
//! let member = raw.get_by_key("a").unwrap().unwrap();
//! assert_eq!(member.to_value().unwrap().as_i64(), Some(1));
//! ```

#![allow(clippy::uninlined_format_args)]

mod constants;
mod core;
mod error;
mod from;
mod number;
mod options;
mod raw;
mod temporal;
mod util;
mod value;

pub use constants::JSON_DOCUMENT_MAX_DEPTH;
pub use crate::core::constants as tags;
pub use crate::core::decode;
pub use crate::core::from_slice;
pub use crate::core::to_string;
pub use crate::core::ArrayIterator;
pub use crate::core::Decoder;
pub use crate::core::ObjectIterator;
pub use error::Error;
pub use error::Result;
pub use number::Decimal;
pub use number::Number;
pub use options::DecodeOptions;
pub use raw::RawJsonb;
pub use raw::ValueType;
pub use temporal::Temporal;
pub use temporal::TemporalKind;
pub use value::*;
