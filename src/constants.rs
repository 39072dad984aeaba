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

/// Default maximum nesting depth of a document.
pub const JSON_DOCUMENT_MAX_DEPTH: usize = 100;

// JSON text escape characters constants
pub(crate) const BS: u8 = 0x5C; // \\ Backslash
pub(crate) const QU: u8 = 0x22; // \" Double quotation mark
pub(crate) const BB: u8 = 0x08; // \b Backspace
pub(crate) const FF: u8 = 0x0C; // \f Formfeed Page Break
pub(crate) const NN: u8 = 0x0A; // \n Newline
pub(crate) const RR: u8 = 0x0D; // \r Carriage Return
pub(crate) const TT: u8 = 0x09; // \t Horizontal Tab

// Opaque values rendered as text
pub(crate) const OPAQUE_PREFIX: &str = "base64:type";

pub(crate) const TYPE_STRING: &str = "string";
pub(crate) const TYPE_NULL: &str = "null";
pub(crate) const TYPE_BOOLEAN: &str = "boolean";
pub(crate) const TYPE_NUMBER: &str = "number";
pub(crate) const TYPE_ARRAY: &str = "array";
pub(crate) const TYPE_OBJECT: &str = "object";
pub(crate) const TYPE_OPAQUE: &str = "opaque";
