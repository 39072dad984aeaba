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

use std::fmt;
use std::fmt::Write;

use super::constants::*;

static HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes `value` as a quoted JSON string, escaping quotes, backslashes and
/// control characters.
pub(crate) fn escape_string<W: Write>(value: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    let bytes = value.as_bytes();
    let mut last_start = 0;
    for (i, byte) in bytes.iter().enumerate() {
        // add backslash for escaped characters.
        let escaped = match *byte {
            BS => "\\\\",
            QU => "\\\"",
            BB => "\\b",
            FF => "\\f",
            NN => "\\n",
            RR => "\\r",
            TT => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        if i > last_start {
            out.write_str(&value[last_start..i])?;
        }
        if escaped.is_empty() {
            out.write_str("\\u00")?;
            out.write_char(HEX_DIGITS[(*byte >> 4) as usize] as char)?;
            out.write_char(HEX_DIGITS[(*byte & 0x0F) as usize] as char)?;
        } else {
            out.write_str(escaped)?;
        }
        last_start = i + 1;
    }
    if last_start < bytes.len() {
        out.write_str(&value[last_start..])?;
    }
    out.write_char('"')
}
