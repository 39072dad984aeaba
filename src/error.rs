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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding a binary JSON document.
///
/// Every error is terminal for the document being decoded, no partial
/// value is ever returned alongside one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A declared length or offset points past the end of the buffer.
    #[error("binary JSON value is truncated")]
    Truncated,
    /// The container header does not fit in the declared byte length.
    #[error("binary JSON container header is corrupt")]
    CorruptHeader,
    /// A variable-length string prefix does not fit in 32 bits.
    #[error("binary JSON variable length exceeds 32 bits")]
    LengthOverflow,
    #[error("invalid binary JSON literal 0x{0:02x}")]
    CorruptLiteral(u8),
    #[error("unknown binary JSON type 0x{0:02x}")]
    UnknownType(u8),
    /// Containers are nested deeper than the configured maximum.
    #[error("binary JSON document exceeds the maximum depth")]
    DepthExceeded,
    /// A temporal opaque payload is not a packed 8-byte integer.
    #[error("invalid binary JSON temporal value")]
    CorruptTemporal,
    /// A decimal opaque payload is malformed.
    #[error("invalid binary JSON decimal value")]
    CorruptDecimal,
}
