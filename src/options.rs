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

use crate::constants::JSON_DOCUMENT_MAX_DEPTH;

/// Configuration options for decoding binary JSON documents.
///
/// # Examples
///
/// ```rust
/// use mysql_jsonb::DecodeOptions;
///
/// let options = DecodeOptions::default().with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested values a document may contain.
    ///
    /// The root value is at depth 1 and every member stored out of line sits
    /// one level below its container. Deeper documents fail with [`Error::DepthExceeded`](crate::Error::DepthExceeded).
    ///
    /// # Default
    ///
    /// [`JSON_DOCUMENT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: JSON_DOCUMENT_MAX_DEPTH,
        }
    }
}
