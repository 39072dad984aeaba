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

/// Nesting depth of the value being decoded.
///
/// Passed by value into every recursive call so the limit does not depend
/// on the size of the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DepthTracker {
    depth: usize,
    max_depth: usize,
}

impl DepthTracker {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Enters one nested value, failing once the limit is exceeded.
    pub(crate) fn descend(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(Error::DepthExceeded);
        }
        Ok(Self { depth, ..self })
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }
}
