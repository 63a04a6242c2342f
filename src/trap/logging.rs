// Copyright 2024 FastLabs Developers
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

use crate::Error;
use crate::trap::Trap;

/// A trap that forwards errors to the [`log`] facade at warn level.
///
/// Do not install this trap on a writer that also backs the global logger: the warning would be
/// routed back into the writer that reported it.
#[derive(Debug)]
pub struct LogTrap {
    target: &'static str,
}

impl Default for LogTrap {
    fn default() -> Self {
        Self {
            target: module_path!(),
        }
    }
}

impl LogTrap {
    /// Set the log target that trapped errors are reported under.
    ///
    /// Default to the module path of this crate.
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }
}

impl Trap for LogTrap {
    fn trap(&self, err: &Error) {
        log::warn!(target: self.target, "{err}");
    }
}
