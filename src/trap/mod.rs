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

//! Traps for errors that must not fail the current call.
//!
//! Retiring a superseded file and flushing on drop can both fail, but neither failure belongs to
//! the caller of the write that triggered it. Such errors are handed to a [`Trap`] instead.

use std::fmt;

use crate::Error;

pub use self::default::DefaultTrap;
pub use self::logging::LogTrap;

mod default;
mod logging;

/// A trap for errors that the rotating writer cannot return to the caller.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error that would otherwise be discarded.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
