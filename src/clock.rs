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

use std::sync::Arc;
use std::sync::Mutex;

use jiff::SignedDuration;
use jiff::Timestamp;

/// The source of "now" used to derive the current file path.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// Read the system clock on every call.
    #[default]
    DefaultClock,
    /// Return whatever instant the shared [`ManualClock`] was last set to.
    ManualClock(ManualClock),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::DefaultClock => Timestamp::now(),
            Clock::ManualClock(clock) => clock.now(),
        }
    }
}

impl From<ManualClock> for Clock {
    fn from(clock: ManualClock) -> Self {
        Clock::ManualClock(clock)
    }
}

/// A clock whose time only changes when told to.
///
/// Clones share the same instant, so a handle kept outside the writer can move the writer's time.
///
/// # Examples
///
/// ```
/// use jiff::Timestamp;
/// use rotating_writer::ManualClock;
/// use rotating_writer::RotatingWriter;
///
/// let clock = ManualClock::new("2024-08-10T00:00:00Z".parse::<Timestamp>().unwrap());
/// let writer = RotatingWriter::builder("logs/%Y%m%d.log")
///     .clock(clock.clone())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> ManualClock {
        ManualClock {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_now(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward (or backward, for a negative duration).
    ///
    /// # Panics
    ///
    /// Panics if the result falls outside the range jiff can represent.
    pub fn advance(&self, duration: SignedDuration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = now
            .checked_add(duration)
            .expect("manual clock advanced out of the supported timestamp range");
    }
}
