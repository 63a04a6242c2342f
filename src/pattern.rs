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

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::Error;

/// A validated strftime-style pattern that maps an instant to a file path.
///
/// Directives follow [`jiff::fmt::strtime`], e.g. `logs/%Y/%m/%d.log`. Path separators in the
/// pattern are kept as-is, so one pattern can spread files over a directory tree.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
}

impl Pattern {
    /// Parse and validate a pattern.
    ///
    /// # Errors
    ///
    /// Return an error if the pattern is empty or contains a directive that cannot be formatted.
    pub fn new(raw: impl Into<String>) -> Result<Self, Error> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(Error::new("pattern must not be empty"));
        }

        let pattern = Pattern { raw };
        let probe = Timestamp::UNIX_EPOCH.to_zoned(TimeZone::UTC);
        pattern
            .format(&probe)
            .map_err(|err| Error::new("invalid time pattern").with_source(err))?;
        Ok(pattern)
    }

    /// Return the pattern as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Render the pattern for the given zoned instant.
    pub fn format(&self, now: &Zoned) -> Result<String, Error> {
        strtime::format(&self.raw, now).map_err(|err| {
            Error::new("failed to format time pattern")
                .with_context("pattern", &self.raw)
                .with_source(err)
        })
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.raw)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
