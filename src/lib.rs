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

//! A buffered append-only file writer that rotates files by a time pattern.
//!
//! # Overview
//!
//! [`RotatingWriter`] renders a strftime-style [`Pattern`] against the current time on every
//! write. Whenever the rendered path changes, the writer switches to the new file, creating any
//! missing parent directories. Writes are staged in an in-memory buffer and reach the disk when
//! the buffer runs out of room, on flush, on close, or when the writer is dropped.
//!
//! # Examples
//!
//! One file per day:
//!
//! ```
//! use std::io::Write;
//!
//! use rotating_writer::RotatingWriter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut writer = RotatingWriter::builder("app-%Y%m%d.log")
//!     .basedir(dir.path())
//!     .build()
//!     .unwrap();
//!
//! writer.write_all(b"first record").unwrap();
//! writer.write_line(b"second record").unwrap();
//! writer.close().unwrap();
//! ```
//!
//! Hourly files in a directory tree, with a larger buffer and a fixed time zone:
//!
//! ```
//! use jiff::tz::TimeZone;
//! use rotating_writer::RotatingWriter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut writer = RotatingWriter::builder("%Y/%m/%d/%H.log")
//!     .basedir(dir.path())
//!     .timezone(TimeZone::UTC)
//!     .buffer_capacity(64 * 1024)
//!     .build()
//!     .unwrap();
//!
//! writer.write_line(b"hello").unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod trap;

pub use self::clock::Clock;
pub use self::clock::ManualClock;
pub use self::error::Error;
pub use self::pattern::Pattern;
pub use self::rolling::DEFAULT_BUFFER_CAPACITY;
pub use self::rolling::RotatingWriter;
pub use self::rolling::RotatingWriterBuilder;
pub use self::sync::SyncRotatingWriter;
pub use self::trap::Trap;

mod clock;
mod error;
mod pattern;
mod rolling;
mod sync;
