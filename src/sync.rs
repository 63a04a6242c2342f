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

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::tz::TimeZone;

use crate::rolling::RotatingWriter;

/// A [`RotatingWriter`] that can be shared between threads.
///
/// Every operation takes one lock, so deriving the path, swapping the file and buffering the bytes
/// happen as a single step and records from different threads never interleave.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use rotating_writer::RotatingWriter;
/// use rotating_writer::SyncRotatingWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = RotatingWriter::builder("%Y%m%d.log")
///     .basedir(dir.path())
///     .build()
///     .unwrap();
/// let writer = Arc::new(SyncRotatingWriter::new(writer));
///
/// let handles = (0..4)
///     .map(|i| {
///         let writer = writer.clone();
///         std::thread::spawn(move || writer.write_line(format!("worker {i}").as_bytes()))
///     })
///     .collect::<Vec<_>>();
/// for handle in handles {
///     handle.join().unwrap().unwrap();
/// }
/// writer.flush().unwrap();
/// ```
#[derive(Debug)]
pub struct SyncRotatingWriter {
    writer: Mutex<RotatingWriter>,
}

impl SyncRotatingWriter {
    pub fn new(writer: RotatingWriter) -> Self {
        let writer = Mutex::new(writer);
        Self { writer }
    }

    fn writer(&self) -> MutexGuard<'_, RotatingWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// See [`Write::write`] on [`RotatingWriter`].
    pub fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.writer().write(data)
    }

    /// See [`RotatingWriter::write_line`].
    pub fn write_line(&self, data: &[u8]) -> io::Result<usize> {
        self.writer().write_line(data)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer().flush()
    }

    /// See [`RotatingWriter::set_buffer_capacity`].
    pub fn set_buffer_capacity(&self, n: usize) {
        self.writer().set_buffer_capacity(n);
    }

    pub fn set_timezone(&self, timezone: TimeZone) {
        self.writer().set_timezone(timezone);
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.writer().current_path().map(|path| path.to_path_buf())
    }

    /// Take back the inner writer.
    pub fn into_inner(self) -> RotatingWriter {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl From<RotatingWriter> for SyncRotatingWriter {
    fn from(writer: RotatingWriter) -> Self {
        SyncRotatingWriter::new(writer)
    }
}

impl Write for &SyncRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer().flush()
    }
}
