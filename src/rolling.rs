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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::Error;
use crate::Trap;
use crate::clock::Clock;
use crate::pattern::Pattern;
use crate::trap::DefaultTrap;

/// The default in-memory buffer size, one common storage page.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// A buffered append-only writer whose target file follows a time pattern.
///
/// Every write renders the pattern against the current time. When the rendered path differs from
/// the file currently open, the writer opens (creating parent directories as needed) the new file
/// and retires the old one. Bytes are staged in a buffer of [`buffer_capacity`] bytes and reach
/// the file when the buffer runs out of room, on [`flush`], on [`close`], or on drop.
///
/// The writer is not synchronized; wrap it in a [`SyncRotatingWriter`] to share it.
///
/// [`buffer_capacity`]: RotatingWriter::buffer_capacity
/// [`flush`]: Write::flush
/// [`close`]: RotatingWriter::close
/// [`SyncRotatingWriter`]: crate::SyncRotatingWriter
#[derive(Debug)]
pub struct RotatingWriter {
    state: State,
    active: Option<ActiveFile>,
}

impl RotatingWriter {
    /// Creates a new [`RotatingWriter`] with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid, since no path could ever be derived from it. Use
    /// [`RotatingWriter::builder`] to handle the error instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotating_writer::RotatingWriter;
    ///
    /// let writer = RotatingWriter::new("logs/app-%Y%m%d.log");
    /// ```
    pub fn new(pattern: impl Into<String>) -> Self {
        match RotatingWriterBuilder::new(pattern).build() {
            Ok(writer) => writer,
            Err(err) => panic!("failed to create rotating writer: {err}"),
        }
    }

    /// Creates a new [`RotatingWriterBuilder`].
    #[must_use]
    pub fn builder(pattern: impl Into<String>) -> RotatingWriterBuilder {
        RotatingWriterBuilder::new(pattern)
    }

    /// Set the buffer capacity in bytes.
    ///
    /// The open buffer keeps its size; the new capacity applies from the next rotation. Zero
    /// disables buffering.
    pub fn set_buffer_capacity(&mut self, n: usize) {
        self.state.buffer_capacity = n;
    }

    /// Set the time zone used to interpret "now" for subsequent writes.
    pub fn set_timezone(&mut self, timezone: TimeZone) {
        self.state.timezone = timezone;
    }

    /// Return the capacity that the next buffer will be created with.
    pub fn buffer_capacity(&self) -> usize {
        self.state.buffer_capacity
    }

    pub fn timezone(&self) -> &TimeZone {
        &self.state.timezone
    }

    pub fn pattern(&self) -> &Pattern {
        &self.state.pattern
    }

    /// Return the path of the file currently open, if any write has succeeded yet.
    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|active| active.path.as_path())
    }

    /// Write the bytes followed by a single newline.
    ///
    /// Room for the payload and the newline is made up front, so both land in the same buffer
    /// generation. Returns `data.len() + 1` on success, or the first error encountered.
    pub fn write_line(&mut self, data: &[u8]) -> io::Result<usize> {
        let len = data.len() + 1;
        let writer = self.active_writer()?;
        reserve(writer, len)?;
        writer.write_all(data)?;
        writer.write_all(b"\n")?;
        Ok(len)
    }

    /// Flush and close the current file, reporting any flush error.
    pub fn close(mut self) -> io::Result<()> {
        match self.active.take() {
            Some(mut active) => active.writer.flush(),
            None => Ok(()),
        }
    }

    fn active_writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        let path = self.state.current_path()?;
        let active = match self.active.take() {
            Some(active) if active.path == path => self.active.insert(active),
            previous => {
                let opened = match self.state.open(path) {
                    Ok(opened) => opened,
                    Err(err) => {
                        self.active = previous;
                        return Err(err);
                    }
                };
                if let Some(previous) = previous {
                    self.state.retire(previous);
                }
                self.active.insert(opened)
            }
        };
        Ok(&mut active.writer)
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = self.active_writer()?;
        reserve(writer, buf.len())?;
        writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.active.as_mut() {
            Some(active) => active.writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for RotatingWriter {
    fn drop(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if let Err(err) = active.writer.flush() {
            let err = Error::new("failed to flush file writer on drop")
                .with_context("path", active.path.display())
                .with_source(err);
            self.state.trap.trap(&err);
        }
    }
}

/// Flush the buffer first if it cannot take `len` more bytes.
fn reserve(writer: &mut BufWriter<File>, len: usize) -> io::Result<()> {
    let spare = writer.capacity() - writer.buffer().len();
    if spare < len {
        writer.flush()?;
    }
    Ok(())
}

/// A builder for configuring [`RotatingWriter`].
#[derive(Debug)]
pub struct RotatingWriterBuilder {
    // required
    pattern: String,

    // has default
    basedir: Option<PathBuf>,
    timezone: TimeZone,
    buffer_capacity: usize,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl RotatingWriterBuilder {
    /// Creates a new [`RotatingWriterBuilder`].
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            basedir: None,
            timezone: TimeZone::system(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            clock: Clock::DefaultClock,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the directory that relative rendered paths are resolved against.
    ///
    /// Default to the process working directory.
    #[must_use]
    pub fn basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = Some(basedir.into());
        self
    }

    /// Set the time zone used to interpret "now".
    ///
    /// Default to the system time zone.
    #[must_use]
    pub fn timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the buffer capacity in bytes.
    ///
    /// Default to [`DEFAULT_BUFFER_CAPACITY`]. Zero disables buffering.
    #[must_use]
    pub fn buffer_capacity(mut self, n: usize) -> Self {
        self.buffer_capacity = n;
        self
    }

    /// Set the clock that supplies "now".
    ///
    /// Default to the system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Into<Clock>) -> Self {
        self.clock = clock.into();
        self
    }

    /// Set the trap for errors that cannot be returned to the caller.
    ///
    /// Default to [`DefaultTrap`].
    #[must_use]
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Builds the [`RotatingWriter`].
    ///
    /// No file is opened until the first write.
    ///
    /// # Errors
    ///
    /// Return an error if the pattern is empty or invalid.
    pub fn build(self) -> Result<RotatingWriter, Error> {
        let Self {
            pattern,
            basedir,
            timezone,
            buffer_capacity,
            clock,
            trap,
        } = self;

        let pattern = Pattern::new(pattern)?;
        let state = State {
            pattern,
            basedir,
            timezone,
            buffer_capacity,
            clock,
            trap,
        };
        Ok(RotatingWriter {
            state,
            active: None,
        })
    }
}

#[derive(Debug)]
struct ActiveFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

#[derive(Debug)]
struct State {
    pattern: Pattern,
    basedir: Option<PathBuf>,
    timezone: TimeZone,
    buffer_capacity: usize,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl State {
    fn current_path(&self) -> io::Result<PathBuf> {
        let now = self.clock.now().to_zoned(self.timezone.clone());
        let rendered = self
            .pattern
            .format(&now)
            .map_err(|err| err.into_io_error(io::ErrorKind::InvalidInput))?;
        Ok(match &self.basedir {
            Some(basedir) => basedir.join(rendered),
            None => PathBuf::from(rendered),
        })
    }

    fn open(&self, path: PathBuf) -> io::Result<ActiveFile> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| {
                Error::wrap_io("failed to create log directory", "dir", dir.display(), err)
            })?;
        }

        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        let file = options.open(&path).map_err(|err| {
            Error::wrap_io("failed to open log file", "path", path.display(), err)
        })?;

        let writer = BufWriter::with_capacity(self.buffer_capacity, file);
        Ok(ActiveFile { path, writer })
    }

    fn retire(&self, mut previous: ActiveFile) {
        if let Err(err) = previous.writer.flush() {
            let err = Error::new("failed to flush superseded file")
                .with_context("path", previous.path.display())
                .with_source(err);
            self.trap.trap(&err);
        }
    }
}
