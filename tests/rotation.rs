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

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use rotating_writer::ManualClock;
use rotating_writer::RotatingWriter;
use rotating_writer::SyncRotatingWriter;
use tempfile::TempDir;

#[test]
fn test_file_rolling_via_time_pattern() {
    test_file_rolling_for_specific_pattern(
        "%Y-%m-%d-%H-%M.log",
        SignedDuration::from_mins(1),
        SignedDuration::from_secs(7),
    );
    test_file_rolling_for_specific_pattern(
        "%Y-%m-%d-%H.log",
        SignedDuration::from_hours(1),
        SignedDuration::from_mins(7),
    );
    test_file_rolling_for_specific_pattern(
        "%Y/%m/%d.log",
        SignedDuration::from_hours(24),
        SignedDuration::from_hours(5),
    );
}

fn test_file_rolling_for_specific_pattern(
    pattern: &str,
    rotation_duration: SignedDuration,
    write_interval: SignedDuration,
) {
    let temp_dir = TempDir::new().unwrap();
    let start_time: Timestamp = "2024-08-10T00:00:00Z".parse().unwrap();
    let clock = ManualClock::new(start_time);
    let mut writer = RotatingWriter::builder(pattern)
        .basedir(temp_dir.path())
        .timezone(TimeZone::UTC)
        .buffer_capacity(128)
        .clock(clock.clone())
        .build()
        .unwrap();

    let periods = 10;
    let end_time = start_time.checked_add(rotation_duration * periods).unwrap();
    let mut expected = BTreeMap::<String, String>::new();
    let mut counter = 0;
    while clock.now() < end_time {
        let zoned = clock.now().to_zoned(TimeZone::UTC);
        let filename = jiff::fmt::strtime::format(pattern, &zoned).unwrap();
        let record = format!("record-{counter}");
        counter += 1;

        writer.write_line(record.as_bytes()).unwrap();
        expected.entry(filename).or_default().push_str(&record);
        clock.advance(write_interval);
    }
    writer.close().unwrap();

    assert_eq!(expected.len(), periods as usize);
    for (filename, records) in expected {
        let content = fs::read_to_string(temp_dir.path().join(&filename)).unwrap();
        assert_eq!(content.replace('\n', ""), records, "{filename}");
    }
}

#[test]
fn test_builder_rejects_invalid_pattern() {
    let err = RotatingWriter::builder("app-%").build().unwrap_err();
    assert_eq!(err.message(), "invalid time pattern");

    let err = RotatingWriter::builder("").build().unwrap_err();
    assert_eq!(err.message(), "pattern must not be empty");
}

#[test]
#[should_panic(expected = "failed to create rotating writer")]
fn test_new_panics_on_invalid_pattern() {
    let _ = RotatingWriter::new("app-%Y-%");
}

#[test]
fn test_shared_writer_rotates_across_days() {
    let temp_dir = TempDir::new().unwrap();
    let clock = ManualClock::new("2024-12-31T23:59:58Z".parse::<Timestamp>().unwrap());
    let writer = RotatingWriter::builder("%Y/%m%d.log")
        .basedir(temp_dir.path())
        .timezone(TimeZone::UTC)
        .clock(clock.clone())
        .build()
        .unwrap();
    let writer = SyncRotatingWriter::new(writer);

    writer.write_line(b"last of the year").unwrap();
    clock.advance(SignedDuration::from_secs(4));
    let mut shared = &writer;
    shared.write_all(b"first of the year").unwrap();
    writer.flush().unwrap();

    assert_eq!(
        writer.current_path(),
        Some(temp_dir.path().join("2025/0101.log"))
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("2024/1231.log")).unwrap(),
        "last of the year\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("2025/0101.log")).unwrap(),
        "first of the year"
    );
}
