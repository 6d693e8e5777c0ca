#![allow(dead_code)]

use commitscope_core::LineRecord;
use time::{Duration, OffsetDateTime};

/// Builds a record the way the log producer would emit it for `timestamp`.
pub fn record(commit: &str, file: &str, length: u32, timestamp: OffsetDateTime) -> LineRecord {
    let file_type = file.rsplit('.').next().unwrap_or("txt").to_owned();
    LineRecord {
        commit_id: commit.to_owned(),
        file: file.to_owned(),
        file_type,
        line: 1,
        depth: 0,
        length,
        author: "emily".to_owned(),
        date: timestamp.date(),
        time: timestamp.time(),
        timezone: timestamp.offset(),
        timestamp,
    }
}

/// `n` records of one commit on one file.
pub fn lines(commit: &str, file: &str, n: usize, length: u32, at: OffsetDateTime) -> Vec<LineRecord> {
    (0..n)
        .map(|i| LineRecord {
            line: i as u32 + 1,
            ..record(commit, file, length, at)
        })
        .collect()
}

/// `count` single-line commits one day apart starting at `start`.
pub fn daily_commits(count: usize, start: OffsetDateTime) -> Vec<LineRecord> {
    (0..count)
        .map(|i| record(&format!("c{i:03}"), "src/app.js", 10, start + Duration::days(i as i64)))
        .collect()
}

pub const CSV_HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length";
