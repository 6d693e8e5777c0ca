//! Line record parser.
//!
//! Converts raw log rows (field name → string) into typed [`LineRecord`]s.
//! Parsing is all-or-nothing: the first malformed row aborts the dataset so
//! that every aggregate downstream is computed over the complete log.

use std::collections::HashMap;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time, UtcOffset};

use crate::types::LineRecord;

/// One raw row of the change log, keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Column names every raw row must carry.
pub const FIELDS: [&str; 11] = [
    "commit", "author", "date", "time", "timezone", "datetime", "file", "type", "line", "depth",
    "length",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("row {row}: missing field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: field `{field}` is not a non-negative integer: {value:?}")]
    InvalidInteger {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: field `{field}` is not a valid {expected}: {value:?}")]
    InvalidTemporal {
        row: usize,
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ParseError {
    /// Index of the offending row.
    pub fn row(&self) -> usize {
        match self {
            ParseError::MissingField { row, .. }
            | ParseError::InvalidInteger { row, .. }
            | ParseError::InvalidTemporal { row, .. } => *row,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::MissingField { field, .. }
            | ParseError::InvalidInteger { field, .. }
            | ParseError::InvalidTemporal { field, .. } => field,
        }
    }
}

/// Parses every row, failing on the first malformed one.
pub fn parse_rows<'a, I>(rows: I) -> Result<Vec<LineRecord>, ParseError>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect()
}

/// Parses a single row. `index` is only used for error reporting.
///
/// Missing columns are reported in [`FIELDS`] order before any value is
/// parsed.
pub fn parse_row(index: usize, row: &RawRow) -> Result<LineRecord, ParseError> {
    if let Some(field) = FIELDS.into_iter().find(|f| !row.contains_key(*f)) {
        return Err(ParseError::MissingField { row: index, field });
    }
    let fields = Fields { index, row };

    let line = fields.integer("line")?;
    if line == 0 {
        return Err(ParseError::InvalidInteger {
            row: index,
            field: "line",
            value: "0".to_owned(),
        });
    }

    Ok(LineRecord {
        commit_id: fields.text("commit")?.to_owned(),
        file: fields.text("file")?.to_owned(),
        file_type: fields.text("type")?.to_owned(),
        line,
        depth: fields.integer("depth")?,
        length: fields.integer("length")?,
        author: fields.text("author")?.to_owned(),
        date: fields.date("date")?,
        time: fields.time_of_day("time")?,
        timezone: fields.offset("timezone")?,
        timestamp: fields.datetime("datetime")?,
    })
}

struct Fields<'a> {
    index: usize,
    row: &'a RawRow,
}

impl<'a> Fields<'a> {
    fn text(&self, field: &'static str) -> Result<&'a str, ParseError> {
        self.row
            .get(field)
            .map(|v| v.trim())
            .ok_or(ParseError::MissingField {
                row: self.index,
                field,
            })
    }

    fn integer(&self, field: &'static str) -> Result<u32, ParseError> {
        let raw = self.text(field)?;
        raw.parse::<u32>().map_err(|_| ParseError::InvalidInteger {
            row: self.index,
            field,
            value: raw.to_owned(),
        })
    }

    fn temporal_error(&self, field: &'static str, expected: &'static str, value: &str) -> ParseError {
        ParseError::InvalidTemporal {
            row: self.index,
            field,
            expected,
            value: value.to_owned(),
        }
    }

    fn date(&self, field: &'static str) -> Result<Date, ParseError> {
        let raw = self.text(field)?;
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .map_err(|_| self.temporal_error(field, "date", raw))
    }

    /// Accepts `HH:MM:SS` optionally followed by an offset, which is ignored
    /// here because the `timezone` column carries it.
    fn time_of_day(&self, field: &'static str) -> Result<Time, ParseError> {
        let raw = self.text(field)?;
        let clock = raw.get(..8).unwrap_or(raw);
        Time::parse(clock, format_description!("[hour]:[minute]:[second]"))
            .map_err(|_| self.temporal_error(field, "time of day", raw))
    }

    fn offset(&self, field: &'static str) -> Result<UtcOffset, ParseError> {
        let raw = self.text(field)?;
        if raw.eq_ignore_ascii_case("z") {
            return Ok(UtcOffset::UTC);
        }
        UtcOffset::parse(
            raw,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map_err(|_| self.temporal_error(field, "timezone offset", raw))
    }

    fn datetime(&self, field: &'static str) -> Result<OffsetDateTime, ParseError> {
        let raw = self.text(field)?;
        OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| self.temporal_error(field, "datetime", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn valid() -> RawRow {
        row(&[
            ("commit", "abc123"),
            ("author", "emily"),
            ("date", "2025-02-11"),
            ("time", "09:30:00-08:00"),
            ("timezone", "-08:00"),
            ("datetime", "2025-02-11T09:30:00-08:00"),
            ("file", "meta/main.js"),
            ("type", "js"),
            ("line", "12"),
            ("depth", "2"),
            ("length", "140"),
        ])
    }

    #[test]
    fn parses_a_complete_row() {
        let rec = parse_row(0, &valid()).unwrap();
        assert_eq!(rec.commit_id, "abc123");
        assert_eq!(rec.line, 12);
        assert_eq!(rec.length, 140);
        assert_eq!(rec.timestamp.hour(), 9);
        assert_eq!(rec.timezone.whole_hours(), -8);
        assert_eq!(rec.day_start().offset(), rec.timezone);
        assert_eq!(rec.day_start().date(), rec.date);
    }

    #[test]
    fn reports_the_first_missing_column() {
        let mut r = valid();
        r.remove("line");
        r.remove("author");
        assert_eq!(
            parse_row(2, &r).unwrap_err(),
            ParseError::MissingField { row: 2, field: "author" }
        );
        for field in FIELDS {
            let mut r = valid();
            r.remove(field);
            assert_eq!(parse_row(0, &r).unwrap_err().field(), field);
        }
    }

    #[test]
    fn rejects_non_numeric_length() {
        let mut r = valid();
        r.insert("length".into(), "lots".into());
        let err = parse_row(4, &r).unwrap_err();
        assert_eq!(err.row(), 4);
        assert_eq!(err.field(), "length");
    }

    #[test]
    fn rejects_negative_depth() {
        let mut r = valid();
        r.insert("depth".into(), "-1".into());
        assert!(matches!(
            parse_row(0, &r),
            Err(ParseError::InvalidInteger { field: "depth", .. })
        ));
    }

    #[test]
    fn rejects_bad_timezone() {
        let mut r = valid();
        r.insert("timezone".into(), "PST".into());
        assert_eq!(parse_row(0, &r).unwrap_err().field(), "timezone");
    }

    #[test]
    fn one_bad_row_aborts_everything() {
        let mut bad = valid();
        bad.remove("datetime");
        let rows = vec![valid(), bad, valid()];
        let err = parse_rows(&rows).unwrap_err();
        assert_eq!(err, ParseError::MissingField { row: 1, field: "datetime" });
    }
}
