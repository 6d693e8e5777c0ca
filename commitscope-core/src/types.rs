use time::{Date, OffsetDateTime, Time, UtcOffset};

/// One changed source line attributed to a single commit.
///
/// Produced by [`crate::parse::parse_rows`] and never mutated afterwards. Many
/// records share a `commit_id`; the aggregator folds them into a [`Commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub commit_id: String,
    /// Repository-relative path of the file the line belongs to.
    pub file: String,
    /// Language / extension tag, e.g. `js`, `css`, `html`.
    pub file_type: String,
    /// 1-based line number within the file after the change.
    pub line: u32,
    /// Indentation depth reported by the log producer.
    pub depth: u32,
    /// Length of the whole file (in lines) after the change.
    pub length: u32,
    pub author: String,
    /// Calendar date of the commit in the author's timezone.
    pub date: Date,
    /// Local time of day of the commit.
    pub time: Time,
    pub timezone: UtcOffset,
    /// Absolute commit time carrying the author's UTC offset.
    pub timestamp: OffsetDateTime,
}

impl LineRecord {
    /// Midnight of `date` in the record's own timezone.
    pub fn day_start(&self) -> OffsetDateTime {
        self.date.midnight().assume_offset(self.timezone)
    }
}

/// Aggregate over every [`LineRecord`] sharing one commit id.
///
/// Fields are private: a `Commit` is built once by the aggregator and shared
/// read-only (behind `Arc`) by every downstream stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    ordinal: usize,
    id: String,
    author: String,
    timestamp: OffsetDateTime,
    hour_fraction: f64,
    additions: usize,
    deletions: usize,
    records: Vec<LineRecord>,
}

impl Commit {
    pub(crate) fn new(
        ordinal: usize,
        timestamp: OffsetDateTime,
        records: Vec<LineRecord>,
        deletions: usize,
    ) -> Self {
        let (id, author) = records
            .first()
            .map(|r| (r.commit_id.clone(), r.author.clone()))
            .unwrap_or_default();
        Self {
            ordinal,
            id,
            author,
            timestamp,
            hour_fraction: hour_fraction(timestamp),
            additions: records.len(),
            deletions,
            records,
        }
    }

    /// Position of this commit in the timestamp-sorted sequence.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// `hour + minute / 60` in the author's local time, always in `[0, 24)`.
    pub fn hour_fraction(&self) -> f64 {
        self.hour_fraction
    }

    /// Number of line records in the commit.
    pub fn total_lines(&self) -> usize {
        self.records.len()
    }

    pub fn additions(&self) -> usize {
        self.additions
    }

    pub fn deletions(&self) -> usize {
        self.deletions
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    /// Number of distinct files touched by the commit.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.records.iter().map(|r| r.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    /// True between 06:00 (inclusive) and 18:00 (exclusive) local time.
    pub fn is_daytime(&self) -> bool {
        (6.0..18.0).contains(&self.hour_fraction)
    }
}

fn hour_fraction(timestamp: OffsetDateTime) -> f64 {
    f64::from(timestamp.hour()) + f64::from(timestamp.minute()) / 60.0
}

/// A point in the rendering layer's screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned brush rectangle with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub min: Point,
    pub max: Point,
}

impl BrushRect {
    /// Builds a normalised rectangle from two arbitrary drag corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Edge-inclusive hit test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
