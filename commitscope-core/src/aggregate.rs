//! Commit aggregation.
//!
//! Groups line records by commit id, orders the groups by timestamp and
//! derives per-commit metrics. Deletions are computed by replaying every
//! record in chronological order against a per-file "last seen length" map,
//! so the whole sequence is rebuilt from scratch whenever the input changes.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::types::{Commit, LineRecord};

/// The immutable result of one ingestion: every commit plus whole-log stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    commits: Vec<Arc<Commit>>,
    summary: DatasetSummary,
}

/// Whole-log statistics shown next to the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Number of line records ingested.
    pub total_loc: usize,
    pub total_commits: usize,
    /// Mean of the `length` column over every record (`0.0` when empty).
    pub average_file_length: f64,
    pub file_count: usize,
    /// Distinct file types in ascending order.
    pub file_types: Vec<String>,
}

impl Dataset {
    /// Aggregates `records` and computes the summary in one pass.
    pub fn from_records(records: Vec<LineRecord>) -> Self {
        let mut summary = summarize(&records);
        let commits: Vec<Arc<Commit>> =
            aggregate_commits(records).into_iter().map(Arc::new).collect();
        summary.total_commits = commits.len();
        Self { commits, summary }
    }

    pub fn commits(&self) -> &[Arc<Commit>] {
        &self.commits
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }
}

fn summarize(records: &[LineRecord]) -> DatasetSummary {
    let files: BTreeSet<&str> = records.iter().map(|r| r.file.as_str()).collect();
    let file_types: BTreeSet<&str> = records.iter().map(|r| r.file_type.as_str()).collect();
    let average_file_length = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| f64::from(r.length)).sum::<f64>() / records.len() as f64
    };
    DatasetSummary {
        total_loc: records.len(),
        total_commits: 0,
        average_file_length,
        file_count: files.len(),
        file_types: file_types.into_iter().map(str::to_owned).collect(),
    }
}

/// Groups `records` into commits sorted ascending by timestamp.
///
/// Authorship and timestamp come from each group's first record. The sort is
/// stable, so commits sharing a timestamp keep first-encountered order.
pub fn aggregate_commits(records: Vec<LineRecord>) -> Vec<Commit> {
    let mut slot_by_id: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineRecord>> = Vec::new();

    for record in records {
        match slot_by_id.get(&record.commit_id) {
            Some(&slot) => groups[slot].push(record),
            None => {
                slot_by_id.insert(record.commit_id.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups.sort_by_key(|g| g[0].timestamp);

    let mut last_length: HashMap<String, u32> = HashMap::new();
    let commits: Vec<Commit> = groups
        .into_iter()
        .enumerate()
        .map(|(ordinal, records)| {
            let deletions = replay_deletions(&records, &mut last_length);
            let timestamp = records[0].timestamp;
            Commit::new(ordinal, timestamp, records, deletions)
        })
        .collect();

    debug!(commits = commits.len(), files = last_length.len(), "aggregated commits");
    commits
}

/// Advances the running per-file length map over one commit's records and
/// returns the lines that commit removed. A file seen for the first time
/// contributes nothing.
fn replay_deletions(records: &[LineRecord], last_length: &mut HashMap<String, u32>) -> usize {
    let mut deletions = 0usize;
    for record in records {
        if let Some(previous) = last_length.insert(record.file.clone(), record.length) {
            if previous > record.length {
                deletions += (previous - record.length) as usize;
            }
        }
    }
    deletions
}
