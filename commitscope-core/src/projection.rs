//! Aggregate projections.
//!
//! Pure functions turning a commit subset into view-ready summaries. They
//! depend on nothing but their argument, so identical subsets always produce
//! identical results.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{Commit, LineRecord};

/// Sum of `total_lines` across the subset.
pub fn total_lines_of_code(subset: &[Arc<Commit>]) -> usize {
    subset.iter().map(|c| c.total_lines()).sum()
}

/// All records of one file within a subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub file: String,
    pub records: Vec<LineRecord>,
}

impl FileGroup {
    pub fn line_count(&self) -> usize {
        self.records.len()
    }
}

/// Groups the subset's records by file, largest group first. Groups with the
/// same size keep the order in which their file was first encountered.
pub fn file_groups(subset: &[Arc<Commit>]) -> Vec<FileGroup> {
    let mut slot_by_file: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<FileGroup> = Vec::new();

    for record in subset.iter().flat_map(|c| c.records()) {
        match slot_by_file.get(record.file.as_str()) {
            Some(&slot) => groups[slot].records.push(record.clone()),
            None => {
                slot_by_file.insert(record.file.as_str(), groups.len());
                groups.push(FileGroup {
                    file: record.file.clone(),
                    records: vec![record.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.records.len().cmp(&a.records.len()));
    groups
}

/// Line count and share of one file type.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub file_type: String,
    pub count: usize,
    /// `count / total`, in `[0, 1]`.
    pub proportion: f64,
}

/// Per-file-type line counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageBreakdown {
    entries: Vec<LanguageShare>,
}

impl LanguageBreakdown {
    pub fn entries(&self) -> &[LanguageShare] {
        &self.entries
    }

    pub fn get(&self, file_type: &str) -> Option<&LanguageShare> {
        self.entries.iter().find(|e| e.file_type == file_type)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of records the proportions were computed over.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Counts the subset's flattened records per file type. An empty subset
/// yields an empty breakdown.
pub fn language_breakdown(subset: &[Arc<Commit>]) -> LanguageBreakdown {
    let mut slot_by_type: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for record in subset.iter().flat_map(|c| c.records()) {
        match slot_by_type.get(record.file_type.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slot_by_type.insert(record.file_type.as_str(), counts.len());
                counts.push((record.file_type.as_str(), 1));
            }
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let entries = counts
        .into_iter()
        .map(|(file_type, count)| LanguageShare {
            file_type: file_type.to_owned(),
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();
    LanguageBreakdown { entries }
}

/// Text for the selection counter.
pub fn selection_count_text(selected: usize) -> String {
    if selected == 0 {
        "No commits selected".to_owned()
    } else {
        format!("{selected} commits selected")
    }
}

/// Square-root scale from a subset's `total_lines` extent onto a radius range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SizeScale {
    /// Fits the domain to `subset`; an empty subset maps everything to `range.0`.
    pub fn fit(subset: &[Arc<Commit>], range: (f64, f64)) -> Self {
        let lines = subset.iter().map(|c| c.total_lines() as f64);
        let domain = lines.fold(None, |acc: Option<(f64, f64)>, n| match acc {
            None => Some((n, n)),
            Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
        });
        Self {
            domain: domain.unwrap_or((0.0, 0.0)),
            range,
        }
    }

    pub fn radius(&self, total_lines: usize) -> f64 {
        let (lo, hi) = (self.domain.0.sqrt(), self.domain.1.sqrt());
        if hi <= lo {
            return self.range.0;
        }
        let t = ((total_lines as f64).sqrt() - lo) / (hi - lo);
        self.range.0 + t.clamp(0.0, 1.0) * (self.range.1 - self.range.0)
    }
}
