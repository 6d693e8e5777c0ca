//! Scroll narrative text, one paragraph per commit in view.

use std::sync::Arc;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::types::Commit;

/// Shown in place of the narrative when the active subset is empty.
pub const EMPTY_NARRATIVE: &str = "No commits in view";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeEntry {
    pub ordinal: usize,
    pub commit_id: String,
    /// e.g. `Tuesday, February 11, 2025 at 9:30 AM`.
    pub when: String,
    pub url: Option<String>,
    pub text: String,
}

/// Long human date in the commit author's own offset.
pub fn format_when(timestamp: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday], [month repr:long] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period]"
    );
    timestamp
        .format(format)
        .unwrap_or_else(|_| timestamp.to_string())
}

pub fn commit_narrative(commit: &Commit, url_base: Option<&str>) -> NarrativeEntry {
    let when = format_when(commit.timestamp());
    let files = commit.file_count();
    let noun = if files == 1 { "file" } else { "files" };
    NarrativeEntry {
        ordinal: commit.ordinal(),
        commit_id: commit.id().to_owned(),
        url: url_base.map(|base| format!("{}{}", base, commit.id())),
        text: format!(
            "On {when}, I edited {} lines across {files} {noun}.",
            commit.total_lines()
        ),
        when,
    }
}

pub fn narrative(subset: &[Arc<Commit>], url_base: Option<&str>) -> Vec<NarrativeEntry> {
    subset.iter().map(|c| commit_narrative(c, url_base)).collect()
}
