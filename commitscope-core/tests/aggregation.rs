//! Aggregation and projection behaviour over small hand-built logs.

mod common;

use std::sync::Arc;

use commitscope_core::projection::{file_groups, language_breakdown, total_lines_of_code};
use commitscope_core::{aggregate_commits, Dataset};
use common::{lines, record};
use time::macros::datetime;

#[test]
fn two_commit_scenario() {
    // Commit B is listed first; aggregation must still order by time.
    let mut records = lines("B", "x.js", 2, 50, datetime!(2025-02-11 22:15 -08:00));
    records.extend(lines("A", "x.js", 3, 48, datetime!(2025-02-10 09:30 -08:00)));

    let dataset = Dataset::from_records(records);
    let commits = dataset.commits();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].id(), "A");
    assert_eq!(commits[0].ordinal(), 0);
    assert_eq!(commits[0].hour_fraction(), 9.5);
    assert_eq!(commits[1].hour_fraction(), 22.25);
    assert_eq!(total_lines_of_code(commits), 5);
    assert_eq!(dataset.summary().total_loc, 5);
    assert_eq!(dataset.summary().total_commits, 2);
    assert_eq!(dataset.summary().file_count, 1);

    let breakdown = language_breakdown(commits);
    assert_eq!(breakdown.len(), 1);
    let js = breakdown.get("js").unwrap();
    assert_eq!(js.count, 5);
    assert_eq!(js.proportion, 1.0);
}

#[test]
fn deletions_follow_the_running_file_length() {
    let records = vec![
        record("first", "f.js", 100, datetime!(2025-01-01 10:00 UTC)),
        record("second", "f.js", 60, datetime!(2025-01-02 10:00 UTC)),
        record("third", "f.js", 75, datetime!(2025-01-03 10:00 UTC)),
        record("third", "g.css", 10, datetime!(2025-01-03 10:00 UTC)),
    ];
    let commits = aggregate_commits(records);

    assert_eq!(commits[0].deletions(), 0, "first touch contributes nothing");
    assert!(commits[1].deletions() >= 40);
    assert_eq!(commits[2].deletions(), 0, "growth is not a deletion");
    assert_eq!(commits[2].additions(), 2);
}

#[test]
fn equal_timestamps_keep_first_seen_order() {
    let at = datetime!(2025-03-01 12:00 UTC);
    let records = vec![
        record("zeta", "a.js", 1, at),
        record("alpha", "a.js", 1, at),
        record("zeta", "b.js", 1, at),
    ];
    let ids: Vec<String> = aggregate_commits(records)
        .iter()
        .map(|c| c.id().to_owned())
        .collect();
    assert_eq!(ids, ["zeta", "alpha"]);
}

#[test]
fn hour_fraction_uses_the_authors_offset() {
    let commits = aggregate_commits(vec![record(
        "tz",
        "a.rs",
        1,
        datetime!(2025-03-01 23:45 +05:30),
    )]);
    assert_eq!(commits[0].hour_fraction(), 23.75);
    assert!(!commits[0].is_daytime());
}

#[test]
fn file_groups_sort_by_size_then_first_seen() {
    let at = datetime!(2025-03-01 12:00 UTC);
    let mut records = lines("c1", "small.css", 1, 1, at);
    records.extend(lines("c1", "tie_a.js", 2, 2, at));
    records.extend(lines("c1", "big.html", 4, 4, at));
    records.extend(lines("c1", "tie_b.js", 2, 2, at));
    let commits: Vec<_> = aggregate_commits(records).into_iter().map(Arc::new).collect();

    let order: Vec<(String, usize)> = file_groups(&commits)
        .into_iter()
        .map(|g| (g.file.clone(), g.line_count()))
        .collect();
    assert_eq!(
        order,
        [
            ("big.html".to_owned(), 4),
            ("tie_a.js".to_owned(), 2),
            ("tie_b.js".to_owned(), 2),
            ("small.css".to_owned(), 1),
        ]
    );
}

#[test]
fn empty_inputs_degrade_to_empty_outputs() {
    let dataset = Dataset::from_records(Vec::new());
    assert!(dataset.is_empty());
    assert_eq!(dataset.summary().average_file_length, 0.0);
    assert!(language_breakdown(dataset.commits()).is_empty());
    assert!(file_groups(dataset.commits()).is_empty());
    assert_eq!(total_lines_of_code(dataset.commits()), 0);
}
