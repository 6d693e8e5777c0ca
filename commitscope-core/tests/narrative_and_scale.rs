//! Narrative sentences, commit links and the dot size scale.

mod common;

use std::sync::Arc;

use commitscope_core::narrative::{commit_narrative, format_when, narrative};
use commitscope_core::projection::SizeScale;
use commitscope_core::{Commit, Dataset, Point, ViewConfig, ViewCoordinator};
use common::lines;
use time::macros::datetime;

const LINK_BASE: &str = "https://example.com/site/commit/";

/// `a1`: three lines of one file. `b2`: three lines over two files.
fn two_commits() -> Dataset {
    let mut records = lines("a1", "index.html", 3, 40, datetime!(2025-02-11 09:30 -08:00));
    records.extend(lines("b2", "style.css", 2, 12, datetime!(2025-02-12 22:15 -08:00)));
    records.extend(lines("b2", "main.js", 1, 30, datetime!(2025-02-12 22:15 -08:00)));
    Dataset::from_records(records)
}

/// One commit per entry of `sizes`, each with that many lines, an hour apart.
fn sized_commits(sizes: &[usize]) -> Dataset {
    let start = datetime!(2025-03-01 08:00 UTC);
    let records = sizes
        .iter()
        .enumerate()
        .flat_map(|(i, &n)| {
            let at = start + time::Duration::hours(i as i64);
            lines(&format!("s{i}"), "src/app.js", n, 20, at)
        })
        .collect();
    Dataset::from_records(records)
}

#[test]
fn when_is_written_in_the_authors_offset() {
    assert_eq!(
        format_when(datetime!(2025-02-11 09:30 -08:00)),
        "Tuesday, February 11, 2025 at 9:30 AM"
    );
    assert_eq!(
        format_when(datetime!(2025-02-12 22:15 -08:00)),
        "Wednesday, February 12, 2025 at 10:15 PM"
    );
}

#[test]
fn sentence_counts_lines_and_pluralises_files() {
    let dataset = two_commits();
    let [a1, b2] = dataset.commits() else {
        panic!("expected two commits, got {}", dataset.len());
    };

    let single = commit_narrative(a1, None);
    assert_eq!(
        single.text,
        "On Tuesday, February 11, 2025 at 9:30 AM, I edited 3 lines across 1 file."
    );
    assert_eq!(single.url, None);

    let double = commit_narrative(b2, None);
    assert_eq!(
        double.text,
        "On Wednesday, February 12, 2025 at 10:15 PM, I edited 3 lines across 2 files."
    );
    assert_eq!((double.ordinal, double.commit_id.as_str()), (1, "b2"));
}

#[test]
fn url_joins_the_base_and_the_commit_id() {
    let dataset = two_commits();
    let entries = narrative(dataset.commits(), Some(LINK_BASE));
    let urls: Vec<_> = entries.iter().map(|e| e.url.as_deref()).collect();
    assert_eq!(
        urls,
        [
            Some("https://example.com/site/commit/a1"),
            Some("https://example.com/site/commit/b2"),
        ]
    );
    assert!(narrative(&[], Some(LINK_BASE)).is_empty());
}

#[test]
fn coordinator_narrative_uses_the_configured_base() {
    let config = ViewConfig {
        commit_url_base: Some(LINK_BASE.to_owned()),
        ..ViewConfig::default()
    };
    let coord = ViewCoordinator::new(
        Arc::new(two_commits()),
        config,
        Box::new(|_: &Commit| Point::default()),
    );
    let snapshot = coord.snapshot();
    assert_eq!(snapshot.narrative.len(), 2);
    assert_eq!(
        snapshot.narrative[1].url.as_deref(),
        Some("https://example.com/site/commit/b2")
    );
}

#[test]
fn radius_is_a_clamped_square_root_scale() {
    let dataset = sized_commits(&[1, 4, 9]);
    let scale = SizeScale::fit(dataset.commits(), (2.0, 30.0));

    assert_eq!(scale.radius(1), 2.0);
    // sqrt(4) sits halfway between sqrt(1) and sqrt(9).
    assert_eq!(scale.radius(4), 16.0);
    assert_eq!(scale.radius(9), 30.0);

    assert_eq!(scale.radius(0), 2.0);
    assert_eq!(scale.radius(100), 30.0);
}

#[test]
fn flat_or_empty_domain_uses_the_minimum_radius() {
    let flat = sized_commits(&[5, 5, 5]);
    let scale = SizeScale::fit(flat.commits(), (2.0, 30.0));
    assert_eq!(scale.radius(5), 2.0);
    assert_eq!(scale.radius(50), 2.0);

    let empty = SizeScale::fit(&[], (3.0, 12.0));
    assert_eq!(empty.radius(10), 3.0);
}
