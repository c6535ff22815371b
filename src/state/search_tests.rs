//! Tests for line-granular search.

use super::*;
use crate::region::RegionTree;

/// 12 lines, where lines 2, 5 and 9 contain "match".
fn document() -> String {
    (0..12)
        .map(|i| {
            if matches!(i, 2 | 5 | 9) {
                format!("line {i} match\n")
            } else {
                format!("line {i}\n")
            }
        })
        .collect()
}

fn viewer_at(top_line: usize) -> (RegionTree, Viewer) {
    let mut tree = RegionTree::new(40, 6);
    let root = tree.root();
    let mut viewer = Viewer::from_text(&mut tree, root, &document());
    viewer.top_line = top_line;
    // Settle the initial paint so dirtiness reflects only the search.
    while !tree.take_signals().is_empty() {}
    (tree, viewer)
}

fn pattern(expr: &str) -> SearchPattern {
    SearchPattern::new(expr).unwrap()
}

// ===== Downwards =====

#[test]
fn downwards_include_current_stays_on_matching_top_line() {
    let (mut tree, mut viewer) = viewer_at(2);

    let found = viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::IncludeCurrent,
        SearchDirection::Downwards,
    );

    assert!(found);
    assert_eq!(viewer.top_line(), 2);
}

#[test]
fn downwards_skip_current_moves_to_next_match() {
    let (mut tree, mut viewer) = viewer_at(2);

    let found = viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::SkipCurrent,
        SearchDirection::Downwards,
    );

    assert!(found);
    assert_eq!(viewer.top_line(), 5);
    assert!(tree.is_dirty(viewer.content_region()));
    assert!(tree.is_dirty(viewer.status_region()));
}

#[test]
fn downwards_finds_match_in_the_middle_of_a_line() {
    let (mut tree, mut viewer) = viewer_at(0);

    assert!(viewer.search(
        &mut tree,
        &pattern("9 mat"),
        SearchMode::IncludeCurrent,
        SearchDirection::Downwards,
    ));
    assert_eq!(viewer.top_line(), 9);
}

#[test]
fn downwards_past_last_match_reports_not_found() {
    let (mut tree, mut viewer) = viewer_at(9);

    let found = viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::SkipCurrent,
        SearchDirection::Downwards,
    );

    assert!(!found);
    assert_eq!(viewer.top_line(), 9, "view must not move");
    assert!(!tree.is_dirty(viewer.content_region()));
}

#[test]
fn downwards_empty_line_pattern_does_not_match_past_the_end() {
    let mut tree = RegionTree::new(40, 6);
    let root = tree.root();
    let mut viewer = Viewer::from_text(&mut tree, root, "a\n\nb\n");
    let empty = pattern("^$");

    assert!(viewer.search(
        &mut tree,
        &empty,
        SearchMode::SkipCurrent,
        SearchDirection::Downwards
    ));
    assert_eq!(viewer.top_line(), 1);

    assert!(!viewer.search(
        &mut tree,
        &empty,
        SearchMode::SkipCurrent,
        SearchDirection::Downwards
    ));
    assert_eq!(viewer.top_line(), 1);
}

// ===== Upwards =====

#[test]
fn upwards_skip_current_finds_nearest_match_above() {
    let (mut tree, mut viewer) = viewer_at(7);

    let found = viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    );

    assert!(found);
    assert_eq!(viewer.top_line(), 5, "nearest preceding match, not the first");
}

#[test]
fn upwards_include_current_stays_on_matching_top_line() {
    let (mut tree, mut viewer) = viewer_at(5);

    assert!(viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::IncludeCurrent,
        SearchDirection::Upwards,
    ));
    assert_eq!(viewer.top_line(), 5);
}

#[test]
fn upwards_skip_current_on_matching_line_moves_to_previous() {
    let (mut tree, mut viewer) = viewer_at(5);

    assert!(viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    ));
    assert_eq!(viewer.top_line(), 2);
}

#[test]
fn upwards_skip_current_from_last_match_picks_the_middle_one() {
    let (mut tree, mut viewer) = viewer_at(9);

    assert!(viewer.search(
        &mut tree,
        &pattern("match"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    ));
    assert_eq!(viewer.top_line(), 5, "nearest preceding match, not the first");
}

#[test]
fn upwards_reaches_the_first_line() {
    let (mut tree, mut viewer) = viewer_at(6);

    assert!(viewer.search(
        &mut tree,
        &pattern("^line 0$"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    ));
    assert_eq!(viewer.top_line(), 0);
}

#[test]
fn upwards_from_the_top_reports_not_found() {
    let (mut tree, mut viewer) = viewer_at(0);

    assert!(!viewer.search(
        &mut tree,
        &pattern("line"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    ));
    assert_eq!(viewer.top_line(), 0);
}

#[test]
fn upwards_pattern_sees_only_one_line() {
    let (mut tree, mut viewer) = viewer_at(11);

    // Spans a line break, so no single line can match it.
    let found = viewer.search(
        &mut tree,
        &pattern("match\nline"),
        SearchMode::SkipCurrent,
        SearchDirection::Upwards,
    );

    assert!(!found);
    assert_eq!(viewer.top_line(), 11);
}

// ===== Options =====

#[test]
fn ignore_case_pattern_matches_other_case() {
    let (mut tree, mut viewer) = viewer_at(0);

    assert!(!viewer.search(
        &mut tree,
        &pattern("MATCH"),
        SearchMode::SkipCurrent,
        SearchDirection::Downwards,
    ));

    let folded = SearchPattern::with_options("MATCH", true).unwrap();
    assert!(viewer.search(
        &mut tree,
        &folded,
        SearchMode::SkipCurrent,
        SearchDirection::Downwards,
    ));
    assert_eq!(viewer.top_line(), 2);
}

#[test]
fn empty_document_never_matches() {
    let mut tree = RegionTree::new(40, 6);
    let root = tree.root();
    let mut viewer = Viewer::from_text(&mut tree, root, "");

    for direction in [SearchDirection::Downwards, SearchDirection::Upwards] {
        assert!(!viewer.search(
            &mut tree,
            &pattern(".*"),
            SearchMode::IncludeCurrent,
            direction,
        ));
    }
    assert_eq!(viewer.top_line(), 0);
}

#[test]
fn reversed_swaps_direction() {
    assert_eq!(
        SearchDirection::Downwards.reversed(),
        SearchDirection::Upwards
    );
    assert_eq!(
        SearchDirection::Upwards.reversed(),
        SearchDirection::Downwards
    );
}
