//! Regression tests for degenerate terminal sizes and documents
//!
//! Each test drives the app through a sequence that once risked a panic or
//! an out-of-range slice and checks the screen still makes sense.

use super::SERVER_LOG;
use crate::test_harness::AcceptanceTestHarness;
use crate::view::{END_TEXT, MORE_TEXT};
use crossterm::event::KeyCode;

const ALL_MOVES: [KeyCode; 10] = [
    KeyCode::Char('j'),
    KeyCode::Char('k'),
    KeyCode::Char(' '),
    KeyCode::Char('b'),
    KeyCode::Char('G'),
    KeyCode::Char('g'),
    KeyCode::Char('l'),
    KeyCode::Char('h'),
    KeyCode::Char('n'),
    KeyCode::Char('N'),
];

#[test]
fn one_row_terminal_shows_only_the_status_line() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 60, 1)
        .expect("Should load fixture");

    assert_eq!(harness.render_to_string(), MORE_TEXT);

    harness.send_keys(&ALL_MOVES);
    let output = harness.render_to_string();
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn one_column_terminal_renders_first_column() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 1, 5)
        .expect("Should load fixture");

    let output = harness.render_to_string();
    assert_eq!(output, "[\n[\n[\n[\n-");

    harness.send_keys(&ALL_MOVES);
    harness.render_to_string();
}

#[test]
fn empty_document_shows_filler_and_end() {
    let mut harness =
        AcceptanceTestHarness::from_text("", 30, 5).expect("Should create harness");

    let output = harness.render_to_string();
    assert_eq!(output, format!("~\n~\n~\n~\n{END_TEXT}"));

    harness.send_keys(&ALL_MOVES);
    assert_eq!(harness.viewer().top_line(), 0);
    assert_eq!(harness.viewer().right_shift(), 0);
}

#[test]
fn search_in_empty_document_finds_nothing() {
    let mut harness =
        AcceptanceTestHarness::from_text("", 30, 5).expect("Should create harness");

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("^");
    harness.send_key(KeyCode::Enter);
    harness.send_keys(&[KeyCode::Char('n'), KeyCode::Char('N')]);

    assert_eq!(harness.viewer().top_line(), 0);
}

#[test]
fn prompt_in_one_row_terminal() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 40, 1)
        .expect("Should load fixture");

    harness.send_key(KeyCode::Char(':'));
    harness.type_text("bottom");
    assert_eq!(harness.render_to_string(), ":bottom");

    harness.send_key(KeyCode::Enter);
    assert!(!harness.app().is_editing());
    harness.render_to_string();
}

#[test]
fn long_prompt_scrolls_to_keep_cursor_visible() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 20, 4)
        .expect("Should load fixture");

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("abcdefghijklmnopqrstuvwxyz0123");

    let output = harness.render_to_string();
    assert_eq!(
        output.lines().last().unwrap_or_default(),
        "lmnopqrstuvwxyz0123"
    );
}

#[test]
fn shrinking_below_one_row_and_back() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 40, 6)
        .expect("Should load fixture");
    harness.send_key(KeyCode::Char(':'));

    harness.resize(40, 1);
    harness.render_to_string();
    harness.resize(40, 6);

    harness.send_key(KeyCode::Esc);
    let output = harness.render_to_string();
    assert_eq!(output.lines().count(), 6);
    assert!(output.starts_with("[001]"));
}

#[test]
fn scrolling_a_single_short_line() {
    let mut harness =
        AcceptanceTestHarness::from_text("only", 30, 5).expect("Should create harness");

    harness.send_keys(&ALL_MOVES);

    assert_eq!(harness.viewer().top_line(), 0);
    let output = harness.render_to_string();
    assert_eq!(output, format!("only\n~\n~\n~\n{END_TEXT}"));
}

#[test]
fn right_command_with_largest_count_renders() {
    let mut harness = AcceptanceTestHarness::from_fixture_with_size(SERVER_LOG, 60, 6)
        .expect("Should load fixture");

    harness.run_command("right 18446744073709551615");
    assert_eq!(harness.viewer().right_shift(), usize::MAX);
    harness.send_key(KeyCode::Char('l'));

    let output = harness.render_to_string();
    assert!(output.starts_with('\n'), "content columns should be empty:\n{output}");
    assert!(output.ends_with(MORE_TEXT));
}
