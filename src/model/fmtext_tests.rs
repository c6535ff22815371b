//! Tests for the formatted text buffer.

use super::*;
use ratatui::style::{Color, Modifier};

fn numbered(count: usize) -> FmText {
    let mut fm = FmText::new();
    for i in 0..count {
        fm.append_normal(&format!("line {i}\n"));
    }
    fm
}

// ===== Line counting =====

#[test]
fn empty_buffer_has_no_lines() {
    assert_eq!(FmText::new().num_lines(), 0);
}

#[test]
fn terminated_lines_are_counted_once() {
    assert_eq!(FmText::from("a\nb\n").num_lines(), 2);
}

#[test]
fn unterminated_tail_counts_as_a_line() {
    assert_eq!(FmText::from("a\nb").num_lines(), 2);
    assert_eq!(FmText::from("solo").num_lines(), 1);
}

#[test]
fn blank_lines_count() {
    assert_eq!(FmText::from("\n\n\n").num_lines(), 3);
}

// ===== Offsets and line numbers =====

#[test]
fn line_number_of_offsets() {
    let fm = FmText::from("ab\ncd\nef\n");
    assert_eq!(fm.line_number(0), 0);
    assert_eq!(fm.line_number(2), 0, "the line break belongs to its line");
    assert_eq!(fm.line_number(3), 1);
    assert_eq!(fm.line_number(8), 2);
    assert_eq!(fm.line_number(500), 3);
}

#[test]
fn line_extents_include_the_line_break() {
    let fm = FmText::from("ab\ncd\nef\n");
    assert_eq!(fm.line_extents(0), (0, 3));
    assert_eq!(fm.line_extents(1), (3, 6));
    assert_eq!(fm.line_extents(2), (6, 9));
}

#[test]
fn line_extents_past_the_end_are_empty() {
    let fm = FmText::from("ab\n");
    assert_eq!(fm.line_extents(1), (3, 3));
    assert_eq!(fm.line_extents(40), (3, 3));
}

#[test]
fn line_extents_of_unterminated_tail() {
    let fm = FmText::from("ab\ncd");
    assert_eq!(fm.line_extents(1), (3, 5));
}

#[test]
fn previous_line_start_walks_back_one_line() {
    let fm = FmText::from("ab\ncd\nef\n");
    assert_eq!(fm.previous_line_start(9), 6);
    assert_eq!(fm.previous_line_start(6), 3);
    assert_eq!(fm.previous_line_start(3), 0);
    assert_eq!(fm.previous_line_start(0), 0);
}

// ===== Truncation =====

#[test]
fn truncate_lines_takes_a_window() {
    let fm = numbered(10);
    let window = fm.truncate_lines(3, 2);
    assert_eq!(window.as_str(), "line 3\nline 4\n");
}

#[test]
fn truncate_lines_stops_at_the_end() {
    let fm = numbered(3);
    assert_eq!(fm.truncate_lines(2, 10).as_str(), "line 2\n");
    assert_eq!(fm.truncate_lines(5, 10).as_str(), "");
    assert_eq!(fm.truncate_lines(0, 0).as_str(), "");
}

#[test]
fn truncate_cols_is_inclusive_on_both_ends() {
    let fm = FmText::from("0123456789\nab\n");
    let cut = fm.truncate_cols(2, 5);
    assert_eq!(cut.as_str(), "2345\n\n");
}

#[test]
fn truncate_cols_keeps_short_lines_empty() {
    let fm = FmText::from("xy\n");
    assert_eq!(fm.truncate_cols(5, 10).as_str(), "\n");
}

#[test]
fn truncate_cols_drops_wide_chars_on_the_edge() {
    // Each ideograph is two columns wide.
    let fm = FmText::from("日本語\n");
    assert_eq!(fm.truncate_cols(0, 2).as_str(), "日\n");
    assert_eq!(fm.truncate_cols(1, 4).as_str(), "本\n");
}

#[test]
fn truncation_keeps_styles() {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut fm = FmText::new();
    fm.append_normal("aa ");
    fm.append_styled("BOLD", bold);
    fm.append_normal(" zz\nnext\n");

    let cut = fm.truncate_lines(0, 1).truncate_cols(3, 6);
    assert_eq!(cut.as_str(), "BOLD\n");
    let text = cut.to_text();
    assert_eq!(text.lines.len(), 1);
    assert_eq!(text.lines[0].spans[0].content, "BOLD");
    assert_eq!(text.lines[0].spans[0].style, bold);
}

// ===== Styling =====

#[test]
fn adjacent_runs_with_same_style_merge() {
    let red = Style::default().fg(Color::Red);
    let mut fm = FmText::new();
    fm.append_styled("ab", red);
    fm.append_styled("cd", red);
    let text = fm.to_text();
    assert_eq!(text.lines[0].spans.len(), 1);
    assert_eq!(text.lines[0].spans[0].content, "abcd");
}

#[test]
fn to_text_splits_lines_and_keeps_blank_ones() {
    let fm = FmText::from("one\n\nthree\n");
    let text = fm.to_text();
    assert_eq!(text.lines.len(), 3);
    assert!(text.lines[1].spans.is_empty());
    assert_eq!(text.lines[2].spans[0].content, "three");
}

#[test]
fn to_text_styled_run_spanning_lines() {
    let green = Style::default().fg(Color::Green);
    let mut fm = FmText::new();
    fm.append_normal("a");
    fm.append_styled("b\nc", green);
    fm.append_normal("d\n");
    let text = fm.to_text();
    assert_eq!(text.lines.len(), 2);
    assert_eq!(text.lines[0].spans[1].content, "b");
    assert_eq!(text.lines[0].spans[1].style, green);
    assert_eq!(text.lines[1].spans[0].content, "c");
    assert_eq!(text.lines[1].spans[0].style, green);
    assert_eq!(text.lines[1].spans[1].content, "d");
}

#[test]
fn copies_are_independent() {
    let original = FmText::from("a\n");
    let mut copy = original.clone();
    copy.append_normal("b\n");
    assert_eq!(original.num_lines(), 1);
    assert_eq!(copy.num_lines(), 2);
}

// ===== Search =====

#[test]
fn search_from_offset() {
    let fm = FmText::from("foo\nbar\nfoo\n");
    let pattern = SearchPattern::new("foo").unwrap();
    assert_eq!(fm.search(&pattern, 0), Some(0));
    assert_eq!(fm.search(&pattern, 1), Some(8));
    assert_eq!(fm.search(&pattern, 9), None);
}
