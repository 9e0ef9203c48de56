//! Multi-column flow regressions: height budgets, column hand-off, empty
//! trailing columns, and the overflow/resume-index conventions.

mod common;

use common::{base_style, engine, GLYPH_W, LINE_H};

/// Ten one-cluster lines separated by hard newlines.
fn ten_hard_lines() -> String {
    let mut text = String::new();
    for index in 0..10 {
        if index > 0 {
            text.push('\n');
        }
        text.push('a');
    }
    text
}

#[test]
fn ten_hard_lines_fill_two_columns_exactly() {
    let text = ten_hard_lines();
    let result = engine(base_style()).layout_columns(&text, 2, 220.0, 5.0 * LINE_H, 20.0);
    assert_eq!(result.columns.len(), 2);
    assert_eq!(result.columns[0].lines.len(), 5);
    assert_eq!(result.columns[1].lines.len(), 5);
    assert!(!result.overflow);
    // 10 glyphs + 9 newline markers; the last cluster is index 18.
    assert_eq!(result.last_char_index, 18);
}

#[test]
fn single_column_height_budget_overflows_with_resume_index() {
    let text = ten_hard_lines();
    let result = engine(base_style()).layout(&text, 100.0, Some(5.0 * LINE_H));
    assert_eq!(result.lines.len(), 5);
    assert!(result.overflow);
    // Line 5 ends at cluster 8; the newline marker 9 is consumed, so the
    // resume index is 10.
    assert_eq!(result.last_char_index, 10);
}

#[test]
fn soft_wrapped_flow_preserves_cluster_coverage_across_columns() {
    let text = "ab ab ab ab ab ab ab ab ab ab";
    let result =
        engine(base_style()).layout_columns(text, 2, 2.0 * 25.0 + 20.0, 5.0 * LINE_H, 20.0);
    assert_eq!(result.columns[0].lines.len(), 5);
    assert_eq!(result.columns[1].lines.len(), 5);
    assert!(!result.overflow);

    let all_lines: Vec<_> = result
        .columns
        .iter()
        .flat_map(|c| c.lines.iter())
        .collect();
    for pair in all_lines.windows(2) {
        assert_eq!(pair[1].first_cluster, pair[0].last_cluster + 1);
    }
    assert_eq!(result.last_char_index, text.chars().count() - 1);
}

#[test]
fn columns_past_the_end_of_text_stay_empty() {
    let result = engine(base_style()).layout_columns("a", 3, 320.0, 400.0, 20.0);
    assert_eq!(result.columns.len(), 3);
    assert_eq!(result.columns[0].lines.len(), 1);
    assert!(result.columns[1].lines.is_empty());
    assert!(result.columns[2].lines.is_empty());
    assert!(!result.overflow);
}

#[test]
fn exhausted_columns_report_overflow_and_resume_index() {
    let text = ten_hard_lines();
    let result = engine(base_style()).layout_columns(&text, 1, 100.0, 5.0 * LINE_H, 20.0);
    assert_eq!(result.columns[0].lines.len(), 5);
    assert!(result.overflow);
    assert_eq!(result.last_char_index, 10);
}

#[test]
fn baselines_step_by_line_height_within_each_column() {
    let text = "ab ab ab ab ab ab ab ab ab ab";
    let result =
        engine(base_style()).layout_columns(text, 2, 2.0 * 25.0 + 20.0, 5.0 * LINE_H, 20.0);
    for column in &result.columns {
        for pair in column.lines.windows(2) {
            assert!(pair[1].y > pair[0].y);
            assert!((pair[1].y - pair[0].y - LINE_H).abs() < 1e-3);
        }
    }
}

#[test]
fn column_lines_carry_their_column_index_and_offset() {
    let text = "ab ab ab ab ab ab ab ab ab ab";
    let result =
        engine(base_style()).layout_columns(text, 2, 2.0 * 25.0 + 20.0, 5.0 * LINE_H, 20.0);
    for (index, column) in result.columns.iter().enumerate() {
        for line in &column.lines {
            assert_eq!(line.column, index);
            // Left alignment: the line starts at the column's left edge.
            assert!((line.x - column.x).abs() < 1e-3);
        }
    }
    assert!((result.columns[1].x - 45.0).abs() < 1e-3);
}

#[test]
fn lines_fit_inside_the_column_height() {
    let text = ten_hard_lines();
    let result = engine(base_style()).layout_columns(&text, 2, 220.0, 5.0 * LINE_H, 20.0);
    for column in &result.columns {
        for line in &column.lines {
            assert!(line.y <= column.height + 1e-3);
        }
    }
}

#[test]
fn natural_width_never_exceeds_allocated_width_with_breaks_available() {
    let text = "ab ab ab ab ab ab ab ab ab ab";
    let result =
        engine(base_style()).layout_columns(text, 2, 2.0 * 25.0 + 20.0, 5.0 * LINE_H, 20.0);
    for column in &result.columns {
        for line in &column.lines {
            assert!(line.natural_width <= line.width + 1e-3);
        }
    }
    // Allocated width equals the column width here (no margins).
    let width = result.columns[0].lines[0].width;
    assert!((width - 25.0).abs() < 1e-3, "got {width}");
}

#[test]
fn two_glyph_words_wrap_one_word_per_line() {
    let text = "ab ab ab";
    let result = engine(base_style()).layout(text, 25.0, None);
    assert_eq!(result.lines.len(), 3);
    assert!((result.lines[0].natural_width - 2.0 * GLYPH_W).abs() < 1e-3);
}
