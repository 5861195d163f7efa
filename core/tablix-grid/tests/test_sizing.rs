//! FILENAME: tests/test_sizing.rs
//! Integration tests for frame sizing: content sizes, alignment of spanning
//! headers, scroll cropping and proportional fill.

mod common;

use common::{Note, TestHarness};
use tablix_grid::{Axis, AxisItem, AxisTarget, CellId, SizeState};

// ============================================================================
// CONTENT SIZES
// ============================================================================

#[test]
fn test_fix_sizes_uses_widest_cell_plus_correction() {
    let mut h = TestHarness::new();
    h.host.default_measure(40.0, 20.0);
    let frame = h.render_matrix(2, 2);
    h.host.measure_width(frame.body[0][0], 70.0);

    h.grid.fix_sizes();

    for &id in &[frame.column_headers[0], frame.body[0][0], frame.body[1][0]] {
        assert_eq!(h.grid.cell(id).content_width(), Some(71.0));
    }
    assert_eq!(h.grid.cell(frame.body[0][1]).content_width(), Some(41.0));
    assert_eq!(h.grid.cell(frame.body[1][1]).content_height(), Some(21.0));
    assert!(h.host.notes().contains(&Note::AxisSized(Axis::Horizontal, Some(71.0))));
}

#[test]
fn test_fixed_size_stable_until_cleared() {
    let mut h = TestHarness::new();
    h.host.default_measure(40.0, 20.0);
    let frame = h.render_matrix(1, 1);
    h.grid.fix_sizes();

    h.host.measure_width(frame.body[0][0], 200.0);
    for _ in 0..3 {
        let again = h.render_matrix(1, 1);
        h.grid.fix_sizes();
        assert_eq!(h.grid.cell(again.body[0][0]).content_width(), Some(41.0));
    }

    h.grid.clear_sizes();
    h.grid.fix_sizes();
    assert_eq!(h.grid.cell(frame.body[0][0]).content_width(), Some(201.0));
}

#[test]
fn test_unmeasurable_item_falls_back_to_presenter_size() {
    let mut h = TestHarness::new();
    h.host.set_axis_size(33.0);
    let frame = h.render_matrix(1, 1);
    h.grid.fix_sizes();

    let column = frame.columns[1];
    let (item, _) = h.grid.axis_item_mut(AxisTarget::Column(column));
    assert_eq!(item.size_state(), SizeState::Content);
    assert_eq!(item.contextual_size(), 33.0);
}

#[test]
fn test_correction_is_configurable() {
    let config = tablix_grid::GridConfig {
        ellipsis_correction: 0.0,
        ..Default::default()
    };
    let mut h = TestHarness::with_config(config);
    h.host.default_measure(40.0, 20.0);
    let frame = h.render_matrix(1, 1);
    h.grid.fix_sizes();

    assert_eq!(h.grid.cell(frame.body[0][0]).content_width(), Some(40.0));
}

// ============================================================================
// SPANNING HEADERS
// ============================================================================

/// Two columns under one spanning header, leaf headers below it and a
/// body row. Returns (spanning header, leaf headers, body cells).
fn render_spanning(h: &mut TestHarness) -> (CellId, Vec<CellId>, Vec<CellId>) {
    h.begin(false);
    let top = h.grid.get_or_create_row(&mut h.host, 0);
    let leaves = h.grid.get_or_create_row(&mut h.host, 1);
    let data = h.grid.get_or_create_row(&mut h.host, 2);
    let c0 = h.grid.get_or_create_column(&mut h.host, 0);
    let c1 = h.grid.get_or_create_column(&mut h.host, 1);

    let spanning = h.grid.get_or_create_column_header(&mut h.host, top, c0, false, false);
    h.grid.cell_mut(spanning).set_col_span(2);
    let leaf_headers = vec![
        h.grid.get_or_create_column_header(&mut h.host, leaves, c0, false, true),
        h.grid.get_or_create_column_header(&mut h.host, leaves, c1, false, true),
    ];
    let body = vec![
        h.grid.get_or_create_body_cell(&mut h.host, data, c0, false),
        h.grid.get_or_create_body_cell(&mut h.host, data, c1, false),
    ];
    h.end();
    (spanning, leaf_headers, body)
}

#[test]
fn test_spanning_header_widens_last_covered_column() {
    let mut h = TestHarness::new();
    h.host.default_measure(50.0, 20.0);
    let (spanning, _, body) = render_spanning(&mut h);
    h.host.measure_width(spanning, 200.0);

    h.grid.fix_sizes();

    assert_eq!(h.grid.cell(body[0]).content_width(), Some(51.0));
    assert_eq!(h.grid.cell(body[1]).content_width(), Some(149.0));
    assert_eq!(h.grid.cell(spanning).content_width(), Some(200.0));

    let c1 = h.grid.column_at(1).unwrap();
    assert_eq!(h.grid.axis_item(AxisTarget::Column(c1)).size_state(), SizeState::Aligned);
}

#[test]
fn test_alignment_stable_across_frames() {
    let mut h = TestHarness::new();
    h.host.default_measure(50.0, 20.0);
    let (spanning, _, _) = render_spanning(&mut h);
    h.host.measure_width(spanning, 200.0);
    h.grid.fix_sizes();
    h.host.clear_notes();

    let (_, _, body) = render_spanning(&mut h);
    h.grid.fix_sizes();

    assert_eq!(h.grid.cell(body[1]).content_width(), Some(149.0));
    assert!(!h
        .host
        .notes()
        .iter()
        .any(|n| matches!(n, Note::AxisSized(Axis::Horizontal, _))));
}

#[test]
fn test_narrow_spanning_header_leaves_columns_alone() {
    let mut h = TestHarness::new();
    h.host.default_measure(50.0, 20.0);
    let (spanning, _, body) = render_spanning(&mut h);
    h.host.measure_width(spanning, 60.0);

    h.grid.fix_sizes();

    assert_eq!(h.grid.cell(body[1]).content_width(), Some(51.0));
    assert_eq!(h.grid.cell(spanning).content_width(), Some(102.0));
}

#[test]
fn test_resized_column_not_aligned() {
    let mut h = TestHarness::new();
    h.host.default_measure(50.0, 20.0);
    let (spanning, leaves, body) = render_spanning(&mut h);
    h.host.measure_width(spanning, 200.0);
    let c1 = h.grid.column_at(1).unwrap();
    {
        let (item, cells) = h.grid.axis_item_mut(AxisTarget::Column(c1));
        item.resize(cells, 80.0);
    }

    h.grid.fix_sizes();

    assert_eq!(h.grid.cell(body[1]).content_width(), Some(80.0));
    assert_eq!(h.grid.cell(leaves[1]).content_width(), Some(80.0));
    assert_eq!(h.grid.cell(spanning).content_width(), Some(131.0));
}

// ============================================================================
// SCROLLING
// ============================================================================

#[test]
fn test_scroll_crop_arithmetic() {
    let mut h = TestHarness::new();
    let frame = h.render_matrix(1, 1);
    let cell = frame.body[0][0];

    h.grid.cell_mut(cell).scroll_horizontally(200.0, 0.25);
    assert_eq!(h.grid.cell(cell).horizontal_offset(), -50.0);
    assert_eq!(h.grid.cell(cell).content_width(), Some(150.0));
    assert!(h.host.notes().contains(&Note::ScrolledH(cell, 200.0, -50.0)));

    h.grid.cell_mut(cell).scroll_vertically(40.0, 0.5);
    assert_eq!(h.grid.cell(cell).vertical_offset(), -20.0);
    assert_eq!(h.grid.cell(cell).content_height(), Some(20.0));
}

#[test]
fn test_non_scrollable_cell_ignores_scroll() {
    let mut h = TestHarness::new();
    let frame = h.render_matrix(1, 1);
    let header = frame.row_headers[0];

    h.grid.cell_mut(header).scroll_horizontally(200.0, 0.25);
    assert_eq!(h.grid.cell(header).horizontal_offset(), 0.0);
    assert_eq!(h.grid.cell(header).content_width(), None);
}

#[test]
fn test_scrolling_reset_when_cell_reused() {
    let mut h = TestHarness::new();
    let frame = h.render_matrix(1, 1);
    let cell = frame.body[0][0];
    h.grid.cell_mut(cell).scroll_horizontally(200.0, 0.25);

    h.render_matrix(1, 1);
    assert_eq!(h.grid.cell(cell).horizontal_offset(), 0.0);
}

#[test]
fn test_spanning_size_includes_scroll_offset() {
    let mut h = TestHarness::new();
    h.host.default_measure(100.0, 20.0);
    let frame = h.render_matrix(1, 2);
    h.grid.fix_sizes();

    let header = frame.column_headers[0];
    h.grid.cell_mut(header).set_col_span(2);
    h.grid.cell_mut(header).scroll_horizontally(100.0, 0.25);

    let size = h.grid.cell_spanning_size_with_scrolling(Axis::Horizontal, header);
    assert_eq!(size, Some(101.0 - 25.0 + 101.0));
}

// ============================================================================
// PROPORTIONAL FILL
// ============================================================================

#[test]
fn test_distribute_width_fills_proportionally() {
    let mut h = TestHarness::new();
    h.host.default_measure(49.0, 20.0);
    let frame = h.render_matrix(1, 2);
    h.grid.fix_sizes();

    assert!(!h.grid.distribute_width(300.0));

    h.grid.set_fill_proportionally(true);
    assert!(h.grid.distribute_width(300.0));
    assert_eq!(h.grid.cell(frame.body[0][0]).content_width(), Some(100.0));
    assert_eq!(h.grid.cell(frame.row_headers[0]).content_width(), Some(100.0));

    assert!(!h.grid.distribute_width(100.0));
}

#[test]
fn test_distribute_width_resizes_spanning_header() {
    let mut h = TestHarness::new();
    h.host.default_measure(49.0, 20.0);
    let (spanning, leaves, _) = render_spanning(&mut h);
    h.grid.fix_sizes();
    assert_eq!(h.grid.cell(spanning).content_width(), Some(100.0));

    h.grid.set_fill_proportionally(true);
    assert!(h.grid.distribute_width(300.0));

    assert_eq!(h.grid.cell(leaves[0]).content_width(), Some(150.0));
    assert_eq!(h.grid.cell(leaves[1]).content_width(), Some(150.0));
    assert_eq!(h.grid.cell(spanning).content_width(), Some(300.0));
}
