//! Window computation tests
//!
//! Tests for the visible row range, overscan clamping and the
//! `WindowEngine` helpers used for hit-testing and scroll limits.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use stickygrid::layout::{compute_window, WindowEngine, WindowState};
use test_case::test_case;

fn state(total_count: usize, scroll: f64, viewport: f64, overscan: usize) -> WindowState {
    WindowState {
        total_count,
        item_size: 35.0,
        overscan,
        scroll_offset: scroll,
        viewport_size: viewport,
    }
}

#[test_case(10_000, 0.0, 500.0, 5 => Some((0, 19)); "top of a long list")]
#[test_case(10_000, 3500.0, 500.0, 5 => Some((95, 119)); "middle with overscan both sides")]
#[test_case(10_000, 349_500.0, 500.0, 5 => Some((9980, 9999)); "scrolled to the bottom")]
#[test_case(10_000, 1.0e12, 500.0, 5 => Some((9994, 9999)); "scrolled far past the end")]
#[test_case(10_000, 3500.0, 500.0, 0 => Some((100, 114)); "no overscan")]
#[test_case(3, 0.0, 500.0, 5 => Some((0, 2)); "fewer rows than fit")]
#[test_case(1, 0.0, 0.0, 0 => Some((0, 0)); "single row zero viewport")]
#[test_case(0, 0.0, 500.0, 5 => None; "empty source")]
#[test_case(100, -200.0, 500.0, 5 => Some((0, 19)); "negative scroll treated as zero")]
#[test_case(100, f64::NAN, 500.0, 5 => Some((0, 19)); "nan scroll treated as zero")]
#[test_case(100, 0.0, f64::INFINITY, 5 => Some((0, 5)); "infinite viewport treated as zero")]
fn test_window_range(
    total: usize,
    scroll: f64,
    viewport: f64,
    overscan: usize,
) -> Option<(usize, usize)> {
    compute_window(&state(total, scroll, viewport, overscan)).range()
}

#[test]
fn test_items_are_contiguous_and_positioned() {
    let window = compute_window(&state(10_000, 1234.5, 480.0, 3));
    let items = &window.items;
    for pair in items.windows(2) {
        assert_eq!(pair[1].index, pair[0].index + 1);
        assert_eq!(pair[1].start, pair[0].end());
    }
    for item in items {
        assert_eq!(item.start, item.index as f64 * 35.0);
        assert_eq!(item.size, 35.0);
    }
}

#[test]
fn test_window_covers_viewport() {
    let scroll = 7000.0;
    let viewport = 500.0;
    let window = compute_window(&state(10_000, scroll, viewport, 0));
    let first = window.items.first().unwrap();
    let last = window.items.last().unwrap();
    assert!(first.start <= scroll);
    assert!(last.end() >= scroll + viewport);
}

#[test]
fn test_total_extent_ignores_scroll() {
    for scroll in [0.0, 100.0, 1.0e9] {
        let window = compute_window(&state(10_000, scroll, 500.0, 5));
        assert_eq!(window.total_extent, 350_000.0);
    }
}

#[test]
fn test_row_gap_is_part_of_item_size() {
    // rowHeight 35 + rowGap 5
    let window = compute_window(&WindowState {
        total_count: 1000,
        item_size: 40.0,
        overscan: 0,
        scroll_offset: 400.0,
        viewport_size: 400.0,
    });
    assert_eq!(window.range(), Some((10, 20)));
    assert_eq!(window.total_extent, 40_000.0);
}

#[test]
fn test_engine_tracks_scroll_and_viewport() {
    let mut engine = WindowEngine::new(10_000, 35.0, 5).unwrap();
    engine.set_viewport_size(500.0);
    assert_eq!(engine.compute().range(), Some((0, 19)));

    engine.set_scroll_offset(3500.0);
    assert_eq!(engine.compute().range(), Some((95, 119)));

    engine.set_scroll_offset(-1.0);
    assert_eq!(engine.compute().range(), Some((0, 19)));
}

#[test]
fn test_engine_shrinking_source_clamps_window() {
    let mut engine = WindowEngine::new(10_000, 35.0, 5).unwrap();
    engine.set_viewport_size(500.0);
    engine.set_scroll_offset(3500.0);
    engine.set_total_count(50);

    let window = engine.compute();
    assert_eq!(window.range(), Some((44, 49)));
    assert_eq!(engine.total_extent(), 1750.0);
}

#[test]
fn test_engine_item_lookup() {
    let engine = WindowEngine::new(10, 35.0, 0).unwrap();
    let item = engine.item(9).unwrap();
    assert_eq!(item.start, 315.0);
    assert_eq!(item.end(), 350.0);
    assert!(engine.item(10).is_none());
    assert_eq!(engine.index_at(349.9), Some(9));
    assert_eq!(engine.index_at(350.0), None);
    assert_eq!(engine.index_at(f64::NAN), None);
}
