//! Property tests for windowing, resizing and row composition.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use proptest::prelude::*;
use stickygrid::layout::{compose_row, compute_window, WindowState};
use stickygrid::resize::{ListenerRegistry, ResizeController, WidthBounds};
use stickygrid::RowRecord;

// Integer-valued inputs keep the floor divisions exact.
fn window_state() -> impl Strategy<Value = WindowState> {
    (0usize..200_000, 1u16..400, 0usize..20, 0u32..10_000_000, 0u32..5_000).prop_map(
        |(total_count, item_size, overscan, scroll, viewport)| WindowState {
            total_count,
            item_size: f64::from(item_size),
            overscan,
            scroll_offset: f64::from(scroll),
            viewport_size: f64::from(viewport),
        },
    )
}

fn row(max_cols: usize) -> impl Strategy<Value = RowRecord> {
    (any::<u64>(), prop::collection::vec("[a-z0-9]{0,6}", 0..max_cols))
        .prop_map(|(id, cols)| RowRecord::new(id, cols))
}

proptest! {
    #[test]
    fn window_size_is_bounded(state in window_state()) {
        let window = compute_window(&state);
        let bound = (state.viewport_size / state.item_size).ceil() as usize + 2 * state.overscan + 2;
        prop_assert!(window.len() <= bound, "{} > {}", window.len(), bound);
        if state.total_count > 0 {
            prop_assert!(!window.is_empty());
        }
    }

    #[test]
    fn window_indices_are_valid(state in window_state()) {
        let window = compute_window(&state);
        for item in &window.items {
            prop_assert!(item.index < state.total_count);
            prop_assert_eq!(item.start, item.index as f64 * state.item_size);
            prop_assert_eq!(item.size, state.item_size);
        }
    }

    #[test]
    fn window_is_strictly_increasing(state in window_state()) {
        let window = compute_window(&state);
        for pair in window.items.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
            prop_assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn extent_is_independent_of_scroll(state in window_state(), other_scroll in 0u32..10_000_000) {
        let a = compute_window(&state);
        let b = compute_window(&WindowState { scroll_offset: f64::from(other_scroll), ..state });
        prop_assert_eq!(a.total_extent, state.total_count as f64 * state.item_size);
        prop_assert_eq!(a.total_extent, b.total_extent);
    }

    #[test]
    fn clamp_is_idempotent(x in prop::num::f64::ANY, lo in 1u32..500, span in 1u32..500) {
        let bounds = WidthBounds::new(lo, lo + span);
        let once = bounds.clamp(x);
        let twice = bounds.clamp(f64::from(once.get()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn width_stays_in_bounds_during_drag(
        start in -5_000.0f64..5_000.0,
        moves in prop::collection::vec(prop::num::f64::ANY, 0..64),
    ) {
        let mut c = ResizeController::new(ListenerRegistry::new(), WidthBounds::default(), 150);
        c.pointer_down(start);
        for x in moves {
            c.pointer_move(x);
            prop_assert!((60..=400).contains(&c.width()), "width {}", c.width());
        }
        c.pointer_up();
        prop_assert_eq!(c.hub().live(), 0);
    }

    #[test]
    fn split_reproduces_columns(record in row(24), sticky in 0usize..24, width in 60u32..=400) {
        let n = record.cols.len();
        let layout = compose_row(&record, sticky, width, 150);
        let pinned = sticky.min(n);
        prop_assert_eq!(layout.pinned.len(), pinned);
        prop_assert_eq!(layout.scrollable.len(), n - pinned);

        let rebuilt: Vec<&str> = layout.cells().map(|c| c.text).collect();
        let original: Vec<&str> = record.cols.iter().map(String::as_str).collect();
        prop_assert_eq!(rebuilt, original);
        prop_assert!(layout.cells().enumerate().all(|(i, c)| c.key == i));
    }
}
