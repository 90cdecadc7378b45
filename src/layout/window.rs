//! Windowing engine: maps a vertical scroll position to the rows that must exist.
//!
//! Rows share one uniform size, so every offset is plain arithmetic and a
//! recomputation costs O(visible rows) regardless of the total row count.

use tracing::{debug, trace};

use crate::error::{GridError, Result};
use crate::types::VirtualItem;

/// Inputs of one window computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowState {
    pub total_count: usize,
    pub item_size: f64,
    pub overscan: usize,
    pub scroll_offset: f64,
    pub viewport_size: f64,
}

/// Result of one window computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Window {
    /// Materialized rows in ascending index (top-to-bottom) order.
    pub items: Vec<VirtualItem>,
    /// Height of the full virtual content: `total_count * item_size`.
    pub total_extent: f64,
}

impl Window {
    /// Inclusive index range of the items, `None` when empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        Some((self.items.first()?.index, self.items.last()?.index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Replace negative or non-finite scroll/viewport input with zero.
pub(crate) fn normalize_offset(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Row index containing `offset`, saturating at `usize::MAX`.
/// The cast is safe because the quotient is finite and non-negative, and
/// float-to-int `as` saturates.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_floor(offset: f64, item_size: f64) -> usize {
    let q = (offset / item_size).floor();
    if q.is_nan() || q <= 0.0 {
        0
    } else {
        q as usize
    }
}

/// Compute the visible window for `state`. Never fails, never yields an index
/// `>= total_count`.
pub fn compute_window(state: &WindowState) -> Window {
    let item_size = state.item_size;
    let total_extent = state.total_count as f64 * item_size;
    if state.total_count == 0 {
        return Window {
            items: Vec::new(),
            total_extent: 0.0,
        };
    }

    let scroll = normalize_offset(state.scroll_offset);
    let viewport = normalize_offset(state.viewport_size);
    let last_index = state.total_count - 1;

    // Clamp before widening so a scroll past the end still shows the tail.
    let first_visible = index_floor(scroll, item_size).min(last_index);
    let last_visible = index_floor(scroll + viewport, item_size).min(last_index);

    let first = first_visible.saturating_sub(state.overscan);
    let last = last_visible.saturating_add(state.overscan).min(last_index);

    let items: Vec<VirtualItem> = (first..=last)
        .map(|index| VirtualItem {
            index,
            start: index as f64 * item_size,
            size: item_size,
        })
        .collect();

    trace!(first, last, scroll, viewport, "window recomputed");

    Window {
        items,
        total_extent,
    }
}

/// Owns the validated windowing parameters and the last observed scroll state.
#[derive(Debug, Clone)]
pub struct WindowEngine {
    state: WindowState,
}

impl WindowEngine {
    /// Create an engine for `total_count` rows of `item_size` each.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `item_size` is not a positive finite number.
    pub fn new(total_count: usize, item_size: f64, overscan: usize) -> Result<Self> {
        if !item_size.is_finite() || item_size <= 0.0 {
            return Err(GridError::invalid(format!(
                "item size must be a positive number, got {item_size}"
            )));
        }
        debug!(total_count, item_size, overscan, "window engine configured");
        Ok(Self {
            state: WindowState {
                total_count,
                item_size,
                overscan,
                scroll_offset: 0.0,
                viewport_size: 0.0,
            },
        })
    }

    pub fn total_count(&self) -> usize {
        self.state.total_count
    }

    pub fn item_size(&self) -> f64 {
        self.state.item_size
    }

    /// Record a new scroll position. Out-of-range input is normalized.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.state.scroll_offset = normalize_offset(offset);
    }

    /// Record a new viewport height. Out-of-range input is normalized.
    pub fn set_viewport_size(&mut self, size: f64) {
        self.state.viewport_size = normalize_offset(size);
    }

    /// Point the engine at a data source of a different length.
    pub fn set_total_count(&mut self, total_count: usize) {
        debug!(
            from = self.state.total_count,
            to = total_count,
            "window engine row count reconfigured"
        );
        self.state.total_count = total_count;
    }

    /// Compute the window for the current state.
    pub fn compute(&self) -> Window {
        compute_window(&self.state)
    }

    /// Height of the full virtual content.
    pub fn total_extent(&self) -> f64 {
        self.state.total_count as f64 * self.state.item_size
    }

    /// Descriptor for `index`, whether or not it is currently visible.
    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        (index < self.state.total_count).then(|| VirtualItem {
            index,
            start: index as f64 * self.state.item_size,
            size: self.state.item_size,
        })
    }

    /// Row under a vertical content offset, or `None` past the last row.
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        if !offset.is_finite() || offset < 0.0 || offset >= self.total_extent() {
            return None;
        }
        Some(index_floor(offset, self.state.item_size).min(self.state.total_count - 1))
    }

    /// Largest scroll offset that still fills a viewport of `viewport_size`.
    pub fn max_scroll_offset(&self, viewport_size: f64) -> f64 {
        (self.total_extent() - normalize_offset(viewport_size)).max(0.0)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn state(total_count: usize, scroll_offset: f64, viewport_size: f64) -> WindowState {
        WindowState {
            total_count,
            item_size: 35.0,
            overscan: 5,
            scroll_offset,
            viewport_size,
        }
    }

    #[test]
    fn test_initial_window() {
        let window = compute_window(&state(10_000, 0.0, 500.0));
        assert_eq!(window.range(), Some((0, 19)));
        assert_eq!(window.total_extent, 350_000.0);
    }

    #[test]
    fn test_middle_window_has_overscan_on_both_sides() {
        // floor(3500 / 35) = 100, floor(4000 / 35) = 114
        let window = compute_window(&state(10_000, 3500.0, 500.0));
        assert_eq!(window.range(), Some((95, 119)));
        assert_eq!(window.items[0].start, 95.0 * 35.0);
    }

    #[test]
    fn test_scrolled_past_end_shows_tail() {
        let window = compute_window(&state(10_000, 1.0e9, 500.0));
        assert_eq!(window.range(), Some((9994, 9999)));
    }

    #[test]
    fn test_empty_source() {
        let window = compute_window(&state(0, 100.0, 500.0));
        assert!(window.is_empty());
        assert_eq!(window.total_extent, 0.0);
        assert_eq!(window.range(), None);
    }

    #[test]
    fn test_negative_and_nan_inputs_are_normalized() {
        let a = compute_window(&state(100, -50.0, f64::NAN));
        let b = compute_window(&state(100, 0.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a.range(), Some((0, 5)));
    }

    #[test]
    fn test_fewer_rows_than_viewport() {
        let window = compute_window(&state(3, 0.0, 500.0));
        assert_eq!(window.range(), Some((0, 2)));
    }

    #[test]
    fn test_engine_rejects_bad_item_size() {
        assert!(WindowEngine::new(10, 0.0, 0).is_err());
        assert!(WindowEngine::new(10, -1.0, 0).is_err());
        assert!(WindowEngine::new(10, f64::INFINITY, 0).is_err());
    }

    #[test]
    fn test_engine_index_at() {
        let engine = WindowEngine::new(10, 20.0, 0).unwrap();
        assert_eq!(engine.index_at(0.0), Some(0));
        assert_eq!(engine.index_at(19.9), Some(0));
        assert_eq!(engine.index_at(20.0), Some(1));
        assert_eq!(engine.index_at(199.0), Some(9));
        assert_eq!(engine.index_at(200.0), None);
        assert_eq!(engine.index_at(-1.0), None);
    }

    #[test]
    fn test_engine_max_scroll_and_reconfigure() {
        let mut engine = WindowEngine::new(10, 20.0, 1).unwrap();
        assert_eq!(engine.max_scroll_offset(50.0), 150.0);
        assert_eq!(engine.max_scroll_offset(500.0), 0.0);

        engine.set_total_count(2);
        engine.set_viewport_size(500.0);
        assert_eq!(engine.compute().range(), Some((0, 1)));
        assert_eq!(engine.item(2), None);
        assert_eq!(engine.item(1).unwrap().start, 20.0);
    }
}
