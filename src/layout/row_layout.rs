//! Horizontal composition of one row into a pinned block and a scrolling block.
//!
//! Layout of a row, in content coordinates:
//! ```text
//! | pinned 0 | pinned 1 | ... | handle | scroll 0 | scroll 1 | ...
//! 0          w          2w    k*w      k*w+5
//! ```
//! Pinned cells and the handle are sticky: the compositor draws them at their
//! content x regardless of horizontal scroll. Scrolling cells move with it.

use serde::Serialize;

use crate::types::RowRecord;

/// Width of the resize handle between the pinned and scrolling blocks.
pub const HANDLE_WIDTH: f64 = 5.0;

/// A positioned cell within a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBox<'a> {
    /// Original column index, stable across width changes.
    pub key: usize,
    pub text: &'a str,
    pub x: f64,
    pub width: f64,
    /// True for pinned cells.
    pub sticky: bool,
}

impl CellBox<'_> {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// The drag handle that sits on the pinned block's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleBox {
    pub x: f64,
    pub width: f64,
}

impl HandleBox {
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Horizontal layout of one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout<'a> {
    pub pinned: Vec<CellBox<'a>>,
    pub handle: HandleBox,
    pub scrollable: Vec<CellBox<'a>>,
    /// `sticky_count * resizable_width`.
    pub pinned_width: f64,
    /// Right edge of the last cell; sizes the horizontal scroll surface.
    pub content_width: f64,
}

impl<'a> RowLayout<'a> {
    /// All cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = &CellBox<'a>> {
        self.pinned.iter().chain(self.scrollable.iter())
    }
}

/// Total width taken by a row's pinned block, handle and scrolling block.
pub fn content_width(
    column_count: usize,
    sticky_count: usize,
    resizable_width: u32,
    scroll_column_width: u32,
) -> f64 {
    let sticky = sticky_count.min(column_count);
    let pinned_width = sticky as f64 * f64::from(resizable_width);
    pinned_width + HANDLE_WIDTH + (column_count - sticky) as f64 * f64::from(scroll_column_width)
}

/// Split `row` into its pinned prefix and scrolling suffix and position every cell.
///
/// Every pinned column shares `resizable_width`. A `sticky_count` larger than the
/// row is treated as "all columns pinned".
pub fn compose_row(
    row: &RowRecord,
    sticky_count: usize,
    resizable_width: u32,
    scroll_column_width: u32,
) -> RowLayout<'_> {
    let split = sticky_count.min(row.cols.len());
    let (pinned_cols, scroll_cols) = row.cols.split_at(split);
    let pinned_col_width = f64::from(resizable_width);
    let scroll_col_width = f64::from(scroll_column_width);

    let pinned: Vec<CellBox<'_>> = pinned_cols
        .iter()
        .enumerate()
        .map(|(i, text)| CellBox {
            key: i,
            text: text.as_str(),
            x: i as f64 * pinned_col_width,
            width: pinned_col_width,
            sticky: true,
        })
        .collect();

    let pinned_width = split as f64 * pinned_col_width;
    let handle = HandleBox {
        x: pinned_width,
        width: HANDLE_WIDTH,
    };
    let scroll_origin = pinned_width + HANDLE_WIDTH;

    let scrollable: Vec<CellBox<'_>> = scroll_cols
        .iter()
        .enumerate()
        .map(|(i, text)| CellBox {
            key: i + split,
            text: text.as_str(),
            x: scroll_origin + i as f64 * scroll_col_width,
            width: scroll_col_width,
            sticky: false,
        })
        .collect();

    RowLayout {
        pinned,
        handle,
        scrollable,
        pinned_width,
        content_width: content_width(
            row.cols.len(),
            split,
            resizable_width,
            scroll_column_width,
        ),
    }
}

/// Fixed column metrics applied to every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowComposer {
    pub sticky_count: usize,
    pub scroll_column_width: u32,
}

impl RowComposer {
    pub fn new(sticky_count: usize, scroll_column_width: u32) -> Self {
        Self {
            sticky_count,
            scroll_column_width,
        }
    }

    pub fn compose<'a>(&self, row: &'a RowRecord, resizable_width: u32) -> RowLayout<'a> {
        compose_row(
            row,
            self.sticky_count,
            resizable_width,
            self.scroll_column_width,
        )
    }

    /// Pinned block width for `resizable_width`, without composing a row.
    pub fn pinned_width(&self, resizable_width: u32) -> f64 {
        self.sticky_count as f64 * f64::from(resizable_width)
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
    use crate::types::generate_rows;

    #[test]
    fn test_split_fourteen_by_four() {
        let rows = generate_rows(1, 14);
        let layout = compose_row(&rows[0], 4, 150, 150);

        let pinned: Vec<&str> = layout.pinned.iter().map(|c| c.text).collect();
        assert_eq!(pinned, ["R1C1", "R1C2", "R1C3", "R1C4"]);
        assert_eq!(layout.scrollable.len(), 10);
        assert_eq!(layout.scrollable[0].text, "R1C5");
        assert_eq!(layout.scrollable[9].text, "R1C14");
    }

    #[test]
    fn test_geometry() {
        let rows = generate_rows(1, 6);
        let layout = compose_row(&rows[0], 2, 100, 80);

        assert_eq!(layout.pinned_width, 200.0);
        assert_eq!(layout.pinned[1].x, 100.0);
        assert_eq!(layout.handle, HandleBox { x: 200.0, width: 5.0 });
        assert_eq!(layout.scrollable[0].x, 205.0);
        assert_eq!(layout.scrollable[3].x, 205.0 + 240.0);
        assert_eq!(layout.content_width, 205.0 + 320.0);
        assert_eq!(layout.content_width, layout.scrollable[3].right());
    }

    #[test]
    fn test_keys_survive_width_change() {
        let rows = generate_rows(1, 6);
        let narrow = compose_row(&rows[0], 3, 60, 150);
        let wide = compose_row(&rows[0], 3, 400, 150);

        let keys = |l: &RowLayout<'_>| {
            l.cells()
                .map(|c| (c.key, c.text.to_string()))
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&narrow), keys(&wide));
        assert_eq!(wide.scrollable[0].key, 3);
    }

    #[test]
    fn test_no_sticky_columns() {
        let rows = generate_rows(1, 3);
        let layout = compose_row(&rows[0], 0, 150, 100);
        assert!(layout.pinned.is_empty());
        assert_eq!(layout.handle.x, 0.0);
        assert_eq!(layout.scrollable[0].x, HANDLE_WIDTH);
    }

    #[test]
    fn test_sticky_beyond_row_pins_everything() {
        let rows = generate_rows(1, 3);
        let layout = compose_row(&rows[0], 10, 100, 100);
        assert_eq!(layout.pinned.len(), 3);
        assert!(layout.scrollable.is_empty());
        assert_eq!(layout.pinned_width, 300.0);
    }

    #[test]
    fn test_handle_hit() {
        let handle = HandleBox { x: 600.0, width: 5.0 };
        assert!(handle.contains_x(600.0));
        assert!(handle.contains_x(604.9));
        assert!(!handle.contains_x(605.0));
        assert!(!handle.contains_x(599.0));
    }
}
