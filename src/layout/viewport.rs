//! Viewport state: the observed scroll position and size of the visible area.

use serde::Serialize;

use super::row_layout::{CellBox, HandleBox};
use super::window::normalize_offset;
use crate::types::VirtualItem;

/// Viewport state - the visible area of the grid.
///
/// The grid does not own scrolling. The host reports positions here and the
/// viewport only normalizes them (negative or non-finite values become 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal scroll position in content coordinates
    pub scroll_x: f64,
    /// Vertical scroll position in content coordinates
    pub scroll_y: f64,
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 500.0)
    }
}

impl Viewport {
    /// Create a viewport of the given size, scrolled to the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: normalize_offset(width),
            height: normalize_offset(height),
        }
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll_x = normalize_offset(x);
        self.scroll_y = normalize_offset(y);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = normalize_offset(width);
        self.height = normalize_offset(height);
    }

    /// Largest scroll offsets that keep content under every viewport edge.
    pub fn max_scroll(&self, content_width: f64, content_height: f64) -> (f64, f64) {
        (
            (content_width - self.width).max(0.0),
            (content_height - self.height).max(0.0),
        )
    }

    /// Screen x of a cell. Sticky cells stay put, scrolling cells shift with
    /// `scroll_x`.
    pub fn to_screen_x(&self, cell: &CellBox<'_>) -> f64 {
        if cell.sticky {
            cell.x
        } else {
            cell.x - self.scroll_x
        }
    }

    /// Screen x of the resize handle. The handle is sticky.
    pub fn handle_screen_x(&self, handle: &HandleBox) -> f64 {
        handle.x
    }

    /// Screen y of a virtual row.
    pub fn to_screen_y(&self, item: &VirtualItem) -> f64 {
        item.start - self.scroll_y
    }

    /// Convert a screen y coordinate to content coordinates
    pub fn to_content_y(&self, screen_y: f64) -> f64 {
        screen_y + self.scroll_y
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_set_scroll_normalizes() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(-10.0, f64::NAN);
        assert_eq!((viewport.scroll_x, viewport.scroll_y), (0.0, 0.0));
        viewport.set_scroll(120.0, 4000.0);
        assert_eq!((viewport.scroll_x, viewport.scroll_y), (120.0, 4000.0));
    }

    #[test]
    fn test_sticky_cells_ignore_horizontal_scroll() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(300.0, 0.0);
        let pinned = CellBox {
            key: 0,
            text: "R1C1",
            x: 150.0,
            width: 150.0,
            sticky: true,
        };
        let moving = CellBox {
            sticky: false,
            x: 605.0,
            ..pinned.clone()
        };
        assert_eq!(viewport.to_screen_x(&pinned), 150.0);
        assert_eq!(viewport.to_screen_x(&moving), 305.0);
    }

    #[test]
    fn test_screen_y() {
        let mut viewport = Viewport::new(800.0, 500.0);
        viewport.set_scroll(0.0, 700.0);
        let item = VirtualItem {
            index: 21,
            start: 735.0,
            size: 35.0,
        };
        assert_eq!(viewport.to_screen_y(&item), 35.0);
        assert_eq!(viewport.to_content_y(35.0), 735.0);
    }

    #[test]
    fn test_max_scroll() {
        let viewport = Viewport::new(1000.0, 500.0);
        assert_eq!(viewport.max_scroll(2105.0, 350_000.0), (1105.0, 349_500.0));
        assert_eq!(viewport.max_scroll(10.0, 10.0), (0.0, 0.0));
    }
}
