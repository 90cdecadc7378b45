//! Plain-text backend: one line per visible row.
//!
//! Pinned cells come first, then `‖` for the handle, then the scrolling cells
//! that intersect the viewport after horizontal scroll. Used by the CLI and in
//! tests to see what a compositor would show.

use std::fmt::Write as _;

use super::backend::{Frame, RenderBackend};
use crate::error::Result;

/// Renders frames into a string buffer.
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
    width: u32,
    height: u32,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the last rendered frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl RenderBackend for TextRenderer {
    fn resize(&mut self, width: u32, height: u32, _dpr: f32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.output.clear();
        let viewport = &frame.viewport;
        let range = frame
            .range()
            .map(|(first, last)| format!("{first}..={last}"))
            .unwrap_or_else(|| "empty".to_string());
        let _ = writeln!(
            self.output,
            "rows {range} | extent {} | scroll ({}, {}) | width {}{}",
            frame.total_extent,
            viewport.scroll_x,
            viewport.scroll_y,
            frame.column_width,
            if frame.handle_active { " (resizing)" } else { "" }
        );

        let scroll_left = frame.pinned_width + crate::layout::HANDLE_WIDTH;
        for row in &frame.rows {
            let _ = write!(
                self.output,
                "{:>7} @{:>10.1} |",
                row.item.index,
                viewport.to_screen_y(&row.item)
            );
            for cell in &row.layout.pinned {
                let _ = write!(self.output, " {}", cell.text);
            }
            self.output.push_str(" ‖");
            for cell in &row.layout.scrollable {
                let x = viewport.to_screen_x(cell);
                // Hidden under the sticky block or past the right edge.
                if x + cell.width <= scroll_left || x >= viewport.width {
                    continue;
                }
                let _ = write!(self.output, " {}", cell.text);
            }
            self.output.push('\n');
        }
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
