//! Render backend trait and the frame data handed to it.
//!
//! A [`Frame`] is everything the compositor needs for one paint: the visible
//! rows with their vertical descriptors and horizontal layouts, plus the
//! extents it sizes the scroll surface with.

use serde::Serialize;

use crate::error::Result;
use crate::layout::{RowLayout, Viewport};
use crate::types::VirtualItem;

/// One visible row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRow<'a> {
    /// Identity of the source row (stable render key).
    pub id: u64,
    pub item: VirtualItem,
    pub layout: RowLayout<'a>,
}

/// Output of one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<'a> {
    /// Visible rows, top to bottom.
    pub rows: Vec<FrameRow<'a>>,
    /// Height of the full virtual content.
    pub total_extent: f64,
    /// Width of the full row content.
    pub content_width: f64,
    /// Painted height of a row (the item size minus the row gap).
    pub row_height: f64,
    pub column_width: u32,
    pub pinned_width: f64,
    /// A resize drag is in progress.
    pub handle_active: bool,
    pub viewport: Viewport,
}

impl Frame<'_> {
    /// Inclusive index range of the visible rows.
    pub fn range(&self) -> Option<(usize, usize)> {
        Some((self.rows.first()?.item.index, self.rows.last()?.item.index))
    }
}

/// Trait for render backends
///
/// Implementations paint a [`Frame`]: they position rows at their offsets and
/// keep sticky cells fixed against horizontal scroll.
pub trait RenderBackend {
    /// Initialize the backend
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resize the render surface
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Render a frame
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Get the current width
    fn width(&self) -> u32;

    /// Get the current height
    fn height(&self) -> u32;
}
