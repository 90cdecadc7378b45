//! Descriptors produced by the windowing engine.

use serde::Serialize;

/// One materialized row of the virtual list.
///
/// `start` is the absolute offset from the top of the full content, always
/// `index * size`. Recreated on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualItem {
    pub index: usize,
    pub start: f64,
    pub size: f64,
}

impl VirtualItem {
    /// Offset of the item's bottom edge.
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}
