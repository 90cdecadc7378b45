//! Row records and the read-only data source the engine indexes into.

use serde::{Deserialize, Serialize};

/// One immutable table row: a stable identity plus its cell values in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    pub id: u64,
    pub cols: Vec<String>,
}

impl RowRecord {
    pub fn new(id: u64, cols: Vec<String>) -> Self {
        Self { id, cols }
    }
}

/// Ordered, index-addressable rows.
///
/// The engine assumes the source does not change while it is attached. A source
/// whose length changes must be handed back through
/// [`GridView::reconfigure_rows`](crate::viewer::GridView::reconfigure_rows).
pub trait RowSource {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Row at `index`, or `None` past the end.
    fn row(&self, index: usize) -> Option<&RowRecord>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RowSource for [RowRecord] {
    fn len(&self) -> usize {
        <[RowRecord]>::len(self)
    }

    fn row(&self, index: usize) -> Option<&RowRecord> {
        self.get(index)
    }
}

impl RowSource for Vec<RowRecord> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn row(&self, index: usize) -> Option<&RowRecord> {
        self.get(index)
    }
}

/// Build the demo dataset: `rows` records of `cols` cells labelled `R{row}C{col}`
/// (both 1-based), with `id` equal to the 0-based row index.
pub fn generate_rows(rows: usize, cols: usize) -> Vec<RowRecord> {
    (0..rows)
        .map(|r| {
            let cells = (0..cols).map(|c| format!("R{}C{}", r + 1, c + 1)).collect();
            RowRecord::new(u64::try_from(r).unwrap_or(u64::MAX), cells)
        })
        .collect()
}
