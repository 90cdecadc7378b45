//! Layout engine: which rows exist, where they sit, and how each row splits
//! into pinned and scrolling columns.
//!
//! This module handles:
//! - The vertical window of materialized rows (uniform row size, overscan)
//! - Horizontal composition of a row around the shared pinned width
//! - Viewport state and content-to-screen mapping for sticky cells

mod row_layout;
mod viewport;
mod window;

pub use row_layout::{
    compose_row, content_width, CellBox, HandleBox, RowComposer, RowLayout, HANDLE_WIDTH,
};
pub use viewport::Viewport;
pub use window::{compute_window, Window, WindowEngine, WindowState};
