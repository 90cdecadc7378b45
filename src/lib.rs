//! stickygrid - windowed table with pinned, resizable columns
//!
//! Renders very large row sets by materializing only the rows near the
//! viewport:
//! - Uniform-size vertical windowing with overscan
//! - Leading columns pinned while the rest scroll horizontally
//! - One shared pinned width, adjusted by dragging a handle
//! - Canvas 2D rendering in the browser, plain text everywhere else
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { StickyGrid } from 'stickygrid';
//! await init();
//! const grid = new StickyGrid(canvas, devicePixelRatio, { totalCount: 10000 });
//! grid.setRenderCallback(() => requestAnimationFrame(() => grid.render()));
//! grid.render();
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use stickygrid::{generate_rows, GridConfig, GridView, ListenerRegistry, TextRenderer};
//!
//! let config = GridConfig { total_count: 100, ..GridConfig::default() };
//! let mut view = GridView::new(&config, generate_rows(100, 14), ListenerRegistry::new())?;
//! view.set_scroll(0.0, 350.0);
//! let mut text = TextRenderer::new();
//! view.render(&mut text)?;
//! assert!(text.output().starts_with("rows 5..=29"));
//! # Ok::<(), stickygrid::GridError>(())
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod resize;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{GridConfig, ValidatedConfig};
pub use error::{GridError, Result};
pub use layout::{compose_row, compute_window, RowComposer, RowLayout, Viewport, WindowEngine};
pub use render::{Frame, RenderBackend, TextRenderer};
pub use resize::{ListenerRegistry, PointerHub, ResizeController, WidthBounds};
pub use types::*;
pub use viewer::GridView;

#[cfg(target_arch = "wasm32")]
pub use viewer::StickyGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
