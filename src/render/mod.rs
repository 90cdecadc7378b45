//! Rendering with pluggable backends.
//!
//! This module provides:
//! - The frame data a compositor consumes
//! - A plain-text backend (CLI, tests)
//! - A Canvas 2D backend (browser)

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

pub use backend::{Frame, FrameRow, RenderBackend};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;
