//! Canvas 2D rendering backend.
//!
//! Paints a frame in two passes so the pinned block covers scrolling cells
//! that slide underneath it: scrolling cells first, then the sticky cells,
//! the handle and the divider at fixed x.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::backend::{Frame, RenderBackend};
use crate::error::Result;
use crate::layout::{CellBox, Viewport};

/// Colors used by the grid.
pub mod palette {
    pub const BACKGROUND: &str = "#FFFFFF";
    pub const PINNED_BG: &str = "#141414";
    pub const PINNED_TEXT: &str = "#F5F5F5";
    pub const CELL_TEXT: &str = "#202124";
    pub const CELL_BORDER: &str = "#DDDDDD";
    pub const HANDLE: &str = "#CCCCCC";
    pub const HANDLE_ACTIVE: &str = "#888888";
    pub const DIVIDER: &str = "#BABABA";
}

const CELL_PADDING_X: f64 = 8.0;
const FONT: &str = "13px sans-serif";

/// Canvas 2D renderer
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Set the CSS dimensions of the canvas element (logical pixels).
    pub fn set_canvas_css_size(&self, css_w: f64, css_h: f64) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", css_w));
        let _ = style.set_property("height", &format!("{}px", css_h));
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(1.0);
        self.ctx
            .stroke_rect(Self::crisp(x), Self::crisp(y), w.floor(), h.floor());
    }

    fn draw_cell(&self, cell: &CellBox<'_>, x: f64, y: f64, height: f64) {
        if cell.sticky {
            self.fill_rect(x, y, cell.width, height, palette::PINNED_BG);
        }
        self.stroke_rect(x, y, cell.width, height, palette::CELL_BORDER);

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(x, y, cell.width, height);
        self.ctx.clip();
        self.ctx.set_fill_style_str(if cell.sticky {
            palette::PINNED_TEXT
        } else {
            palette::CELL_TEXT
        });
        let _ = self
            .ctx
            .fill_text(cell.text, x + CELL_PADDING_X, y + height / 2.0);
        self.ctx.restore();
    }

    fn draw_divider(&self, x: f64, viewport: &Viewport, content_height: f64) {
        let x = Self::crisp(x);
        self.ctx.save();
        self.ctx.set_stroke_style_str(palette::DIVIDER);
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        self.ctx.move_to(x, 0.0);
        self.ctx.line_to(x, content_height.min(viewport.height));
        self.ctx.stroke();
        self.ctx.restore();
    }
}

impl RenderBackend for CanvasRenderer {
    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;

        // Set canvas buffer size to physical pixels
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        // Scale context for DPR (all drawing uses logical coordinates after this)
        let _ = self.ctx.scale(f64::from(dpr), f64::from(dpr));
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let viewport = &frame.viewport;
        self.fill_rect(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
            palette::BACKGROUND,
        );
        self.ctx.set_font(FONT);
        self.ctx.set_text_baseline("middle");

        // Scrolling cells, clipped to the right of the sticky block.
        for row in &frame.rows {
            let y = viewport.to_screen_y(&row.item);
            for cell in &row.layout.scrollable {
                let x = viewport.to_screen_x(cell);
                if x + cell.width <= row.layout.handle.x || x >= viewport.width {
                    continue;
                }
                self.draw_cell(cell, x, y, frame.row_height);
            }
        }

        // Sticky block and handle on top.
        let handle_color = if frame.handle_active {
            palette::HANDLE_ACTIVE
        } else {
            palette::HANDLE
        };
        for row in &frame.rows {
            let y = viewport.to_screen_y(&row.item);
            for cell in &row.layout.pinned {
                self.draw_cell(cell, viewport.to_screen_x(cell), y, frame.row_height);
            }
            let handle = &row.layout.handle;
            self.fill_rect(
                viewport.handle_screen_x(handle),
                y,
                handle.width,
                frame.row_height,
                handle_color,
            );
        }

        if frame.pinned_width > 0.0 {
            let visible_height = frame.total_extent - viewport.scroll_y;
            self.draw_divider(frame.pinned_width, viewport, visible_height);
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
