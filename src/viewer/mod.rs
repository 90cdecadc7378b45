//! Grid view - ties the window engine, row composer and resize controller to
//! one observed viewport.
//!
//! Scroll and viewport changes recompute the vertical window. Width changes
//! from a resize drag only affect row composition, so the cached window is
//! reused for them.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::StickyGrid;

use tracing::debug;

use crate::config::{GridConfig, ValidatedConfig};
use crate::error::{GridError, Result};
use crate::layout::{content_width, RowComposer, Viewport, Window, WindowEngine};
use crate::render::{Frame, FrameRow, RenderBackend};
use crate::resize::{PointerHub, ResizeController, WidthBounds};
use crate::types::RowSource;

/// A windowed table with pinned, resizable leading columns.
pub struct GridView<S: RowSource, H: PointerHub> {
    config: ValidatedConfig,
    source: S,
    engine: WindowEngine,
    composer: RowComposer,
    resize: ResizeController<H>,
    viewport: Viewport,
    window: Window,
    needs_render: bool,
}

impl<S: RowSource, H: PointerHub> GridView<S, H> {
    /// Build a view over `source`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the config does not validate, the
    /// source length differs from `total_count`, or a row does not have
    /// `columns_per_row` cells.
    pub fn new(config: &GridConfig, source: S, hub: H) -> Result<Self> {
        let config = config.validate()?;
        if source.len() != config.total_count {
            return Err(GridError::invalid(format!(
                "row source has {} rows, totalCount is {}",
                source.len(),
                config.total_count
            )));
        }
        check_row_arity(&source, config.columns_per_row)?;
        let engine = WindowEngine::new(config.total_count, config.item_size, config.overscan)?;
        let resize = ResizeController::new(
            hub,
            WidthBounds::new(config.min_column_width, config.max_column_width),
            config.default_column_width,
        );
        let viewport = Viewport::default();
        debug!(
            total_count = config.total_count,
            sticky_columns = config.sticky_columns,
            "grid view created"
        );

        let mut view = Self {
            composer: RowComposer::new(config.sticky_columns, config.scroll_column_width),
            config,
            source,
            engine,
            resize,
            viewport,
            window: Window::default(),
            needs_render: true,
        };
        view.recompute_window();
        Ok(view)
    }

    fn recompute_window(&mut self) {
        self.engine.set_scroll_offset(self.viewport.scroll_y);
        self.engine.set_viewport_size(self.viewport.height);
        self.window = self.engine.compute();
        self.needs_render = true;
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The last computed window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize_controller(&self) -> &ResizeController<H> {
        &self.resize
    }

    /// Current pinned column width.
    pub fn column_width(&self) -> u32 {
        self.resize.width()
    }

    pub fn total_extent(&self) -> f64 {
        self.engine.total_extent()
    }

    /// Width of a full row at the current pinned width.
    pub fn content_width(&self) -> f64 {
        content_width(
            self.config.columns_per_row,
            self.config.sticky_columns,
            self.resize.width(),
            self.config.scroll_column_width,
        )
    }

    /// Largest `(x, y)` scroll offsets for the current viewport and pinned
    /// width.
    pub fn max_scroll(&self) -> (f64, f64) {
        self.viewport
            .max_scroll(self.content_width(), self.engine.total_extent())
    }

    /// Report a new viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.recompute_window();
    }

    /// Report a new scroll position.
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        let (prev_x, prev_y) = (self.viewport.scroll_x, self.viewport.scroll_y);
        self.viewport.set_scroll(x, y);
        if (self.viewport.scroll_y - prev_y).abs() > f64::EPSILON {
            self.recompute_window();
        } else if (self.viewport.scroll_x - prev_x).abs() > f64::EPSILON {
            self.needs_render = true;
        }
    }

    /// Replace the data source. The only supported way to change the row count.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if a row does not have `columns_per_row`
    /// cells. The current source is kept in that case.
    pub fn reconfigure_rows(&mut self, source: S) -> Result<()> {
        check_row_arity(&source, self.config.columns_per_row)?;
        self.config.total_count = source.len();
        self.engine.set_total_count(source.len());
        self.source = source;
        self.recompute_window();
        Ok(())
    }

    /// Compose the visible rows with the current pinned width.
    pub fn frame(&self) -> Frame<'_> {
        let width = self.resize.width();
        let rows = self
            .window
            .items
            .iter()
            .filter_map(|item| {
                let row = self.source.row(item.index)?;
                Some(FrameRow {
                    id: row.id,
                    item: *item,
                    layout: self.composer.compose(row, width),
                })
            })
            .collect();
        Frame {
            rows,
            total_extent: self.window.total_extent,
            content_width: self.content_width(),
            row_height: self.config.row_height,
            column_width: width,
            pinned_width: self.composer.pinned_width(width),
            handle_active: self.resize.is_active(),
            viewport: self.viewport,
        }
    }

    /// Paint the current frame with `backend` and clear the dirty flag.
    ///
    /// # Errors
    /// Propagates backend failures.
    pub fn render<B: RenderBackend>(&mut self, backend: &mut B) -> Result<()> {
        backend.render(&self.frame())?;
        self.needs_render = false;
        Ok(())
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Is the screen point over the resize handle of a visible row?
    pub fn hit_handle(&self, x: f64, y: f64) -> bool {
        let handle_x = self.composer.pinned_width(self.resize.width());
        if x < handle_x || x >= handle_x + crate::layout::HANDLE_WIDTH {
            return false;
        }
        if y < 0.0 || y >= self.viewport.height {
            return false;
        }
        let content_y = self.viewport.to_content_y(y);
        self.engine.index_at(content_y).is_some_and(|index| {
            let top = index as f64 * self.engine.item_size();
            content_y < top + self.config.row_height
        })
    }

    /// Start a resize drag at client x. Ignored while a drag is running.
    pub fn pointer_down(&mut self, x: f64) -> bool {
        let started = self.resize.pointer_down(x);
        if started {
            self.needs_render = true;
        }
        started
    }

    /// Pointer moved during a drag. The window is left untouched.
    pub fn pointer_move(&mut self, x: f64) -> Option<u32> {
        let before = self.resize.width();
        let width = self.resize.pointer_move(x)?;
        if width != before {
            self.needs_render = true;
        }
        Some(width)
    }

    pub fn pointer_up(&mut self) -> bool {
        let ended = self.resize.pointer_up();
        if ended {
            self.needs_render = true;
        }
        ended
    }

    pub fn capture_lost(&mut self) -> bool {
        let ended = self.resize.capture_lost();
        if ended {
            self.needs_render = true;
        }
        ended
    }
}

/// Every row must carry exactly `columns` cells. Content width is computed from
/// the configured count, not from the rows.
fn check_row_arity<S: RowSource>(source: &S, columns: usize) -> Result<()> {
    let mismatch = (0..source.len())
        .filter_map(|i| source.row(i))
        .find(|row| row.cols.len() != columns);
    match mismatch {
        Some(row) => Err(GridError::invalid(format!(
            "row {} has {} cells, columnsPerRow is {}",
            row.id,
            row.cols.len(),
            columns
        ))),
        None => Ok(()),
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
    use crate::resize::ListenerRegistry;
    use crate::types::{generate_rows, RowRecord};

    fn view(total: i64) -> GridView<Vec<RowRecord>, ListenerRegistry> {
        let config = GridConfig {
            total_count: total,
            ..GridConfig::default()
        };
        let rows = generate_rows(usize::try_from(total).unwrap(), 14);
        GridView::new(&config, rows, ListenerRegistry::new()).unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let mut v = view(10_000);
        v.set_viewport_size(1000.0, 500.0);
        let frame = v.frame();
        assert_eq!(frame.range(), Some((0, 19)));
        assert_eq!(frame.total_extent, 350_000.0);
        assert_eq!(frame.pinned_width, 600.0);
        assert_eq!(frame.content_width, 2105.0);
        assert_eq!(frame.rows[3].layout.pinned[0].text, "R4C1");
    }

    #[test]
    fn test_source_length_mismatch() {
        let config = GridConfig {
            total_count: 5,
            ..GridConfig::default()
        };
        let err = GridView::new(&config, generate_rows(4, 14), ListenerRegistry::new());
        assert!(matches!(err, Err(GridError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_width_change_keeps_window() {
        let mut v = view(1000);
        v.set_scroll(0.0, 3500.0);
        let before = v.window().clone();

        assert!(v.pointer_down(100.0));
        assert_eq!(v.pointer_move(150.0), Some(200));
        assert_eq!(v.window(), &before);
        assert!(v.frame().handle_active);
        v.pointer_up();
        assert_eq!(v.frame().pinned_width, 800.0);
        assert!(!v.frame().handle_active);
    }

    #[test]
    fn test_horizontal_scroll_does_not_recompute() {
        let mut v = view(1000);
        let before = v.window().clone();
        v.set_scroll(500.0, 0.0);
        assert_eq!(v.window(), &before);
        assert!(v.needs_render());
    }

    #[test]
    fn test_hit_handle() {
        let mut v = view(100);
        v.set_viewport_size(1000.0, 500.0);
        v.set_scroll(700.0, 0.0);
        // Handle stays at x = 600 whatever the horizontal scroll.
        assert!(v.hit_handle(602.0, 10.0));
        assert!(!v.hit_handle(605.0, 10.0));
        assert!(!v.hit_handle(300.0, 10.0));
        assert!(!v.hit_handle(602.0, 600.0));
    }

    #[test]
    fn test_hit_handle_below_last_row() {
        let mut v = view(3);
        v.set_viewport_size(1000.0, 500.0);
        assert!(v.hit_handle(601.0, 104.0));
        assert!(!v.hit_handle(601.0, 106.0));
    }

    #[test]
    fn test_reconfigure_rows() {
        let mut v = view(100);
        v.set_scroll(0.0, 3000.0);
        v.reconfigure_rows(generate_rows(10, 14)).unwrap();
        assert_eq!(v.total_extent(), 350.0);
        assert_eq!(v.window().range(), Some((4, 9)));

        let err = v.reconfigure_rows(vec![RowRecord::new(0, vec!["a".into()])]);
        assert!(err.is_err());
        assert_eq!(v.total_extent(), 350.0);
    }

    #[test]
    fn test_max_scroll() {
        let mut v = view(100);
        v.set_viewport_size(1000.0, 500.0);
        assert_eq!(v.max_scroll(), (1105.0, 3000.0));

        v.pointer_down(0.0);
        v.pointer_move(50.0);
        v.pointer_up();
        assert_eq!(v.max_scroll(), (1305.0, 3000.0));
    }

    #[test]
    fn test_render_clears_dirty_flag() {
        let mut v = view(10);
        let mut backend = crate::render::TextRenderer::new();
        assert!(v.needs_render());
        v.render(&mut backend).unwrap();
        assert!(!v.needs_render());
        assert!(backend.output().starts_with("rows 0..=9"));
    }
}
