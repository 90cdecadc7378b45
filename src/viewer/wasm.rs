//! `StickyGrid` - the WASM-exported browser binding.
//!
//! The page owns scrolling: a transparent native scroll container sits on top
//! of the canvas with a spacer sized to the content, and its scroll position is
//! fed back into the view. The canvas itself never scrolls.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, HtmlDivElement, HtmlElement, MouseEvent};

use super::GridView;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::render::{CanvasRenderer, RenderBackend};
use crate::resize::{DocumentPointerHub, PointerSignal};
use crate::types::{generate_rows, RowRecord};

type BrowserView = GridView<Vec<RowRecord>, DocumentPointerHub>;

pub(crate) struct SharedState {
    view: BrowserView,
    render_callback: Option<Function>,
}

/// The grid exported to JavaScript
#[wasm_bindgen]
pub struct StickyGrid {
    state: Rc<RefCell<SharedState>>,
    renderer: CanvasRenderer,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
    scroll_container: Option<HtmlDivElement>,
    scroll_spacer: Option<HtmlDivElement>,
    spacer_size: (f64, f64),
}

fn scroll_left_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_left()))
}

fn scroll_top_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_top()))
}

fn invoke_render_callback(callback: Option<Function>) {
    if let Some(callback) = callback {
        let _ = callback.call0(&JsValue::NULL);
    }
}

/// Route drag signals from the document into the view.
fn dispatch_pointer(state: &Weak<RefCell<SharedState>>, signal: PointerSignal) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let callback = {
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        let changed = match signal {
            PointerSignal::Move(x) => s.view.pointer_move(x).is_some(),
            PointerSignal::Up => s.view.pointer_up(),
            PointerSignal::CaptureLost => s.view.capture_lost(),
        };
        if !changed || !s.view.needs_render() {
            return;
        }
        s.render_callback.clone()
    };
    invoke_render_callback(callback);
}

fn parse_config(config: JsValue) -> Result<GridConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(GridConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from(GridError::invalid(e.to_string())))
}

#[wasm_bindgen]
impl StickyGrid {
    /// Create a grid on `canvas`, filled with generated `R{r}C{c}` rows.
    ///
    /// `config` is a plain object with camelCase keys; missing keys take
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f32, config: JsValue) -> Result<StickyGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        let total = usize::try_from(config.total_count.max(0)).unwrap_or(0);
        let columns = usize::try_from(config.columns_per_row.max(0)).unwrap_or(0);
        let rows = generate_rows(total, columns);

        let hub = DocumentPointerHub::new();
        let mut view = GridView::new(&config, rows, hub.clone())?;

        let physical_width = canvas.width().max(1);
        let physical_height = canvas.height().max(1);
        let mut renderer = CanvasRenderer::new(canvas.clone())?;
        renderer.init()?;
        renderer.resize(physical_width, physical_height, dpr);
        let logical_width = f64::from(physical_width) / f64::from(dpr);
        let logical_height = f64::from(physical_height) / f64::from(dpr);
        view.set_viewport_size(logical_width, logical_height);
        let spacer_size = (view.content_width(), view.total_extent());

        let state = Rc::new(RefCell::new(SharedState {
            view,
            render_callback: None,
        }));

        {
            let weak = Rc::downgrade(&state);
            hub.set_handler(move |signal| dispatch_pointer(&weak, signal));
        }

        let (scroll_container, scroll_spacer, scroll_closure) =
            Self::setup_native_scroll(&canvas, &state, spacer_size);

        let event_target: &HtmlElement = scroll_container
            .as_ref()
            .map(|c| c.as_ref() as &HtmlElement)
            .unwrap_or(&canvas);
        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down: start a resize drag when it lands on the handle.
        {
            let state = Rc::clone(&state);
            let container_ref = event_target.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = container_ref.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                let callback = {
                    let Ok(mut s) = state.try_borrow_mut() else {
                        return;
                    };
                    if !s.view.hit_handle(x, y) {
                        return;
                    }
                    event.prevent_default();
                    if !s.view.pointer_down(f64::from(event.client_x())) {
                        return;
                    }
                    s.render_callback.clone()
                };
                invoke_render_callback(callback);
            }) as Box<dyn FnMut(MouseEvent)>);
            event_target
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Cursor feedback over the handle
        {
            let state = Rc::clone(&state);
            let container_ref = event_target.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = container_ref.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                let over = state.try_borrow().is_ok_and(|s| {
                    s.view.resize_controller().is_active() || s.view.hit_handle(x, y)
                });
                let cursor = if over { "col-resize" } else { "default" };
                let _ = container_ref.style().set_property("cursor", cursor);
            }) as Box<dyn FnMut(MouseEvent)>);
            event_target
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        Ok(StickyGrid {
            state,
            renderer,
            closures,
            scroll_closure,
            scroll_container,
            scroll_spacer,
            spacer_size,
        })
    }

    /// Wrap the canvas in a native scroll container with a content-sized spacer.
    fn setup_native_scroll(
        canvas: &HtmlCanvasElement,
        state: &Rc<RefCell<SharedState>>,
        (width, height): (f64, f64),
    ) -> (
        Option<HtmlDivElement>,
        Option<HtmlDivElement>,
        Option<Closure<dyn FnMut(Event)>>,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return (None, None, None);
        };
        let Some(parent) = canvas.parent_element() else {
            return (None, None, None);
        };
        let create_div = || -> Option<HtmlDivElement> {
            document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
        };
        let (Some(scroll_container), Some(spacer)) = (create_div(), create_div()) else {
            return (None, None, None);
        };

        if let Some(parent_el) = parent.dyn_ref::<HtmlElement>() {
            let parent_style = parent_el.style();
            if parent_style
                .get_property_value("position")
                .unwrap_or_default()
                .is_empty()
            {
                let _ = parent_style.set_property("position", "relative");
            }
        }

        // Transparent container on top of the canvas receives wheel and mouse
        // input. The canvas underneath stays viewport-sized.
        let container_style = scroll_container.style();
        let _ = container_style.set_property("position", "absolute");
        let _ = container_style.set_property("inset", "0");
        let _ = container_style.set_property("overflow", "auto");
        let _ = container_style.set_property("z-index", "1");
        let _ = container_style.set_property("background", "transparent");
        let _ = scroll_container.set_attribute("data-stickygrid-scroll", "");

        let spacer_style = spacer.style();
        let _ = spacer_style.set_property("position", "absolute");
        let _ = spacer_style.set_property("top", "0");
        let _ = spacer_style.set_property("left", "0");
        let _ = spacer_style.set_property("width", &format!("{width}px"));
        let _ = spacer_style.set_property("height", &format!("{height}px"));

        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("position", "absolute");
        let _ = canvas_style.set_property("top", "0");
        let _ = canvas_style.set_property("left", "0");
        let _ = canvas_style.set_property("pointer-events", "none");
        let _ = canvas_style.set_property("z-index", "0");

        let _ = scroll_container.append_child(&spacer);
        let _ = parent.append_child(&scroll_container);

        let state = Rc::clone(state);
        let container = scroll_container.clone();
        let scroll_closure = Closure::wrap(Box::new(move |_event: Event| {
            let callback = {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                s.view
                    .set_scroll(scroll_left_f64(&container), scroll_top_f64(&container));
                s.render_callback.clone()
            };
            invoke_render_callback(callback);
        }) as Box<dyn FnMut(Event)>);
        let _ = scroll_container
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref());

        (Some(scroll_container), Some(spacer), Some(scroll_closure))
    }

    /// Resize the spacer when the content size changed.
    fn update_scroll_spacer(&mut self) {
        let Some(spacer) = &self.scroll_spacer else {
            return;
        };
        // Read under the borrow, mutate the DOM after: a spacer change can fire
        // a synchronous scroll event whose closure borrows the state.
        let size = {
            let s = self.state.borrow();
            (s.view.content_width(), s.view.total_extent())
        };
        let (old_w, old_h) = self.spacer_size;
        if (size.0 - old_w).abs() < 0.5 && (size.1 - old_h).abs() < 0.5 {
            return;
        }
        self.spacer_size = size;
        let style = spacer.style();
        let _ = style.set_property("width", &format!("{}px", size.0));
        let _ = style.set_property("height", &format!("{}px", size.1));
    }

    /// Replace the rows. Accepts an array of `{ id, cols }` objects.
    #[wasm_bindgen(js_name = "setRows")]
    pub fn set_rows(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<RowRecord> = serde_wasm_bindgen::from_value(rows)
            .map_err(|e| JsValue::from(GridError::invalid(e.to_string())))?;
        self.state.borrow_mut().view.reconfigure_rows(rows)?;
        self.update_scroll_spacer();
        Ok(())
    }

    /// Scroll to an absolute content position, clamped to the scrollable range.
    /// The cast is safe because DOM scroll offsets fit in `i32`.
    #[allow(clippy::cast_possible_truncation)]
    #[wasm_bindgen(js_name = "setScroll")]
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        let (x, y) = {
            let mut state = self.state.borrow_mut();
            let (max_x, max_y) = state.view.max_scroll();
            let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
            let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, max_y) };
            state.view.set_scroll(x, y);
            (x, y)
        };
        if let Some(container) = &self.scroll_container {
            container.set_scroll_left(x.round() as i32);
            container.set_scroll_top(y.round() as i32);
        }
    }

    /// Resize the canvas buffer and the viewport.
    #[wasm_bindgen]
    pub fn resize(&mut self, physical_width: u32, physical_height: u32, dpr: f32) {
        let physical_width = physical_width.max(1);
        let physical_height = physical_height.max(1);
        self.renderer.resize(physical_width, physical_height, dpr);
        let logical_width = f64::from(physical_width) / f64::from(dpr);
        let logical_height = f64::from(physical_height) / f64::from(dpr);
        self.renderer.set_canvas_css_size(logical_width, logical_height);
        self.state
            .borrow_mut()
            .view
            .set_viewport_size(logical_width, logical_height);
    }

    /// Paint the current frame if anything changed since the last paint.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.update_scroll_spacer();
        let mut s = self.state.borrow_mut();
        if !s.view.needs_render() {
            return Ok(());
        }
        s.view.render(&mut self.renderer)?;
        Ok(())
    }

    /// The current frame as a plain object, for hosts that draw it themselves.
    #[wasm_bindgen]
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.view.frame())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Called whenever the grid needs repainting, e.g. from a drag or scroll.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Function) {
        self.state.borrow_mut().render_callback = Some(callback);
    }

    #[wasm_bindgen(js_name = "columnWidth")]
    pub fn column_width(&self) -> u32 {
        self.state.borrow().view.column_width()
    }

    #[wasm_bindgen(js_name = "isResizing")]
    pub fn is_resizing(&self) -> bool {
        self.state.borrow().view.resize_controller().is_active()
    }

    /// Inclusive index range of the materialized rows, or `undefined`.
    #[wasm_bindgen(js_name = "visibleRange")]
    pub fn visible_range(&self) -> Option<Vec<u32>> {
        let s = self.state.borrow();
        let (first, last) = s.view.window().range()?;
        Some(vec![
            u32::try_from(first).unwrap_or(u32::MAX),
            u32::try_from(last).unwrap_or(u32::MAX),
        ])
    }
}
