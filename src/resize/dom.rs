//! Browser pointer hub: drag observers on `document` and `window`.
//!
//! A subscription registers `mousemove` and `mouseup` on the document plus
//! `blur` on the window (a drag whose mouseup lands outside the page never
//! reports it). Dropping the subscription removes all three listeners.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, MouseEvent, Window};

use super::hub::PointerHub;

/// Pointer notification delivered to the hub's handler during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSignal {
    /// Pointer moved to this client x coordinate.
    Move(f64),
    Up,
    CaptureLost,
}

type Handler = Rc<dyn Fn(PointerSignal)>;

/// Hub that registers real DOM listeners for each drag.
///
/// The handler is installed after construction because it usually needs a
/// handle to the state that owns this hub.
#[derive(Clone, Default)]
pub struct DocumentPointerHub {
    handler: Rc<RefCell<Option<Handler>>>,
    // Closures of finished drags. A listener can end its own drag, and a
    // closure must not be freed while it runs, so they are freed on the next
    // subscribe instead.
    retired: Rc<RefCell<Vec<Closure<dyn FnMut(Event)>>>>,
}

impl DocumentPointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the function that receives pointer signals.
    pub fn set_handler(&self, handler: impl Fn(PointerSignal) + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    fn listener(&self, map: fn(&Event) -> Option<PointerSignal>) -> Closure<dyn FnMut(Event)> {
        let slot = Rc::clone(&self.handler);
        Closure::wrap(Box::new(move |event: Event| {
            let Some(signal) = map(&event) else {
                return;
            };
            // Clone out of the slot so the handler can tear this drag down.
            let handler = slot.borrow().clone();
            if let Some(handler) = handler {
                handler(signal);
            }
        }) as Box<dyn FnMut(Event)>)
    }
}

fn on_move(event: &Event) -> Option<PointerSignal> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|e| PointerSignal::Move(f64::from(e.client_x())))
}

fn on_up(_event: &Event) -> Option<PointerSignal> {
    Some(PointerSignal::Up)
}

fn on_blur(_event: &Event) -> Option<PointerSignal> {
    Some(PointerSignal::CaptureLost)
}

/// Registration for one drag; removes its listeners on drop.
pub struct DocumentSubscription {
    window: Option<Window>,
    document: Option<Document>,
    move_closure: Option<Closure<dyn FnMut(Event)>>,
    up_closure: Option<Closure<dyn FnMut(Event)>>,
    blur_closure: Option<Closure<dyn FnMut(Event)>>,
    retired: Rc<RefCell<Vec<Closure<dyn FnMut(Event)>>>>,
}

impl PointerHub for DocumentPointerHub {
    type Subscription = DocumentSubscription;

    fn subscribe(&self) -> DocumentSubscription {
        self.retired.borrow_mut().clear();

        let window = web_sys::window();
        let document = window.as_ref().and_then(Window::document);
        let move_closure = self.listener(on_move);
        let up_closure = self.listener(on_up);
        let blur_closure = self.listener(on_blur);

        if let Some(document) = &document {
            let _ = document.add_event_listener_with_callback(
                "mousemove",
                move_closure.as_ref().unchecked_ref(),
            );
            let _ = document
                .add_event_listener_with_callback("mouseup", up_closure.as_ref().unchecked_ref());
        }
        if let Some(window) = &window {
            let _ = window
                .add_event_listener_with_callback("blur", blur_closure.as_ref().unchecked_ref());
        }

        DocumentSubscription {
            window,
            document,
            move_closure: Some(move_closure),
            up_closure: Some(up_closure),
            blur_closure: Some(blur_closure),
            retired: Rc::clone(&self.retired),
        }
    }
}

impl Drop for DocumentSubscription {
    fn drop(&mut self) {
        if let Some(document) = &self.document {
            if let Some(c) = &self.move_closure {
                let _ = document
                    .remove_event_listener_with_callback("mousemove", c.as_ref().unchecked_ref());
            }
            if let Some(c) = &self.up_closure {
                let _ = document
                    .remove_event_listener_with_callback("mouseup", c.as_ref().unchecked_ref());
            }
        }
        if let (Some(window), Some(c)) = (&self.window, &self.blur_closure) {
            let _ = window.remove_event_listener_with_callback("blur", c.as_ref().unchecked_ref());
        }

        let mut retired = self.retired.borrow_mut();
        retired.extend(self.move_closure.take());
        retired.extend(self.up_closure.take());
        retired.extend(self.blur_closure.take());
    }
}
