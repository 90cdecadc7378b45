//! Resize interaction tests
//!
//! Tests for drag clamping, ignored input while idle or already dragging,
//! and release of pointer observers across many drags.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use stickygrid::resize::{ListenerRegistry, PointerHub, ResizeController, WidthBounds};
use test_case::test_case;

fn controller(initial: u32) -> ResizeController<ListenerRegistry> {
    ResizeController::new(ListenerRegistry::new(), WidthBounds::default(), initial)
}

#[test_case(150, 500.0 => 400; "plus 500 clamps to max")]
#[test_case(150, -500.0 => 60; "minus 500 clamps to min")]
#[test_case(150, 0.0 => 150; "no movement")]
#[test_case(150, 250.0 => 400; "exactly reaches max")]
#[test_case(150, -90.0 => 60; "exactly reaches min")]
#[test_case(150, 12.4 => 162; "rounds down")]
#[test_case(150, 12.5 => 163; "rounds half away from zero")]
fn test_drag_delta(initial: u32, delta: f64) -> u32 {
    let mut c = controller(initial);
    c.pointer_down(300.0);
    c.pointer_move(300.0 + delta);
    c.pointer_up();
    c.width()
}

#[test]
fn test_width_within_bounds_at_every_step() {
    let mut c = controller(150);
    c.pointer_down(0.0);
    for x in (-2000..2000).step_by(37) {
        let width = c.pointer_move(f64::from(x)).unwrap();
        assert!((60..=400).contains(&width), "width {width} at x {x}");
        assert_eq!(width, c.width());
    }
}

#[test]
fn test_delta_is_relative_to_drag_start() {
    let mut c = controller(150);
    c.pointer_down(100.0);
    c.pointer_move(1000.0);
    // Coming back restores the start width: clamping does not shift the anchor.
    assert_eq!(c.pointer_move(100.0), Some(150));
    c.pointer_up();

    c.pointer_down(50.0);
    assert_eq!(c.pointer_move(70.0), Some(170));
}

#[test]
fn test_custom_bounds() {
    let mut c = ResizeController::new(ListenerRegistry::new(), WidthBounds::new(100, 200), 150);
    c.pointer_down(0.0);
    assert_eq!(c.pointer_move(-1000.0), Some(100));
    assert_eq!(c.pointer_move(1000.0), Some(200));
}

#[test]
fn test_many_drags_do_not_leak_observers() {
    let registry = ListenerRegistry::new();
    let mut c = ResizeController::new(registry.clone(), WidthBounds::default(), 150);

    for i in 0..1000 {
        assert!(c.pointer_down(f64::from(i)));
        assert_eq!(registry.live(), 1);
        c.pointer_move(f64::from(i) + 3.0);
        if i % 2 == 0 {
            c.pointer_up();
        } else {
            c.capture_lost();
        }
        assert_eq!(registry.live(), 0);
    }
    assert_eq!(registry.total(), 1000);
}

#[test]
fn test_capture_lost_keeps_last_width() {
    let mut c = controller(150);
    c.pointer_down(0.0);
    c.pointer_move(80.0);
    assert!(c.capture_lost());
    assert_eq!(c.width(), 230);
    assert_eq!(c.pointer_move(500.0), None);
    assert_eq!(c.width(), 230);
}

/// A hub whose subscriptions record their own release order.
#[derive(Default, Clone)]
struct LogHub {
    log: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
}

struct LogGuard(std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>);

impl Drop for LogGuard {
    fn drop(&mut self) {
        self.0.borrow_mut().push("release");
    }
}

impl PointerHub for LogHub {
    type Subscription = LogGuard;

    fn subscribe(&self) -> LogGuard {
        self.log.borrow_mut().push("subscribe");
        LogGuard(std::rc::Rc::clone(&self.log))
    }
}

#[test]
fn test_custom_hub_sees_paired_calls() {
    let hub = LogHub::default();
    let mut c = ResizeController::new(hub.clone(), WidthBounds::default(), 150);
    c.pointer_down(0.0);
    c.pointer_down(10.0);
    c.pointer_up();
    c.pointer_up();
    c.pointer_down(0.0);
    c.capture_lost();
    assert_eq!(
        *hub.log.borrow(),
        ["subscribe", "release", "subscribe", "release"]
    );
}
