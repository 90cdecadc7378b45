//! Resize interaction: a pointer-driven state machine over the shared pinned width.
//!
//! ```text
//!   Idle --pointer_down--> Dragging --pointer_up / capture_lost--> Idle
//! ```
//!
//! The observer registration for a drag lives inside the [`DragSession`], so
//! leaving `Dragging` by any path drops it and unregisters the observers.

mod hub;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use hub::{ListenerRegistry, PointerHub, RegistryGuard};

#[cfg(target_arch = "wasm32")]
pub use dom::{DocumentPointerHub, DocumentSubscription, PointerSignal};

use tracing::debug;

use crate::config::{MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH};

/// Closed range the resizable width is kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthBounds {
    min: u32,
    max: u32,
}

impl Default for WidthBounds {
    fn default() -> Self {
        Self {
            min: MIN_COLUMN_WIDTH,
            max: MAX_COLUMN_WIDTH,
        }
    }
}

impl WidthBounds {
    /// Bounds `min..=max`. Swapped arguments are reordered.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Clamp a candidate width in pixels, rounding to the nearest pixel.
    /// Non-finite candidates are mapped to the nearest bound (NaN to `min`).
    /// The cast is safe because the value is clamped into `u32` bounds first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamp(&self, candidate: f64) -> ResizableWidth {
        let lo = f64::from(self.min);
        let hi = f64::from(self.max);
        let px = if candidate.is_nan() {
            lo
        } else {
            candidate.round().clamp(lo, hi)
        };
        ResizableWidth(px as u32)
    }
}

/// Width shared by every pinned column. Only [`WidthBounds::clamp`] creates one,
/// so a stored value is always within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResizableWidth(u32);

impl ResizableWidth {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// An active drag: where it started, and the observer registration it owns.
#[derive(Debug)]
pub struct DragSession<G> {
    start_pointer_x: f64,
    start_width: ResizableWidth,
    _subscription: G,
}

impl<G> DragSession<G> {
    pub fn start_pointer_x(&self) -> f64 {
        self.start_pointer_x
    }

    pub fn start_width(&self) -> ResizableWidth {
        self.start_width
    }
}

enum DragState<G> {
    Idle,
    Dragging(DragSession<G>),
}

/// Owns the resizable width and the drag lifecycle.
pub struct ResizeController<H: PointerHub> {
    hub: H,
    bounds: WidthBounds,
    width: ResizableWidth,
    state: DragState<H::Subscription>,
}

impl<H: PointerHub> ResizeController<H> {
    /// Create an idle controller. `initial` is clamped into `bounds`.
    pub fn new(hub: H, bounds: WidthBounds, initial: u32) -> Self {
        Self {
            hub,
            bounds,
            width: bounds.clamp(f64::from(initial)),
            state: DragState::Idle,
        }
    }

    /// Current width, always within bounds.
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    /// True while a drag is in progress (drives the handle's active look).
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession<H::Subscription>> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Start a drag at horizontal pointer position `x`.
    ///
    /// Returns `false` and changes nothing if a drag is already running or `x`
    /// is not finite.
    pub fn pointer_down(&mut self, x: f64) -> bool {
        if self.is_active() || !x.is_finite() {
            return false;
        }
        let subscription = self.hub.subscribe();
        self.state = DragState::Dragging(DragSession {
            start_pointer_x: x,
            start_width: self.width,
            _subscription: subscription,
        });
        debug!(x, width = self.width.get(), "resize drag started");
        true
    }

    /// Apply a pointer move. Returns the new width while dragging.
    pub fn pointer_move(&mut self, x: f64) -> Option<u32> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        if !x.is_finite() {
            return None;
        }
        let candidate = f64::from(session.start_width.get()) + (x - session.start_pointer_x);
        self.width = self.bounds.clamp(candidate);
        Some(self.width.get())
    }

    /// Finish the drag. Returns `false` if none was running.
    pub fn pointer_up(&mut self) -> bool {
        self.end_drag("pointer up")
    }

    /// The pointer-up will never arrive (focus lost, capture released).
    pub fn capture_lost(&mut self) -> bool {
        self.end_drag("capture lost")
    }

    fn end_drag(&mut self, reason: &str) -> bool {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => {
                drop(session);
                debug!(reason, width = self.width.get(), "resize drag ended");
                true
            }
            DragState::Idle => false,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn controller(initial: u32) -> ResizeController<ListenerRegistry> {
        ResizeController::new(ListenerRegistry::new(), WidthBounds::default(), initial)
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut c = controller(150);
        assert!(c.pointer_down(500.0));
        assert_eq!(c.pointer_move(540.0), Some(190));
        assert_eq!(c.pointer_move(480.0), Some(130));
        assert!(c.pointer_up());
        assert_eq!(c.width(), 130);
    }

    #[test]
    fn test_clamps_high_and_low() {
        let mut c = controller(150);
        c.pointer_down(0.0);
        assert_eq!(c.pointer_move(500.0), Some(400));
        assert_eq!(c.pointer_move(-500.0), Some(60));
        c.pointer_up();
        assert_eq!(c.width(), 60);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut c = controller(150);
        assert_eq!(c.pointer_move(900.0), None);
        assert_eq!(c.width(), 150);
        assert!(!c.pointer_up());
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut c = controller(150);
        assert!(c.pointer_down(100.0));
        assert!(!c.pointer_down(300.0));
        assert_eq!(c.session().unwrap().start_pointer_x(), 100.0);
        assert_eq!(c.hub().live(), 1);
        assert_eq!(c.hub().total(), 1);
    }

    #[test]
    fn test_observers_released_on_every_exit() {
        let mut c = controller(150);
        let registry = c.hub().clone();

        c.pointer_down(0.0);
        c.pointer_up();
        assert_eq!(registry.live(), 0);

        c.pointer_down(0.0);
        assert!(c.capture_lost());
        assert!(!c.is_active());
        assert_eq!(registry.live(), 0);

        c.pointer_down(0.0);
        drop(c);
        assert_eq!(registry.live(), 0);
        assert_eq!(registry.total(), 3);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut c = controller(150);
        assert!(!c.pointer_down(f64::NAN));
        c.pointer_down(10.0);
        assert_eq!(c.pointer_move(f64::INFINITY), None);
        assert_eq!(c.width(), 150);
    }

    #[test]
    fn test_initial_width_is_clamped() {
        assert_eq!(controller(5).width(), 60);
        assert_eq!(controller(1000).width(), 400);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = WidthBounds::default();
        assert_eq!(bounds.clamp(59.4).get(), 60);
        assert_eq!(bounds.clamp(212.6).get(), 213);
        assert_eq!(bounds.clamp(f64::NAN).get(), 60);
        assert_eq!(bounds.clamp(f64::INFINITY).get(), 400);
        assert_eq!(WidthBounds::new(400, 60), bounds);
    }
}
