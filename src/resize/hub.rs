//! Process-wide pointer observation, handed out as scoped subscriptions.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

/// A source of process-wide pointer move/up notifications.
///
/// `subscribe` registers the observers for one drag. The returned guard owns
/// that registration and must unregister it when dropped, so every exit from
/// a drag (pointer up, lost capture, the controller going away) releases it.
pub trait PointerHub {
    type Subscription;

    fn subscribe(&self) -> Self::Subscription;
}

/// Hub that only counts registrations.
///
/// Used off-browser, where the host forwards pointer events itself, and by
/// tests that check observers never leak across drags.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    live: Rc<Cell<usize>>,
    total: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriptions currently registered.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Subscriptions ever handed out.
    pub fn total(&self) -> usize {
        self.total.get()
    }
}

/// Registration held by [`ListenerRegistry`]; released on drop.
#[derive(Debug)]
pub struct RegistryGuard {
    live: Rc<Cell<usize>>,
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
        trace!(live = self.live.get(), "pointer observers released");
    }
}

impl PointerHub for ListenerRegistry {
    type Subscription = RegistryGuard;

    fn subscribe(&self) -> RegistryGuard {
        self.live.set(self.live.get() + 1);
        self.total.set(self.total.get() + 1);
        trace!(live = self.live.get(), "pointer observers registered");
        RegistryGuard {
            live: Rc::clone(&self.live),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let registry = ListenerRegistry::new();
        let guard = registry.subscribe();
        assert_eq!(registry.live(), 1);
        drop(guard);
        assert_eq!(registry.live(), 0);
        assert_eq!(registry.total(), 1);
    }

    #[test]
    fn test_clones_share_counts() {
        let registry = ListenerRegistry::new();
        let observer = registry.clone();
        let _guard = registry.subscribe();
        assert_eq!(observer.live(), 1);
    }
}
