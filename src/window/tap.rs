//! Dispatch-subscription half of the window manager.
//!
//! One process-wide observer sits in front of every registered window. It
//! owns the window -> policy lookup and decides, before any state-machine
//! work happens, whether an event is the manager's business at all. Events
//! it routes to [`Route::Ignore`] are never looked at again, which is what
//! keeps unregistered windows completely unaffected.

use std::collections::BTreeMap;

use crate::event::TapEvent;
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InterceptPolicy {
    MoveOnly,
    MoveResize,
}

impl InterceptPolicy {
    pub(crate) fn for_resizable(resizable: bool) -> Self {
        if resizable {
            Self::MoveResize
        } else {
            Self::MoveOnly
        }
    }

    pub(crate) fn allows_resize(self) -> bool {
        self == Self::MoveResize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    /// Not ours: deliver normally, touch nothing.
    Ignore,
    /// Pointer event for the state machine.
    Pointer,
    /// Lifecycle notification about a watched window.
    Lifecycle(WindowId),
}

#[derive(Debug, Default)]
pub(crate) struct EventTap {
    scopes: BTreeMap<WindowId, InterceptPolicy>,
    installed: bool,
}

impl EventTap {
    pub(crate) fn is_installed(&self) -> bool {
        self.installed
    }

    pub(crate) fn watches(&self, id: WindowId) -> bool {
        self.scopes.contains_key(&id)
    }

    pub(crate) fn policy(&self, id: WindowId) -> Option<InterceptPolicy> {
        self.scopes.get(&id).copied()
    }

    /// Start observing `id` and its descendants. Installs the global filter
    /// with the first scope. Returns `false` if `id` was already watched.
    pub(crate) fn watch(&mut self, id: WindowId, policy: InterceptPolicy) -> bool {
        if self.scopes.contains_key(&id) {
            return false;
        }
        self.scopes.insert(id, policy);
        if !self.installed {
            self.installed = true;
            tracing::debug!("installed global event tap");
        }
        true
    }

    /// Stop observing `id`. Removes the global filter with the last scope.
    pub(crate) fn unwatch(&mut self, id: WindowId) -> bool {
        if self.scopes.remove(&id).is_none() {
            return false;
        }
        if self.scopes.is_empty() && self.installed {
            self.installed = false;
            tracing::debug!("removed global event tap");
        }
        true
    }

    /// `active` is the owner of the in-flight pointer sequence, if any. Once
    /// a sequence is running its pointer events are routed even when the
    /// pointer has left the owner.
    pub(crate) fn route(&self, event: &TapEvent, active: Option<WindowId>) -> Route {
        if !self.installed {
            return Route::Ignore;
        }
        match event {
            TapEvent::Pointer(pointer) => {
                if active.is_some() {
                    return Route::Pointer;
                }
                match pointer.target_window() {
                    Some(id) if self.watches(id) => Route::Pointer,
                    _ => Route::Ignore,
                }
            }
            TapEvent::FocusLost(id)
            | TapEvent::Hidden(id)
            | TapEvent::Reparented(id)
            | TapEvent::Destroyed(id) => {
                if self.watches(*id) || active == Some(*id) {
                    Route::Lifecycle(*id)
                } else {
                    Route::Ignore
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Hit, PointerEvent};
    use crate::window::Point;

    fn press_on(id: u64) -> TapEvent {
        TapEvent::Pointer(PointerEvent::press(
            Point::new(0, 0),
            Some(Hit::surface(WindowId::new(id))),
        ))
    }

    #[test]
    fn installs_with_first_scope_and_removes_with_last() {
        let mut tap = EventTap::default();
        assert!(!tap.is_installed());
        assert!(tap.watch(WindowId::new(1), InterceptPolicy::MoveResize));
        assert!(tap.watch(WindowId::new(2), InterceptPolicy::MoveOnly));
        assert!(!tap.watch(WindowId::new(1), InterceptPolicy::MoveOnly));
        assert!(tap.is_installed());
        assert!(tap.watches(WindowId::new(2)));
        // the second watch of window 1 must not have replaced its policy
        assert_eq!(
            tap.policy(WindowId::new(1)),
            Some(InterceptPolicy::MoveResize)
        );

        assert!(tap.unwatch(WindowId::new(1)));
        assert!(tap.is_installed());
        assert!(!tap.unwatch(WindowId::new(1)));
        assert!(tap.unwatch(WindowId::new(2)));
        assert!(!tap.is_installed());
    }

    #[test]
    fn routes_only_watched_targets_when_idle() {
        let mut tap = EventTap::default();
        assert_eq!(tap.route(&press_on(1), None), Route::Ignore);
        tap.watch(WindowId::new(1), InterceptPolicy::MoveResize);
        assert_eq!(tap.route(&press_on(1), None), Route::Pointer);
        assert_eq!(tap.route(&press_on(9), None), Route::Ignore);
        assert_eq!(
            tap.route(&TapEvent::Hidden(WindowId::new(9)), None),
            Route::Ignore
        );
    }

    #[test]
    fn active_sequence_follows_pointer_off_window() {
        let mut tap = EventTap::default();
        tap.watch(WindowId::new(1), InterceptPolicy::MoveResize);
        let stray = TapEvent::Pointer(PointerEvent::drag(Point::new(5, 5), None));
        assert_eq!(tap.route(&stray, None), Route::Ignore);
        assert_eq!(tap.route(&stray, Some(WindowId::new(1))), Route::Pointer);
    }
}
