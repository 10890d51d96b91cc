//! Style-layer glue: hands windows to the manager at polish / unpolish.

use crate::event::TapEvent;
use crate::window::{WindowHandle, WindowManager, opts_in};

pub struct StyleAdapter {
    window_manager: WindowManager,
}

impl StyleAdapter {
    pub fn new(window_manager: WindowManager) -> Self {
        Self { window_manager }
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.window_manager
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager {
        &mut self.window_manager
    }

    /// Called when a widget is prepared for display. Child widgets and
    /// opted-out windows are left alone.
    pub fn polish(&mut self, widget: &WindowHandle) {
        let Ok(win) = widget.try_borrow() else {
            return;
        };
        if !win.is_toplevel() || !opts_in(&*win) {
            return;
        }
        drop(win);
        self.window_manager.register_widget(widget.clone());
    }

    /// Called when a widget is torn down; mirrors [`polish`](Self::polish).
    pub fn unpolish(&mut self, widget: &WindowHandle) {
        let Ok(win) = widget.try_borrow() else {
            return;
        };
        if !win.is_toplevel() || !opts_in(&*win) {
            return;
        }
        let id = win.id();
        drop(win);
        self.window_manager.unregister_widget(id);
    }

    pub fn filter_event(&mut self, event: &TapEvent) -> bool {
        self.window_manager.filter_event(event)
    }
}
