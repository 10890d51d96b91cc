//! Client-side move, resize and maximize handling for frameless windows.
//!
//! A toolkit style layer registers its top-level windows with a
//! [`WindowManager`](window::WindowManager) and offers every dispatched
//! pointer event to it; presses on window chrome turn into drags and resizes
//! while clicks on child controls pass through untouched.

pub mod config;
pub mod constants;
pub mod event;
pub mod playground;
pub mod style;
pub mod tracing_sub;
pub mod window;
