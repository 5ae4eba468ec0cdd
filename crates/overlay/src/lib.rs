//! Overlay control surface: the floating strip's window, input arbitration
//! and expand/collapse state machine.
//!
//! The host platform is reached only through the traits in [`host`] and the
//! [`scheduler::Scheduler`] capability, so the whole controller runs (and is
//! tested) without real windows or real time.

pub mod clock;
pub mod controller;
pub mod dispatch;
pub mod drag;
pub mod host;
pub mod scheduler;
pub mod visibility;
pub mod volume;
pub mod window;

#[cfg(test)]
mod testing;

pub use controller::{Collaborators, Lifecycle, OverlayController};
pub use dispatch::{Action, RECENTS_FAILED};
pub use host::{
    AudioHost, Notifier, RecentsHelper, StripView, SystemHost, WindowFlags, WindowHandle,
    WindowHost, WindowSpec,
};
pub use scheduler::{ManualScheduler, Scheduler};
