//! Capabilities the host platform lends to the overlay.
//!
//! Everything here is implemented outside this crate: by the device shell on
//! real hardware, by the headless backend in `ribbon-service`, or by fakes in
//! tests.  All methods are called from the controller's single event thread.

use ribbon_core::{HostError, VolumeSlider, WidthMode};
use ribbon_theme::Argb;

/// Opaque identifier of a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Window-manager flags requested at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    /// Stay above all application content.
    pub always_on_top: bool,
    /// Accept remote/D-pad focus (needed for click navigation on TVs).
    pub focusable:     bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self { always_on_top: true, focusable: true }
    }
}

/// Everything the host needs to create the strip window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub x:     i32,
    pub y:     i32,
    pub width: WidthMode,
    pub flags: WindowFlags,
}

/// What the strip should currently show.  The host owns layout and drawing;
/// the overlay only decides values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripView {
    pub background:         Argb,
    pub foreground:         Argb,
    pub clock:              String,
    pub volume_panel:       bool,
    pub transparency_panel: bool,
    pub volume:             VolumeSlider,
    pub alpha:              u8,
}

/// Always-on-top window registration.
pub trait WindowHost {
    fn create(&mut self, spec: &WindowSpec) -> Result<WindowHandle, HostError>;
    fn reposition(&mut self, handle: WindowHandle, x: i32, y: i32) -> Result<(), HostError>;
    fn resize(&mut self, handle: WindowHandle, width: WidthMode) -> Result<(), HostError>;
    fn destroy(&mut self, handle: WindowHandle) -> Result<(), HostError>;
    fn present(&mut self, handle: WindowHandle, view: &StripView) -> Result<(), HostError>;
}

/// Media-stream volume.
pub trait AudioHost {
    fn level(&self) -> i32;
    fn max(&self) -> i32;
    fn set_level(&mut self, level: i32);
}

/// Shell navigation requests.
pub trait SystemHost {
    /// Return to the launcher.
    fn go_home(&mut self) -> Result<(), HostError>;
    /// Show the recent-tasks screen directly, if the host can.
    fn show_recents(&mut self) -> Result<(), HostError>;
}

/// Out-of-process helper that can open recents when the host can't.
///
/// Fire-and-forget: the verdict comes back later as
/// [`ribbon_core::Message::RecentsReply`] on the event queue.
pub trait RecentsHelper {
    fn request_open(&mut self);
}

/// Short user-visible messages (toasts).
pub trait Notifier {
    fn notice(&mut self, text: &str);
}
