use crate::host::{StripView, WindowFlags, WindowHandle, WindowHost, WindowSpec};
use ribbon_core::{HostError, OverlayWindowState, WidthMode};
use tracing::{debug, info};

/// Owns the single host window and its [`OverlayWindowState`].
///
/// The handle is held in an `Option` and taken on destroy, so tearing down
/// twice can never reach the host twice.  Reposition/resize/present
/// failures are dropped: the window may already be gone.
pub struct OverlayWindow {
    host:   Box<dyn WindowHost>,
    handle: Option<WindowHandle>,
    state:  OverlayWindowState,
    flags:  WindowFlags,
}

impl OverlayWindow {
    pub fn new(host: Box<dyn WindowHost>, x: i32, y: i32) -> Self {
        Self {
            host,
            handle: None,
            state:  OverlayWindowState::new(x, y),
            flags:  WindowFlags::default(),
        }
    }

    pub fn state(&self) -> OverlayWindowState {
        self.state
    }

    pub fn position(&self) -> (i32, i32) {
        (self.state.x, self.state.y)
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Create the window at the current position.  No-op when already open.
    pub fn open(&mut self, width: WidthMode) -> Result<(), HostError> {
        if self.handle.is_some() {
            return Ok(());
        }
        let spec = WindowSpec {
            x:     self.state.x,
            y:     self.state.y,
            width,
            flags: self.flags,
        };
        let handle = self.host.create(&spec)?;
        info!("Overlay window {handle:?} created at ({}, {})", spec.x, spec.y);
        self.handle = Some(handle);
        self.state.width = width;
        self.state.visible = true;
        Ok(())
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.state.x = x;
        self.state.y = y;
        if let Some(handle) = self.handle {
            if let Err(e) = self.host.reposition(handle, x, y) {
                debug!("reposition dropped: {e}");
            }
        }
    }

    pub fn resize(&mut self, width: WidthMode) {
        if self.state.width == width {
            return;
        }
        self.state.width = width;
        if let Some(handle) = self.handle {
            if let Err(e) = self.host.resize(handle, width) {
                debug!("resize dropped: {e}");
            }
        }
    }

    pub fn present(&mut self, view: &StripView) {
        if let Some(handle) = self.handle {
            if let Err(e) = self.host.present(handle, view) {
                debug!("present dropped: {e}");
            }
        }
    }

    /// Destroy the window if it exists.  Returns whether anything was destroyed.
    pub fn close(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        self.state.visible = false;
        if let Err(e) = self.host.destroy(handle) {
            debug!("destroy of {handle:?} reported: {e}");
        }
        info!("Overlay window {handle:?} destroyed");
        true
    }
}

impl std::fmt::Debug for OverlayWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayWindow")
            .field("handle", &self.handle)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
