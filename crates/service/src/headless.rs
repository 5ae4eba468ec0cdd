//! Host backend for machines without a TV shell: windows and shell requests
//! are logged, audio is an in-memory level.  Used by the `ribbon` binary for
//! development and scripted runs.

use ribbon_core::{HostError, WidthMode};
use ribbon_overlay::{
    AudioHost, Notifier, StripView, SystemHost, WindowHandle, WindowHost, WindowSpec,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct HeadlessWindow {
    next_id: u64,
    live:    Option<WindowHandle>,
}

impl HeadlessWindow {
    fn check(&self, handle: WindowHandle) -> Result<(), HostError> {
        if self.live == Some(handle) {
            Ok(())
        } else {
            Err(HostError::Gone)
        }
    }
}

impl WindowHost for HeadlessWindow {
    fn create(&mut self, spec: &WindowSpec) -> Result<WindowHandle, HostError> {
        self.next_id += 1;
        let handle = WindowHandle(self.next_id);
        self.live = Some(handle);
        info!(
            "[window] create {handle:?} at ({}, {}) {:?} on_top={}",
            spec.x, spec.y, spec.width, spec.flags.always_on_top
        );
        Ok(handle)
    }

    fn reposition(&mut self, handle: WindowHandle, x: i32, y: i32) -> Result<(), HostError> {
        self.check(handle)?;
        debug!("[window] move to ({x}, {y})");
        Ok(())
    }

    fn resize(&mut self, handle: WindowHandle, width: WidthMode) -> Result<(), HostError> {
        self.check(handle)?;
        info!("[window] resize {width:?}");
        Ok(())
    }

    fn destroy(&mut self, handle: WindowHandle) -> Result<(), HostError> {
        self.check(handle)?;
        self.live = None;
        info!("[window] destroy {handle:?}");
        Ok(())
    }

    fn present(&mut self, handle: WindowHandle, view: &StripView) -> Result<(), HostError> {
        self.check(handle)?;
        debug!(
            "[window] {} bg={} fg={} volume={}/{}{} alpha={}{}",
            view.clock,
            view.background,
            view.foreground,
            view.volume.position(),
            view.volume.max(),
            if view.volume_panel { " [volume panel]" } else { "" },
            view.alpha,
            if view.transparency_panel { " [transparency panel]" } else { "" },
        );
        Ok(())
    }
}

/// Media volume kept in memory.
///
/// The level is shared with [`ExternalVolume`] handles so that changes made
/// "outside" the overlay (remote keys, other apps) land in the same place the
/// controller reads from.
#[derive(Debug)]
pub struct HeadlessAudio {
    level: Arc<AtomicI32>,
    max:   i32,
}

impl HeadlessAudio {
    pub fn new(level: i32, max: i32) -> Self {
        let max = max.max(0);
        Self { level: Arc::new(AtomicI32::new(level.clamp(0, max))), max }
    }

    /// Handle for changing the level from another task.
    pub fn external(&self) -> ExternalVolume {
        ExternalVolume { level: Arc::clone(&self.level), max: self.max }
    }
}

impl Default for HeadlessAudio {
    fn default() -> Self {
        Self::new(7, 15)
    }
}

impl AudioHost for HeadlessAudio {
    fn level(&self) -> i32 {
        self.level.load(Ordering::Relaxed)
    }

    fn max(&self) -> i32 {
        self.max
    }

    fn set_level(&mut self, level: i32) {
        let level = level.clamp(0, self.max);
        self.level.store(level, Ordering::Relaxed);
        info!("[audio] level {level}/{}", self.max);
    }
}

/// Another audio client changing the headless level.
#[derive(Debug, Clone)]
pub struct ExternalVolume {
    level: Arc<AtomicI32>,
    max:   i32,
}

impl ExternalVolume {
    /// Store `level` (clamped) and return what the host now reports.
    pub fn set(&self, level: i32) -> i32 {
        let level = level.clamp(0, self.max);
        self.level.store(level, Ordering::Relaxed);
        info!("[audio] external level {level}/{}", self.max);
        level
    }
}

/// Shell with a launcher but no direct recents entry point, so recents
/// always goes through the helper.
#[derive(Debug, Default)]
pub struct HeadlessShell;

impl SystemHost for HeadlessShell {
    fn go_home(&mut self) -> Result<(), HostError> {
        info!("[shell] go home");
        Ok(())
    }

    fn show_recents(&mut self) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }
}

/// Notices go to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&mut self, text: &str) {
        warn!("[notice] {text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_overlay::WindowFlags;

    #[test]
    fn stale_handle_is_rejected() {
        let mut w = HeadlessWindow::default();
        let spec = WindowSpec { x: 0, y: 0, width: WidthMode::Expanded, flags: WindowFlags::default() };
        let h = w.create(&spec).unwrap();
        w.destroy(h).unwrap();
        assert_eq!(w.reposition(h, 1, 1), Err(HostError::Gone));
        assert_eq!(w.destroy(h), Err(HostError::Gone));
    }

    #[test]
    fn audio_clamps() {
        let mut a = HeadlessAudio::new(40, 15);
        assert_eq!(a.level(), 15);
        a.set_level(-1);
        assert_eq!(a.level(), 0);
    }

    #[test]
    fn external_changes_reach_the_host_level() {
        let a = HeadlessAudio::default();
        let ext = a.external();
        assert_eq!(ext.set(12), 12);
        assert_eq!(a.level(), 12);
        assert_eq!(ext.set(99), 15);
        assert_eq!(a.level(), 15);
    }

    #[test]
    fn shell_defers_recents() {
        assert_eq!(HeadlessShell.show_recents(), Err(HostError::Unsupported));
        assert!(HeadlessShell.go_home().is_ok());
    }
}
