use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure parsed from `ribbon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Window placement, drag and collapse behaviour.
    pub overlay: OverlayConfig,
    /// Clock label.
    pub clock: ClockConfig,
    /// Out-of-process recents helper.
    pub recents: RecentsConfig,
    /// Appearance store location.
    pub store: StoreConfig,
}

/// Overlay window and visibility state machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial window position in screen pixels.
    pub initial_x: i32,
    pub initial_y: i32,
    /// Displacement (either axis) that turns a tap into a drag.
    pub drag_threshold: i32,
    /// Inactivity delay before the strip collapses.
    pub collapse_delay_ms: u64,
    /// What collapsing does to the window.
    pub collapse_mode: CollapseMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            initial_x:         0,
            initial_y:         0,
            drag_threshold:    10,
            collapse_delay_ms: 7_000,
            collapse_mode:     CollapseMode::HidePanels,
        }
    }
}

impl OverlayConfig {
    /// The short-lived variant: 5 s timeout, collapse tears the window down.
    pub fn compact() -> Self {
        Self {
            collapse_delay_ms: 5_000,
            collapse_mode:     CollapseMode::Teardown,
            ..Self::default()
        }
    }

    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay_ms)
    }
}

/// Effect of the inactivity timeout on the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollapseMode {
    /// Shrink to the collapsed width and hide secondary panels.
    #[default]
    HidePanels,
    /// Hide secondary panels and destroy the window until the next expand.
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// `strftime` format for the clock label.
    pub format: String,
    pub refresh_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format:     "%H:%M".to_string(),
            refresh_ms: 1_000,
        }
    }
}

impl ClockConfig {
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentsConfig {
    /// Helper socket; `None` = `$XDG_RUNTIME_DIR/ribbon/recents.sock`.
    pub socket: Option<PathBuf>,
    /// Give up on the helper after this long and report failure.
    pub timeout_ms: u64,
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            socket:     None,
            timeout_ms: 1_500,
        }
    }
}

impl RecentsConfig {
    pub fn socket_path(&self) -> PathBuf {
        self.socket.clone().unwrap_or_else(crate::default_recents_socket)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Appearance store file; `None` = `$XDG_CONFIG_HOME/ribbon/appearance.toml`.
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(crate::default_store_path)
    }
}
