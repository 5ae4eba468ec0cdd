pub mod schema;
pub mod store;
pub mod watcher;

pub use schema::{ClockConfig, CollapseMode, OverlayConfig, RecentsConfig, RibbonConfig, StoreConfig};
pub use store::{AppearanceStore, FileStore, MemoryStore};
pub use watcher::FileWatcher;

use ribbon_core::{Result, RibbonError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `RibbonConfig::default()` if
/// the file doesn't exist so the overlay always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<RibbonConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(RibbonConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| RibbonError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<RibbonConfig> {
    toml::from_str(raw).map_err(|e| RibbonError::Config(format!("TOML parse error: {e}")))
}

/// `$XDG_CONFIG_HOME/ribbon`, falling back to `~/.config/ribbon`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("ribbon")
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    config_dir().join("ribbon.toml")
}

/// Where the appearance store lives unless `[store] path` overrides it.
pub fn default_store_path() -> PathBuf {
    config_dir().join("appearance.toml")
}

/// Socket the recents helper listens on unless `[recents] socket` overrides it.
pub fn default_recents_socket() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .unwrap_or_else(|_| "/run/user/1000".to_string());
    PathBuf::from(runtime_dir).join("ribbon").join("recents.sock")
}
