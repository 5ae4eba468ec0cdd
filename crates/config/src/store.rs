//! Persisted appearance preferences.
//!
//! A flat key → value table.  Writes are staged and only become visible to
//! readers (and, for [`FileStore`], reach disk) on [`AppearanceStore::commit`].

use ribbon_core::{Result, RibbonError};
use std::io::Write;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::{debug, warn};

/// Strip background colour, hex string.
pub const KEY_RIBBON_COLOR: &str = "ribbon_color";
/// Button and clock text colour, hex string.
pub const KEY_BUTTON_COLOR: &str = "button_color";
/// Strip alpha, integer `0..=255`.
pub const KEY_RIBBON_TRANSPARENCY: &str = "ribbon_transparency";

pub const DEFAULT_RIBBON_COLOR: &str = "#000000";
pub const DEFAULT_BUTTON_COLOR: &str = "#FFFFFF";
pub const DEFAULT_RIBBON_TRANSPARENCY: i64 = 0xCC;

/// Key → value settings shared between the settings tool and the overlay.
pub trait AppearanceStore {
    /// Committed string value, or `default` when absent or not a string.
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Committed integer value, or `default` when absent or not an integer.
    fn get_int(&self, key: &str, default: i64) -> i64;

    fn set_string(&mut self, key: &str, value: &str);

    fn set_int(&mut self, key: &str, value: i64);

    /// Publish every staged write.
    fn commit(&mut self) -> Result<()>;

    /// Drop cached values and re-read the backing storage.
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

// ── Staging table ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct Staged {
    values:  Table,
    pending: Table,
}

impl Staged {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                warn!("store key '{key}' holds {} not a string; using default", other.type_str());
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(Value::Integer(i)) => *i,
            Some(other) => {
                warn!("store key '{key}' holds {} not an integer; using default", other.type_str());
                default
            }
            None => default,
        }
    }

    fn stage(&mut self, key: &str, value: Value) {
        self.pending.insert(key.to_string(), value);
    }

    fn apply(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        for (key, value) in std::mem::take(&mut self.pending) {
            self.values.insert(key, value);
        }
        true
    }
}

// ── In-memory backend ─────────────────────────────────────────────────────────

/// Volatile store, used by tests and dry-run previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Staged,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store whose values are already committed.
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let mut store = Self::default();
        for (k, v) in values {
            store.inner.values.insert(k.to_string(), v);
        }
        store
    }
}

impl AppearanceStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.inner.get_string(key, default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.inner.get_int(key, default)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.inner.stage(key, Value::String(value.to_string()));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.inner.stage(key, Value::Integer(value));
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.apply();
        Ok(())
    }
}

// ── File backend ──────────────────────────────────────────────────────────────

/// Store persisted as a flat TOML table.
///
/// Opening never fails: a missing or unparseable file behaves as an empty
/// store so every key falls back to its default.
#[derive(Debug, Clone)]
pub struct FileStore {
    path:  PathBuf,
    inner: Staged,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = read_table(&path);
        Self {
            path,
            inner: Staged { values, pending: Table::new() },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AppearanceStore for FileStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.inner.get_string(key, default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.inner.get_int(key, default)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.inner.stage(key, Value::String(value.to_string()));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.inner.stage(key, Value::Integer(value));
    }

    fn commit(&mut self) -> Result<()> {
        if !self.inner.apply() {
            return Ok(());
        }

        let raw = toml::to_string(&self.inner.values)
            .map_err(|e| RibbonError::Store(format!("serialize: {e}")))?;
        write_atomic(&self.path, raw.as_bytes())?;
        debug!("Committed appearance store to '{}'", self.path.display());
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.inner.values = read_table(&self.path);
        Ok(())
    }
}

fn read_table(path: &Path) -> Table {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Table::new(),
        Err(e) => {
            warn!("Cannot read appearance store '{}': {e}; using defaults", path.display());
            return Table::new();
        }
    };

    toml::from_str::<Table>(&raw).unwrap_or_else(|e| {
        warn!("Appearance store '{}' is not valid TOML: {e}; using defaults", path.display());
        Table::new()
    })
}

/// Write via a temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path)
        .map_err(|e| RibbonError::Store(format!("persist '{}': {}", path.display(), e.error)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let s = MemoryStore::new();
        assert_eq!(s.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR), "#000000");
        assert_eq!(s.get_int(KEY_RIBBON_TRANSPARENCY, DEFAULT_RIBBON_TRANSPARENCY), 0xCC);
    }

    #[test]
    fn writes_are_invisible_until_commit() {
        let mut s = MemoryStore::new();
        s.set_string(KEY_BUTTON_COLOR, "#FF9800");
        assert_eq!(s.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR), "#FFFFFF");
        s.commit().unwrap();
        assert_eq!(s.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR), "#FF9800");
    }

    #[test]
    fn wrong_type_falls_back_to_default() {
        let s = MemoryStore::with_values([(KEY_RIBBON_TRANSPARENCY, Value::String("lots".into()))]);
        assert_eq!(s.get_int(KEY_RIBBON_TRANSPARENCY, 0xCC), 0xCC);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("appearance.toml");

        let mut s = FileStore::open(&path);
        s.set_string(KEY_RIBBON_COLOR, "#224466");
        s.set_int(KEY_RIBBON_TRANSPARENCY, 200);
        s.commit().unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR), "#224466");
        assert_eq!(reopened.get_int(KEY_RIBBON_TRANSPARENCY, 0), 200);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appearance.toml");
        let mut reader = FileStore::open(&path);

        let mut writer = FileStore::open(&path);
        writer.set_string(KEY_BUTTON_COLOR, "#2196F3");
        writer.commit().unwrap();

        assert_eq!(reader.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR), "#FFFFFF");
        reader.reload().unwrap();
        assert_eq!(reader.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR), "#2196F3");
    }

    #[test]
    fn corrupt_file_behaves_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appearance.toml");
        std::fs::write(&path, "ribbon_color = ").unwrap();
        let s = FileStore::open(&path);
        assert_eq!(s.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR), "#000000");
    }
}
