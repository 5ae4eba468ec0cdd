use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watches one file for changes and sends a notification on every write.
///
/// The parent directory is watched rather than the file itself, because the
/// appearance store is replaced by rename on every commit and a watch on the
/// old inode would go quiet after the first save.  The watch is registered
/// before `spawn` returns, so any write after that is reported.  Bursts are
/// coalesced: at most one notification waits in the channel.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_, mut rx) = ribbon_config::FileWatcher::spawn("/home/user/.config/ribbon/appearance.toml");
/// while rx.recv().await.is_some() {
///     println!("store committed, reloading appearance");
/// }
/// # }
/// ```
pub struct FileWatcher {
    path: PathBuf,
}

impl FileWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    /// If the watch cannot be set up the receiver is closed immediately.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();

        if let Some(watch) = register(&path) {
            tokio::spawn(forward(watch, tx));
        }

        (Self { path }, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

struct Registration {
    _watcher:  RecommendedWatcher,
    events:    mpsc::Receiver<notify::Result<Event>>,
    file_name: OsString,
}

fn register(path: &Path) -> Option<Registration> {
    let Some(file_name) = path.file_name().map(OsString::from) else {
        error!("Cannot watch '{}': not a file path", path.display());
        return None;
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        error!("Cannot create '{}': {e}", dir.display());
        return None;
    }

    let (sync_tx, events) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return None;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return None;
    }

    info!("Watching appearance store: {}", path.display());
    Some(Registration { _watcher: watcher, events, file_name })
}

async fn forward(mut watch: Registration, tx: mpsc::Sender<()>) {
    while let Some(event) = watch.events.recv().await {
        match event {
            Ok(e) => {
                use notify::EventKind::*;
                let ours = e.paths.iter().any(|p| p.file_name() == Some(watch.file_name.as_os_str()));
                if ours && matches!(e.kind, Modify(_) | Create(_)) {
                    // A full channel already holds an undelivered notification.
                    match tx.try_send(()) {
                        Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
                        Err(mpsc::error::TrySendError::Closed(())) => break,
                    }
                }
            }
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
